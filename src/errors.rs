use crate::notify::Level;
use axum::http::StatusCode;
use thiserror::Error;

/// Rejections raised by the date range selector. The message is shown to the
/// user as-is; the range held before the operation is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Cannot select future dates")]
    FutureDay,
    #[error("End date cannot be in the future")]
    FutureDate,
    #[error("Start date cannot be after end date")]
    RangeInverted,
    #[error("Please select a complete date range")]
    IncompleteRange,
    #[error("Please select both start and end dates")]
    MissingInput,
    #[error("Dates must use the YYYY-MM-DD format")]
    MalformedDate,
}

impl ValidationError {
    pub fn level(self) -> Level {
        match self {
            ValidationError::FutureDay => Level::Warning,
            _ => Level::Error,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            ValidationError::FutureDay | ValidationError::FutureDate => "future_date",
            ValidationError::RangeInverted => "range_inverted",
            ValidationError::IncompleteRange => "incomplete_range",
            ValidationError::MissingInput => "missing_input",
            ValidationError::MalformedDate => "malformed_date",
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
