use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_DURATION_MS: u64 = 3000;
pub const ERROR_DURATION_MS: u64 = 5000;
/// Toasts raised by the date range picker stay up for a shorter time.
pub const PICKER_DURATION_MS: u64 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Success => "success",
            Level::Warning => "warning",
            Level::Error => "error",
        }
    }
}

/// Sink for user-facing feedback.
pub trait Notifier {
    fn notify(&mut self, message: &str, level: Level);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub message: String,
    pub level: Level,
    /// Zero keeps the toast until it is dismissed.
    pub duration_ms: u64,
}

impl Toast {
    pub fn new(message: impl Into<String>, level: Level) -> Self {
        let duration_ms = match level {
            Level::Error => ERROR_DURATION_MS,
            _ => DEFAULT_DURATION_MS,
        };
        Self {
            message: message.into(),
            level,
            duration_ms,
        }
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }
}

/// Collects toasts raised during one interaction so they can be handed to the
/// page in a response.
#[derive(Debug, Default)]
pub struct ToastQueue {
    duration_ms: Option<u64>,
    toasts: Vec<Toast>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every toast pushed through `notify` uses `duration_ms`.
    pub fn with_duration(duration_ms: u64) -> Self {
        Self {
            duration_ms: Some(duration_ms),
            toasts: Vec::new(),
        }
    }

    pub fn push(&mut self, toast: Toast) {
        debug!(level = toast.level.as_str(), message = %toast.message, "toast");
        self.toasts.push(toast);
    }

    pub fn into_toasts(self) -> Vec<Toast> {
        self.toasts
    }
}

#[cfg(test)]
impl ToastQueue {
    pub fn last(&self) -> Option<&Toast> {
        self.toasts.last()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

impl Notifier for ToastQueue {
    fn notify(&mut self, message: &str, level: Level) {
        let toast = Toast::new(message, level);
        let toast = match self.duration_ms {
            Some(duration_ms) => toast.with_duration(duration_ms),
            None => toast,
        };
        self.push(toast);
    }
}
