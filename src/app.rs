use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(handlers::ATTENDANCE_PATH, get(handlers::attendance))
        .route("/api/presets", get(handlers::get_presets))
        .route("/api/range", get(handlers::get_range))
        .route("/api/range/select", post(handlers::select_day))
        .route("/api/range/preset", post(handlers::apply_preset))
        .route("/api/range/custom", post(handlers::apply_custom_range))
        .route("/api/range/commit", post(handlers::commit_range))
        .route("/api/range/month", post(handlers::navigate_month))
        .route("/api/calendar", get(handlers::get_calendar))
        .with_state(state)
}
