use crate::calendar::{MonthGrid, month_grid, visible_months};
use crate::dates::parse_date;
use crate::errors::AppError;
use crate::filter::{FilterQuery, RangeFilter};
use crate::models::{
    CalendarQuery, CommitRequest, CustomRangeRequest, MonthRequest, PresetInfo, PresetRequest,
    RangeResponse, SelectDayRequest,
};
use crate::navigation::PendingNavigation;
use crate::notify::{PICKER_DURATION_MS, ToastQueue};
use crate::presets::Preset;
use crate::selector::DateRangeSelector;
use crate::state::AppState;
use crate::table::{SortDirection, SortState};
use crate::ui::{AttendancePage, render_attendance};
use axum::{
    Json,
    extract::{Query, RawQuery, State},
    response::{Html, Redirect},
};
use chrono::NaiveDate;
use tracing::{debug, info, warn};

pub const ATTENDANCE_PATH: &str = "/attendance";

pub async fn index() -> Redirect {
    Redirect::to(ATTENDANCE_PATH)
}

pub async fn attendance(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
    RawQuery(raw): RawQuery,
) -> Html<String> {
    let today = state.today();
    let filter = RangeFilter::resolve(&query, today);
    let selector = DateRangeSelector::new(today, Some(filter.start), Some(filter.end));
    let months = visible_months(
        &selector,
        filter.end,
        query.calendar_month(),
        query.calendar_year(),
    );

    let sort = match (
        query.sort.as_deref().and_then(|value| value.parse::<usize>().ok()),
        query.dir.as_deref().and_then(SortDirection::parse),
    ) {
        (Some(column), direction) => {
            SortState::new(column, direction.unwrap_or(SortDirection::Asc))
        }
        _ => SortState::default(),
    };

    debug!(start = %filter.start, end = %filter.end, "rendering attendance page");
    let page = AttendancePage {
        today,
        filter,
        preset: Preset::detect(filter.start, filter.end, today),
        selector,
        months,
        rows: filter.days(today),
        sort,
        needle: query.q.clone().unwrap_or_default(),
        query: raw.unwrap_or_default(),
    };
    Html(render_attendance(&page))
}

pub async fn get_presets(State(state): State<AppState>) -> Json<Vec<PresetInfo>> {
    let today = state.today();
    let presets = Preset::ALL
        .into_iter()
        .map(|preset| {
            let (start, end) = preset.range(today);
            PresetInfo {
                name: preset.name().to_string(),
                label: preset.label().to_string(),
                start,
                end,
            }
        })
        .collect();
    Json(presets)
}

pub async fn get_range(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Json<RangeResponse> {
    let today = state.today();
    let filter = RangeFilter::resolve(&query, today);
    let selector = DateRangeSelector::new(today, Some(filter.start), Some(filter.end));
    Json(to_response(&selector, ToastQueue::new(), None))
}

pub async fn select_day(
    State(state): State<AppState>,
    Json(payload): Json<SelectDayRequest>,
) -> Json<RangeResponse> {
    let mut selector = selector_for(&state, payload.start, payload.end);
    let mut toasts = picker_toasts();

    if let Err(err) = selector.select_day(payload.date, &mut toasts) {
        warn!(date = %payload.date, "day selection rejected: {err}");
    }

    Json(to_response(&selector, toasts, None))
}

pub async fn apply_preset(
    State(state): State<AppState>,
    Json(payload): Json<PresetRequest>,
) -> Json<RangeResponse> {
    let mut selector = selector_for(&state, payload.start, payload.end);
    let mut toasts = picker_toasts();

    match selector.apply_preset(payload.preset.trim(), &mut toasts) {
        Some(preset) => info!(%preset, "preset applied"),
        None => debug!(preset = %payload.preset, "unknown preset ignored"),
    }

    Json(to_response(&selector, toasts, None))
}

pub async fn apply_custom_range(
    State(state): State<AppState>,
    Json(payload): Json<CustomRangeRequest>,
) -> Json<RangeResponse> {
    let mut selector = selector_for(&state, payload.start, payload.end);
    let mut toasts = picker_toasts();

    if let Err(err) =
        selector.apply_custom_range(&payload.custom_start, &payload.custom_end, &mut toasts)
    {
        warn!(
            start = %payload.custom_start,
            end = %payload.custom_end,
            "custom range rejected: {err}"
        );
    }

    Json(to_response(&selector, toasts, None))
}

pub async fn commit_range(
    State(state): State<AppState>,
    Json(payload): Json<CommitRequest>,
) -> Result<Json<RangeResponse>, AppError> {
    let path = page_path(payload.path.as_deref())?;
    let selector = selector_for(&state, payload.start, payload.end);
    let mut toasts = picker_toasts();
    let mut navigation = PendingNavigation::new();

    if let Err(err) = selector.commit(&mut navigation, &mut toasts) {
        warn!(
            start = ?payload.start,
            end = ?payload.end,
            "range commit rejected: {err}"
        );
    }
    let navigate_to = navigation.take().map(|target| {
        let url = target.url(path, payload.query.as_deref().unwrap_or_default());
        info!(%url, "range committed");
        url
    });

    Ok(Json(to_response(&selector, toasts, navigate_to)))
}

pub async fn navigate_month(
    State(state): State<AppState>,
    Json(payload): Json<MonthRequest>,
) -> Result<Json<RangeResponse>, AppError> {
    let path = page_path(payload.path.as_deref())?;
    if !(1..=12).contains(&payload.month) {
        return Err(AppError::bad_request("month must be between 1 and 12"));
    }

    let selector = selector_for(&state, payload.start, payload.end);
    let mut navigation = PendingNavigation::new();
    let target = selector
        .navigate_month(
            payload.year,
            payload.month,
            payload.direction,
            &mut navigation,
        )
        .ok_or_else(|| AppError::bad_request("calendar month is out of range"))?;
    let url = target.url(path, payload.query.as_deref().unwrap_or_default());
    debug!(%url, "calendar month changed");

    Ok(Json(to_response(&selector, ToastQueue::new(), Some(url))))
}

pub async fn get_calendar(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<MonthGrid>, AppError> {
    let selector = selector_for(
        &state,
        query.start_date.as_deref().and_then(parse_date),
        query.end_date.as_deref().and_then(parse_date),
    );
    month_grid(query.year, query.month, &selector)
        .map(Json)
        .ok_or_else(|| AppError::bad_request("month must be between 1 and 12"))
}

/// The picker's snapshot, taken as sent. Operations reject bad bounds.
fn selector_for(
    state: &AppState,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> DateRangeSelector {
    DateRangeSelector::from_snapshot(state.today(), start, end)
}

fn picker_toasts() -> ToastQueue {
    ToastQueue::with_duration(PICKER_DURATION_MS)
}

/// Only same-site absolute paths may be navigated to.
fn page_path(path: Option<&str>) -> Result<&str, AppError> {
    match path {
        None => Ok(ATTENDANCE_PATH),
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('?') => {
            Ok(path)
        }
        Some(_) => Err(AppError::bad_request("path must be a same-site absolute path")),
    }
}

fn to_response(
    selector: &DateRangeSelector,
    toasts: ToastQueue,
    navigate_to: Option<String>,
) -> RangeResponse {
    let snapshot = selector.snapshot();
    let preset = match (snapshot.start, snapshot.end) {
        (Some(start), Some(end)) => Preset::detect(start, end, selector.today()),
        _ => None,
    };
    RangeResponse {
        start: snapshot.start,
        end: snapshot.end,
        mode: snapshot.mode,
        state: selector.state(),
        days: selector.calculate_days(),
        display: selector.display_text(),
        today: selector.today(),
        preset,
        notices: toasts.into_toasts(),
        navigate_to,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_path_rejects_foreign_targets() {
        assert_eq!(page_path(None).unwrap(), ATTENDANCE_PATH);
        assert_eq!(page_path(Some("/reports")).unwrap(), "/reports");
        assert!(page_path(Some("https://example.com")).is_err());
        assert!(page_path(Some("//example.com")).is_err());
        assert!(page_path(Some("/attendance?x=1")).is_err());
    }
}
