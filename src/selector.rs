//! The attendance page's date range picker.
//!
//! A selector owns an optional `start`/`end` pair bounded above by `today`.
//! Clicking days walks a small state machine (nothing selected, start only,
//! complete); presets and typed ranges jump straight to a complete range.
//! Rejected interactions leave the range untouched and surface a notice
//! through the caller's [`Notifier`].

use crate::dates::{date_key, display_date, parse_date};
use crate::errors::ValidationError;
use crate::navigation::{
    CALENDAR_MONTH_PARAM, CALENDAR_YEAR_PARAM, END_PARAM, NavigationTarget, Navigator, START_PARAM,
    shift_month_target,
};
use crate::notify::{Level, Notifier};
use crate::presets::Preset;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which bound the next day click sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    AwaitingStart,
    AwaitingEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionState {
    NoSelection,
    StartOnly,
    Complete,
}

/// How a calendar day should be drawn for the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    Past,
    Today,
    InRange,
    RangeStart,
    RangeEnd,
    FutureDisabled,
}

impl DayStatus {
    pub fn is_selectable(self) -> bool {
        self != DayStatus::FutureDisabled
    }

    /// Whether the day belongs to the selected range.
    pub fn is_highlighted(self) -> bool {
        matches!(
            self,
            DayStatus::InRange | DayStatus::RangeStart | DayStatus::RangeEnd
        )
    }

    pub fn css_class(self) -> &'static str {
        match self {
            DayStatus::Past => "day-past",
            DayStatus::Today => "day-today",
            DayStatus::InRange => "day-in-range",
            DayStatus::RangeStart => "day-range-start",
            DayStatus::RangeEnd => "day-range-end",
            DayStatus::FutureDisabled => "day-future",
        }
    }
}

/// Read-only view handed to the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RangeSnapshot {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub mode: SelectionMode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRangeSelector {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    today: NaiveDate,
}

impl DateRangeSelector {
    /// Builds a selector from the page's current filter. An end without a
    /// start is dropped, an inverted pair is swapped and dates after `today`
    /// are pulled back to `today`.
    pub fn new(today: NaiveDate, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        let clamp = |date: NaiveDate| date.min(today);
        let (start, end) = match (start.map(clamp), end.map(clamp)) {
            (Some(start), Some(end)) if start > end => (Some(end), Some(start)),
            (Some(start), end) => (Some(start), end),
            (None, _) => (None, None),
        };
        Self { start, end, today }
    }

    /// Rebuilds a selector from a snapshot the picker sent back, exactly as
    /// sent. Out-of-order or future bounds are left for the operations to
    /// reject.
    pub fn from_snapshot(
        today: NaiveDate,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Self {
        Self { start, end, today }
    }

    pub fn empty(today: NaiveDate) -> Self {
        Self::new(today, None, None)
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn mode(&self) -> SelectionMode {
        match (self.start, self.end) {
            (Some(_), None) => SelectionMode::AwaitingEnd,
            _ => SelectionMode::AwaitingStart,
        }
    }

    pub fn state(&self) -> SelectionState {
        match (self.start, self.end) {
            (None, _) => SelectionState::NoSelection,
            (Some(_), None) => SelectionState::StartOnly,
            (Some(_), Some(_)) => SelectionState::Complete,
        }
    }

    pub fn snapshot(&self) -> RangeSnapshot {
        RangeSnapshot {
            start: self.start,
            end: self.end,
            mode: self.mode(),
        }
    }

    /// Click on a calendar day. A day before the current start (or any day
    /// when nothing is selected) begins a new range; otherwise it closes it.
    pub fn select_day(
        &mut self,
        date: NaiveDate,
        notifier: &mut impl Notifier,
    ) -> Result<SelectionState, ValidationError> {
        if date > self.today {
            return Err(reject(ValidationError::FutureDay, notifier));
        }

        match self.start {
            Some(start) if date >= start => {
                self.end = Some(date);
                notifier.notify(
                    &format!(
                        "Date range selected: {} - {}",
                        display_date(start),
                        display_date(date)
                    ),
                    Level::Success,
                );
            }
            _ => {
                self.start = Some(date);
                self.end = None;
                notifier.notify(
                    &format!(
                        "Start date selected: {}. Select end date.",
                        display_date(date)
                    ),
                    Level::Info,
                );
            }
        }

        debug!(date = %date, state = ?self.state(), "day selected");
        Ok(self.state())
    }

    /// Applies a named preset. Unknown names change nothing and return `None`.
    pub fn apply_preset(&mut self, name: &str, notifier: &mut impl Notifier) -> Option<Preset> {
        let preset = name.parse::<Preset>().ok()?;
        let (start, end) = preset.range(self.today);
        self.start = Some(start);
        self.end = Some(end);
        notifier.notify(&format!("Applied preset: {preset}"), Level::Success);
        debug!(%preset, %start, %end, "preset applied");
        Some(preset)
    }

    /// Applies a typed `YYYY-MM-DD` pair.
    pub fn apply_custom_range(
        &mut self,
        start_input: &str,
        end_input: &str,
        notifier: &mut impl Notifier,
    ) -> Result<(NaiveDate, NaiveDate), ValidationError> {
        if start_input.trim().is_empty() || end_input.trim().is_empty() {
            return Err(reject(ValidationError::MissingInput, notifier));
        }
        let (Some(start), Some(end)) = (parse_date(start_input), parse_date(end_input)) else {
            return Err(reject(ValidationError::MalformedDate, notifier));
        };
        if let Err(err) = self.check_bounds(start, end) {
            return Err(reject(err, notifier));
        }

        self.start = Some(start);
        self.end = Some(end);
        notifier.notify("Custom range applied", Level::Success);
        Ok((start, end))
    }

    /// Requests navigation to the current page filtered by the selected range.
    /// Any month the calendar was scrolled to is forgotten.
    pub fn commit(
        &self,
        navigator: &mut impl Navigator,
        notifier: &mut impl Notifier,
    ) -> Result<NavigationTarget, ValidationError> {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return Err(reject(ValidationError::IncompleteRange, notifier));
        };
        if let Err(err) = self.check_bounds(start, end) {
            return Err(reject(err, notifier));
        }

        let target = NavigationTarget::new()
            .set(START_PARAM, date_key(start))
            .set(END_PARAM, date_key(end))
            .remove(CALENDAR_MONTH_PARAM)
            .remove(CALENDAR_YEAR_PARAM);
        notifier.notify("Loading attendance records...", Level::Info);
        navigator.navigate(target.clone());
        Ok(target)
    }

    /// Inclusive day count, 0 unless both bounds are set.
    pub fn calculate_days(&self) -> i64 {
        match (self.start, self.end) {
            (Some(start), Some(end)) => (end - start).num_days().abs() + 1,
            _ => 0,
        }
    }

    pub fn day_status(&self, date: NaiveDate) -> DayStatus {
        if date > self.today {
            return DayStatus::FutureDisabled;
        }
        match (self.start, self.end) {
            (Some(start), _) if date == start => return DayStatus::RangeStart,
            (Some(_), Some(end)) if date == end => return DayStatus::RangeEnd,
            (Some(start), Some(end)) if start < date && date < end => return DayStatus::InRange,
            _ => {}
        }
        if date == self.today {
            DayStatus::Today
        } else {
            DayStatus::Past
        }
    }

    /// Text for the selected-range banner.
    pub fn display_text(&self) -> String {
        match (self.start, self.end) {
            (Some(start), Some(end)) => {
                let days = self.calculate_days();
                let unit = if days == 1 { "day" } else { "days" };
                format!(
                    "{} → {} ({days} {unit})",
                    display_date(start),
                    display_date(end)
                )
            }
            (Some(start), None) => format!("{} · Select end date...", display_date(start)),
            (None, _) => String::new(),
        }
    }

    /// Scrolls the visible calendar by `direction` months from `year`/`month`,
    /// keeping whatever part of the range is selected. `None` when the
    /// resulting month is not representable; nothing is navigated then.
    pub fn navigate_month(
        &self,
        year: i32,
        month: u32,
        direction: i32,
        navigator: &mut impl Navigator,
    ) -> Option<NavigationTarget> {
        let mut target = shift_month_target(year, month, direction)?;
        if let Some(start) = self.start {
            target = target.set(START_PARAM, date_key(start));
        }
        if let Some(end) = self.end {
            target = target.set(END_PARAM, date_key(end));
        }
        navigator.navigate(target.clone());
        Some(target)
    }

    fn check_bounds(&self, start: NaiveDate, end: NaiveDate) -> Result<(), ValidationError> {
        if start > end {
            return Err(ValidationError::RangeInverted);
        }
        if end > self.today {
            return Err(ValidationError::FutureDate);
        }
        Ok(())
    }
}

fn reject(err: ValidationError, notifier: &mut impl Notifier) -> ValidationError {
    debug!(code = err.code(), "range interaction rejected");
    notifier.notify(&err.to_string(), err.level());
    err
}
