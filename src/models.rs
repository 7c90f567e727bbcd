use crate::notify::Toast;
use crate::presets::Preset;
use crate::selector::{SelectionMode, SelectionState};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SelectDayRequest {
    #[serde(default)]
    pub start: Option<NaiveDate>,
    #[serde(default)]
    pub end: Option<NaiveDate>,
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct PresetRequest {
    #[serde(default)]
    pub start: Option<NaiveDate>,
    #[serde(default)]
    pub end: Option<NaiveDate>,
    pub preset: String,
}

/// Typed inputs arrive as raw strings; an absent field counts as empty.
#[derive(Debug, Deserialize)]
pub struct CustomRangeRequest {
    #[serde(default)]
    pub start: Option<NaiveDate>,
    #[serde(default)]
    pub end: Option<NaiveDate>,
    #[serde(default)]
    pub custom_start: String,
    #[serde(default)]
    pub custom_end: String,
}

#[derive(Debug, Deserialize)]
pub struct CommitRequest {
    #[serde(default)]
    pub start: Option<NaiveDate>,
    #[serde(default)]
    pub end: Option<NaiveDate>,
    /// Page to reload, `/attendance` when absent.
    #[serde(default)]
    pub path: Option<String>,
    /// Current query string of that page.
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MonthRequest {
    #[serde(default)]
    pub start: Option<NaiveDate>,
    #[serde(default)]
    pub end: Option<NaiveDate>,
    pub year: i32,
    pub month: u32,
    pub direction: i32,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub year: i32,
    pub month: u32,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RangeResponse {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub mode: SelectionMode,
    pub state: SelectionState,
    pub days: i64,
    pub display: String,
    pub today: NaiveDate,
    pub preset: Option<Preset>,
    pub notices: Vec<Toast>,
    pub navigate_to: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PresetInfo {
    pub name: String,
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}
