use crate::dates::{month_start, week_start};
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Named ranges relative to `today`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Today,
    Yesterday,
    Last7Days,
    Last30Days,
    Last90Days,
    ThisWeek,
    LastWeek,
    ThisMonth,
    LastMonth,
    ThisYear,
    LastYear,
}

impl Preset {
    pub const ALL: [Preset; 11] = [
        Preset::Today,
        Preset::Yesterday,
        Preset::Last7Days,
        Preset::Last30Days,
        Preset::Last90Days,
        Preset::ThisWeek,
        Preset::LastWeek,
        Preset::ThisMonth,
        Preset::LastMonth,
        Preset::ThisYear,
        Preset::LastYear,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Today => "today",
            Preset::Yesterday => "yesterday",
            Preset::Last7Days => "last7days",
            Preset::Last30Days => "last30days",
            Preset::Last90Days => "last90days",
            Preset::ThisWeek => "thisweek",
            Preset::LastWeek => "lastweek",
            Preset::ThisMonth => "thismonth",
            Preset::LastMonth => "lastmonth",
            Preset::ThisYear => "thisyear",
            Preset::LastYear => "lastyear",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Preset::Today => "Today",
            Preset::Yesterday => "Yesterday",
            Preset::Last7Days => "Last 7 Days",
            Preset::Last30Days => "Last 30 Days",
            Preset::Last90Days => "Last 90 Days",
            Preset::ThisWeek => "This Week",
            Preset::LastWeek => "Last Week",
            Preset::ThisMonth => "This Month",
            Preset::LastMonth => "Last Month",
            Preset::ThisYear => "This Year",
            Preset::LastYear => "Last Year",
        }
    }

    /// Inclusive `(start, end)` for this preset. Never ends after `today`.
    pub fn range(self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            Preset::Today => (today, today),
            Preset::Yesterday => {
                let day = today - Duration::days(1);
                (day, day)
            }
            Preset::Last7Days => (today - Duration::days(6), today),
            Preset::Last30Days => (today - Duration::days(29), today),
            Preset::Last90Days => (today - Duration::days(89), today),
            Preset::ThisWeek => (week_start(today), today),
            Preset::LastWeek => {
                let end = week_start(today) - Duration::days(1);
                (end - Duration::days(6), end)
            }
            Preset::ThisMonth => (month_start(today), today),
            Preset::LastMonth => {
                let end = month_start(today) - Duration::days(1);
                (month_start(end), end)
            }
            Preset::ThisYear => (year_start(today.year()).unwrap_or(today), today),
            Preset::LastYear => {
                let end = year_start(today.year()).map_or(today, |start| start - Duration::days(1));
                (year_start(end.year()).unwrap_or(end), end)
            }
        }
    }

    /// First preset, in display order, whose range equals `(start, end)`.
    pub fn detect(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> Option<Preset> {
        Preset::ALL
            .into_iter()
            .find(|preset| preset.range(today) == (start, end))
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPreset(pub String);

impl FromStr for Preset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|preset| preset.name() == s)
            .ok_or_else(|| UnknownPreset(s.to_string()))
    }
}

fn year_start(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)
}
