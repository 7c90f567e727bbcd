use crate::dates::{is_weekend, month_start, parse_date};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Raw query of the attendance page. Values stay as strings so a malformed
/// parameter falls back to its default instead of failing the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub calendar_month: Option<String>,
    pub calendar_year: Option<String>,
    pub sort: Option<String>,
    pub dir: Option<String>,
    pub q: Option<String>,
}

impl FilterQuery {
    pub fn calendar_month(&self) -> Option<u32> {
        self.calendar_month.as_deref()?.trim().parse().ok()
    }

    pub fn calendar_year(&self) -> Option<i32> {
        self.calendar_year.as_deref()?.trim().parse().ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RangeFilter {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl RangeFilter {
    /// Missing or unreadable bounds default to the first of the current month
    /// and today; an inverted pair is swapped.
    pub fn resolve(query: &FilterQuery, today: NaiveDate) -> Self {
        let start = query
            .start_date
            .as_deref()
            .and_then(parse_date)
            .unwrap_or_else(|| month_start(today));
        let end = query
            .end_date
            .as_deref()
            .and_then(parse_date)
            .unwrap_or(today);

        if start > end {
            Self { start: end, end: start }
        } else {
            Self { start, end }
        }
    }

    pub fn days(&self, today: NaiveDate) -> Vec<DayRow> {
        let count = (self.end - self.start).num_days() + 1;
        (0..count)
            .map(|offset| {
                let date = self.start + Duration::days(offset);
                DayRow {
                    date,
                    weekday: date.format("%A").to_string(),
                    is_today: date == today,
                    is_weekend: is_weekend(date),
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DayRow {
    pub date: NaiveDate,
    pub weekday: String,
    pub is_today: bool,
    pub is_weekend: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn query(start: Option<&str>, end: Option<&str>) -> FilterQuery {
        FilterQuery {
            start_date: start.map(str::to_string),
            end_date: end.map(str::to_string),
            ..FilterQuery::default()
        }
    }

    #[test]
    fn defaults_to_month_to_date() {
        let today = ymd(2024, 3, 14);
        let filter = RangeFilter::resolve(&FilterQuery::default(), today);
        assert_eq!(filter, RangeFilter { start: ymd(2024, 3, 1), end: today });

        let filter = RangeFilter::resolve(&query(Some("garbage"), Some("2024-13-01")), today);
        assert_eq!(filter, RangeFilter { start: ymd(2024, 3, 1), end: today });
    }

    #[test]
    fn inverted_bounds_are_swapped() {
        let filter = RangeFilter::resolve(
            &query(Some("2024-03-10"), Some("2024-03-02")),
            ymd(2024, 3, 14),
        );
        assert_eq!(filter.start, ymd(2024, 3, 2));
        assert_eq!(filter.end, ymd(2024, 3, 10));
    }

    #[test]
    fn day_rows_cover_range_inclusively() {
        let today = ymd(2024, 3, 14);
        let filter = RangeFilter { start: ymd(2024, 3, 11), end: today };
        let rows = filter.days(today);

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].weekday, "Monday");
        assert!(rows[3].is_today);
        assert!(rows.iter().all(|row| !row.is_weekend));
    }

    #[test]
    fn calendar_params_parse_leniently() {
        let query = FilterQuery {
            calendar_month: Some(" 7".to_string()),
            calendar_year: Some("twenty".to_string()),
            ..FilterQuery::default()
        };
        assert_eq!(query.calendar_month(), Some(7));
        assert_eq!(query.calendar_year(), None);
    }
}
