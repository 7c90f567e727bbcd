use chrono::{Datelike, Duration, NaiveDate};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` calendar date. Surrounding whitespace is ignored.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).ok()
}

pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// `Jan 5, 2024`
pub fn display_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn month_end(date: NaiveDate) -> NaiveDate {
    shift_month(date.year(), date.month(), 1)
        .and_then(|(year, month)| first_of(year, month))
        .map_or(date, |next| next - Duration::days(1))
}

pub fn first_of(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Moves a (year, month) pair by `delta` months, wrapping across years.
/// `None` when the result is not a month chrono can represent.
pub fn shift_month(year: i32, month: u32, delta: i32) -> Option<(i32, u32)> {
    let index = year
        .checked_mul(12)?
        .checked_add(i32::try_from(month).ok()?.checked_sub(1)?)?
        .checked_add(delta)?;
    let shifted = (index.div_euclid(12), index.rem_euclid(12) as u32 + 1);
    first_of(shifted.0, shifted.1).map(|_| shifted)
}

pub fn is_weekend(date: NaiveDate) -> bool {
    date.weekday().num_days_from_monday() >= 5
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_iso_dates_only() {
        assert_eq!(parse_date("2024-02-29"), Some(ymd(2024, 2, 29)));
        assert_eq!(parse_date(" 2024-01-07 "), Some(ymd(2024, 1, 7)));
        assert_eq!(parse_date("2023-02-29"), None);
        assert_eq!(parse_date("07/01/2024"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn display_format_has_no_padding() {
        assert_eq!(display_date(ymd(2024, 1, 5)), "Jan 5, 2024");
        assert_eq!(display_date(ymd(2023, 12, 31)), "Dec 31, 2023");
    }

    #[test]
    fn week_starts_on_monday() {
        // 2024-03-14 is a Thursday
        assert_eq!(week_start(ymd(2024, 3, 14)), ymd(2024, 3, 11));
        assert_eq!(week_start(ymd(2024, 3, 11)), ymd(2024, 3, 11));
        assert_eq!(week_start(ymd(2024, 3, 17)), ymd(2024, 3, 11));
    }

    #[test]
    fn month_bounds() {
        assert_eq!(month_start(ymd(2024, 2, 17)), ymd(2024, 2, 1));
        assert_eq!(month_end(ymd(2024, 2, 17)), ymd(2024, 2, 29));
        assert_eq!(month_end(ymd(2023, 12, 5)), ymd(2023, 12, 31));
    }

    #[test]
    fn shift_month_wraps_years() {
        assert_eq!(shift_month(2024, 1, -1), Some((2023, 12)));
        assert_eq!(shift_month(2024, 12, 1), Some((2025, 1)));
        assert_eq!(shift_month(2024, 5, -17), Some((2022, 12)));
    }

    #[test]
    fn shift_month_refuses_unrepresentable_months() {
        assert_eq!(shift_month(200_000_000, 1, 0), None);
        assert_eq!(shift_month(2024, 3, i32::MAX), None);
        assert_eq!(shift_month(2024, 3, i32::MIN), None);
        assert_eq!(shift_month(i32::MIN, 1, -1), None);
    }

    #[test]
    fn weekend_detection() {
        assert!(is_weekend(ymd(2024, 3, 16)));
        assert!(is_weekend(ymd(2024, 3, 17)));
        assert!(!is_weekend(ymd(2024, 3, 18)));
    }
}
