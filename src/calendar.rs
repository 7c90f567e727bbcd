use crate::dates::{first_of, is_weekend, month_end, shift_month};
use crate::selector::{DateRangeSelector, DayStatus};
use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Clone, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub day: u32,
    pub status: DayStatus,
    pub is_today: bool,
    pub is_weekend: bool,
}

/// One month laid out in Monday-first weeks; cells outside the month are `None`.
#[derive(Debug, Clone, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub name: &'static str,
    pub weeks: Vec<Vec<Option<CalendarDay>>>,
}

impl MonthGrid {
    pub fn title(&self) -> String {
        format!("{} {}", self.name, self.year)
    }

    pub fn days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.weeks.iter().flatten().flatten()
    }
}

pub fn month_grid(year: i32, month: u32, selector: &DateRangeSelector) -> Option<MonthGrid> {
    let first = first_of(year, month)?;
    let last = month_end(first);

    let mut weeks = Vec::new();
    let mut week: Vec<Option<CalendarDay>> =
        vec![None; first.weekday().num_days_from_monday() as usize];

    let mut date = first;
    while date <= last {
        week.push(Some(CalendarDay {
            date,
            day: date.day(),
            status: selector.day_status(date),
            is_today: date == selector.today(),
            is_weekend: is_weekend(date),
        }));
        if week.len() == 7 {
            weeks.push(std::mem::take(&mut week));
        }
        date += Duration::days(1);
    }
    if !week.is_empty() {
        week.resize(7, None);
        weeks.push(week);
    }

    Some(MonthGrid {
        year,
        month,
        name: MONTH_NAMES[month as usize - 1],
        weeks,
    })
}

/// The focused month (an explicit calendar month when valid, otherwise the
/// month of `anchor`) preceded by the month before it.
pub fn visible_months(
    selector: &DateRangeSelector,
    anchor: NaiveDate,
    calendar_month: Option<u32>,
    calendar_year: Option<i32>,
) -> Vec<MonthGrid> {
    let (year, month) = match (calendar_year, calendar_month) {
        (Some(year), Some(month)) if first_of(year, month).is_some() => (year, month),
        _ => (anchor.year(), anchor.month()),
    };
    shift_month(year, month, -1)
        .into_iter()
        .chain([(year, month)])
        .filter_map(|(year, month)| month_grid(year, month, selector))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn grid_pads_to_monday_first_weeks() {
        let selector = DateRangeSelector::empty(ymd(2024, 3, 14));
        // March 2024 starts on a Friday and ends on a Sunday.
        let grid = month_grid(2024, 3, &selector).unwrap();

        assert_eq!(grid.title(), "March 2024");
        assert_eq!(grid.weeks.len(), 5);
        assert!(grid.weeks.iter().all(|week| week.len() == 7));
        assert!(grid.weeks[0][..4].iter().all(Option::is_none));
        assert_eq!(grid.weeks[0][4].as_ref().map(|d| d.day), Some(1));
        assert_eq!(grid.weeks[4][6].as_ref().map(|d| d.day), Some(31));
        assert_eq!(grid.days().count(), 31);
    }

    #[test]
    fn trailing_cells_are_empty() {
        let selector = DateRangeSelector::empty(ymd(2024, 3, 14));
        // February 2024 ends on a Thursday.
        let grid = month_grid(2024, 2, &selector).unwrap();
        let last_week = grid.weeks.last().unwrap();
        assert_eq!(last_week[3].as_ref().map(|d| d.day), Some(29));
        assert!(last_week[4..].iter().all(Option::is_none));
    }

    #[test]
    fn cells_carry_selection_status() {
        let today = ymd(2024, 3, 14);
        let selector = DateRangeSelector::new(today, Some(ymd(2024, 3, 4)), Some(ymd(2024, 3, 6)));
        let grid = month_grid(2024, 3, &selector).unwrap();
        let status = |day: u32| grid.days().find(|d| d.day == day).map(|d| d.status);

        assert_eq!(status(4), Some(DayStatus::RangeStart));
        assert_eq!(status(5), Some(DayStatus::InRange));
        assert_eq!(status(6), Some(DayStatus::RangeEnd));
        assert_eq!(status(14), Some(DayStatus::Today));
        assert_eq!(status(20), Some(DayStatus::FutureDisabled));
        assert!(grid.days().find(|d| d.day == 16).is_some_and(|d| d.is_weekend));
    }

    #[test]
    fn visible_months_follow_anchor_or_override() {
        let selector = DateRangeSelector::empty(ymd(2024, 3, 14));

        let months = visible_months(&selector, ymd(2024, 1, 20), None, None);
        let shown: Vec<_> = months.iter().map(|m| (m.year, m.month)).collect();
        assert_eq!(shown, vec![(2023, 12), (2024, 1)]);

        let months = visible_months(&selector, ymd(2024, 1, 20), Some(6), Some(2023));
        let shown: Vec<_> = months.iter().map(|m| (m.year, m.month)).collect();
        assert_eq!(shown, vec![(2023, 5), (2023, 6)]);

        let months = visible_months(&selector, ymd(2024, 1, 20), Some(13), Some(2023));
        assert_eq!(months[1].month, 1);
    }

    #[test]
    fn invalid_month_has_no_grid() {
        let selector = DateRangeSelector::empty(ymd(2024, 3, 14));
        assert!(month_grid(2024, 0, &selector).is_none());
        assert!(month_grid(2024, 13, &selector).is_none());
    }
}
