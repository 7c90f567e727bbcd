use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub const NO_MATCHES: &str = "No matching records found";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        }
    }
}

pub const UNSORTED_INDICATOR: &str = "↕";

/// Which column of a table is sorted, and which way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState {
    pub column: Option<usize>,
    pub direction: Option<SortDirection>,
}

impl SortState {
    pub fn new(column: usize, direction: SortDirection) -> Self {
        Self {
            column: Some(column),
            direction: Some(direction),
        }
    }

    /// A header click sorts ascending unless that column already is.
    pub fn toggle(&mut self, column: usize) -> SortDirection {
        let direction = match (self.column, self.direction) {
            (Some(current), Some(SortDirection::Asc)) if current == column => SortDirection::Desc,
            _ => SortDirection::Asc,
        };
        *self = Self::new(column, direction);
        direction
    }

    pub fn indicator(&self, column: usize) -> &'static str {
        match (self.column, self.direction) {
            (Some(current), Some(direction)) if current == column => direction.indicator(),
            _ => UNSORTED_INDICATOR,
        }
    }

    /// Query value for the header link that clicking `column` would produce.
    pub fn next_for(&self, column: usize) -> SortDirection {
        let mut next = *self;
        next.toggle(column)
    }
}

/// Numeric comparison when both cells read as numbers once everything but
/// digits, `.` and `-` is stripped; plain string comparison otherwise.
pub fn compare_cells(a: &str, b: &str) -> Ordering {
    match (numeric_value(a), numeric_value(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => a.cmp(b),
    }
}

fn numeric_value(cell: &str) -> Option<f64> {
    let digits: String = cell
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    digits.parse().ok()
}

/// Stable sort of `rows` by `column`. Missing cells compare as empty.
pub fn sort_rows<R: AsRef<[String]>>(rows: &mut [R], column: usize, direction: SortDirection) {
    rows.sort_by(|a, b| {
        let (a, b): (&[String], &[String]) = (a.as_ref(), b.as_ref());
        let a = a.get(column).map(String::as_str).unwrap_or("");
        let b = b.get(column).map(String::as_str).unwrap_or("");
        let ordering = compare_cells(a.trim(), b.trim());
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

/// Indices of rows whose text contains `needle`, ignoring case.
pub fn filter_rows<R: AsRef<[String]>>(rows: &[R], needle: &str) -> Vec<usize> {
    let needle = needle.trim().to_lowercase();
    rows.iter()
        .enumerate()
        .filter(|(_, row)| {
            let cells: &[String] = (*row).as_ref();
            needle.is_empty() || cells.join(" ").to_lowercase().contains(&needle)
        })
        .map(|(index, _)| index)
        .collect()
}
