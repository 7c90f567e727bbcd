use crate::dates::shift_month;
use url::form_urlencoded;

pub const START_PARAM: &str = "start_date";
pub const END_PARAM: &str = "end_date";
pub const CALENDAR_MONTH_PARAM: &str = "calendar_month";
pub const CALENDAR_YEAR_PARAM: &str = "calendar_year";

/// Query changes to apply to the current page before navigating to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationTarget {
    pub set: Vec<(String, String)>,
    pub remove: Vec<String>,
}

impl NavigationTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.set.iter_mut().find(|(existing, _)| existing == key) {
            Some(entry) => entry.1 = value,
            None => self.set.push((key.to_string(), value)),
        }
        self
    }

    pub fn remove(mut self, key: &str) -> Self {
        if !self.remove.iter().any(|existing| existing == key) {
            self.remove.push(key.to_string());
        }
        self
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.set
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    /// Rewrites `query` (without the leading `?`): a set key replaces its first
    /// occurrence in place and drops any repeats, keys not yet present are
    /// appended, removed keys disappear.
    pub fn apply_to_query(&self, query: &str) -> String {
        let mut emitted: Vec<&str> = Vec::new();
        let mut serializer = form_urlencoded::Serializer::new(String::new());

        for (key, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            if self.remove.iter().any(|removed| *removed == key) {
                continue;
            }
            match self.set.iter().find(|(set_key, _)| *set_key == key) {
                Some((set_key, set_value)) => {
                    if !emitted.contains(&set_key.as_str()) {
                        serializer.append_pair(set_key, set_value);
                        emitted.push(set_key);
                    }
                }
                None => {
                    serializer.append_pair(&key, &value);
                }
            }
        }

        for (key, value) in &self.set {
            if !emitted.contains(&key.as_str()) && !self.remove.contains(key) {
                serializer.append_pair(key, value);
            }
        }

        serializer.finish()
    }

    pub fn url(&self, path: &str, query: &str) -> String {
        let query = self.apply_to_query(query);
        if query.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{query}")
        }
    }
}

/// Points the calendar at the month `delta` months away from `year`/`month`.
pub fn shift_month_target(year: i32, month: u32, delta: i32) -> Option<NavigationTarget> {
    let (year, month) = shift_month(year, month, delta)?;
    Some(
        NavigationTarget::new()
            .set(CALENDAR_MONTH_PARAM, month.to_string())
            .set(CALENDAR_YEAR_PARAM, year.to_string()),
    )
}

/// Receives the page change requested by a committed interaction.
pub trait Navigator {
    fn navigate(&mut self, target: NavigationTarget);
}

/// Keeps the most recent navigation request.
#[derive(Debug, Default)]
pub struct PendingNavigation {
    target: Option<NavigationTarget>,
}

impl PendingNavigation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands over the requested target, leaving nothing pending.
    pub fn take(&mut self) -> Option<NavigationTarget> {
        self.target.take()
    }
}

#[cfg(test)]
impl PendingNavigation {
    pub fn target(&self) -> Option<&NavigationTarget> {
        self.target.as_ref()
    }
}

impl Navigator for PendingNavigation {
    fn navigate(&mut self, target: NavigationTarget) {
        self.target = Some(target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range_target() -> NavigationTarget {
        NavigationTarget::new()
            .set(START_PARAM, "2024-01-01")
            .set(END_PARAM, "2024-01-07")
            .remove(CALENDAR_MONTH_PARAM)
            .remove(CALENDAR_YEAR_PARAM)
    }

    #[test]
    fn replaces_in_place_and_drops_stale_params() {
        let query = "start_date=2023-12-01&calendar_month=2&view=grid&calendar_year=2024&end_date=2023-12-31";
        assert_eq!(
            range_target().apply_to_query(query),
            "start_date=2024-01-01&view=grid&end_date=2024-01-07"
        );
    }

    #[test]
    fn appends_missing_params() {
        assert_eq!(
            range_target().url("/attendance", ""),
            "/attendance?start_date=2024-01-01&end_date=2024-01-07"
        );
        assert_eq!(
            range_target().url("/attendance", "?q=ann+lee"),
            "/attendance?q=ann+lee&start_date=2024-01-01&end_date=2024-01-07"
        );
    }

    #[test]
    fn repeated_keys_collapse() {
        let target = NavigationTarget::new().set(START_PARAM, "2024-02-01");
        assert_eq!(
            target.apply_to_query("start_date=a&start_date=b&x=1"),
            "start_date=2024-02-01&x=1"
        );
    }

    #[test]
    fn empty_target_leaves_path_bare() {
        assert_eq!(NavigationTarget::new().url("/attendance", ""), "/attendance");
    }

    #[test]
    fn pending_navigation_keeps_last_target() {
        let mut pending = PendingNavigation::new();
        pending.navigate(NavigationTarget::new().set("a", "1"));
        pending.navigate(range_target());
        assert_eq!(pending.target().and_then(|t| t.value(END_PARAM)), Some("2024-01-07"));
        assert!(pending.take().is_some());
        assert!(pending.target().is_none());
    }
}
