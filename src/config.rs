use crate::dates::parse_date;
use chrono::NaiveDate;
use std::env;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    /// Replaces the local calendar date when set.
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value for {key}: {value:?}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let today = match lookup("APP_TODAY") {
            Some(value) if !value.trim().is_empty() => Some(parse_date(&value).ok_or(ConfigError {
                key: "APP_TODAY",
                value,
            })?),
            _ => None,
        };

        Ok(Self { port, today })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.today, None);
    }

    #[test]
    fn reads_port_and_fixed_today() {
        let config =
            Config::from_lookup(lookup(&[("PORT", "9001"), ("APP_TODAY", "2024-03-14")])).unwrap();
        assert_eq!(config.port, 9001);
        assert_eq!(config.today, NaiveDate::from_ymd_opt(2024, 3, 14));
    }

    #[test]
    fn bad_port_falls_back_but_bad_today_fails() {
        let config = Config::from_lookup(lookup(&[("PORT", "http")])).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);

        let err = Config::from_lookup(lookup(&[("APP_TODAY", "14/03/2024")])).unwrap_err();
        assert_eq!(err.key, "APP_TODAY");
    }
}
