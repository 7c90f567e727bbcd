use crate::config::Config;
use chrono::{Local, NaiveDate};

#[derive(Clone)]
pub struct AppState {
    fixed_today: Option<NaiveDate>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            fixed_today: config.today,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.fixed_today
            .unwrap_or_else(|| Local::now().date_naive())
    }
}
