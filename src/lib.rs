pub mod app;
pub mod calendar;
pub mod config;
pub mod dates;
pub mod errors;
pub mod filter;
pub mod handlers;
pub mod models;
pub mod navigation;
pub mod notify;
pub mod presets;
pub mod selector;
pub mod state;
pub mod table;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use selector::{DateRangeSelector, DayStatus, RangeSnapshot, SelectionMode, SelectionState};
pub use state::AppState;
