//! Weather lookup for Skycast
//!
//! Resolves place names and fetches forecasts from the Open-Meteo APIs, and
//! turns the raw payload into display strings and forecast rows.

pub mod forecast;
pub mod geocode;
pub mod presenter;
pub mod provider;
pub mod types;
pub mod units;

pub use forecast::{render_daily, render_hourly, DailyEntry, HourlyEntry, HOURLY_ENTRIES};
pub use geocode::GeocodeClient;
pub use presenter::{
    city_line, condition_stats, format_date, select_icon, temperature_line, ConditionStats,
};
pub use provider::WeatherClient;
pub use types::*;
pub use units::convert;
