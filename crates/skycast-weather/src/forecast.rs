//! Daily and hourly forecast rows.

use serde::Serialize;

use crate::presenter::parse_timestamp;
use crate::types::{UnitPreference, WeatherSnapshot};
use crate::units::convert;

/// Number of hourly rows shown
pub const HOURLY_ENTRIES: usize = 8;

/// One day of the forecast, temperatures already converted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyEntry {
    pub weekday_label: String,
    pub max_temp: i64,
    pub min_temp: i64,
}

/// One hour of the forecast, temperature already converted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourlyEntry {
    pub hour_label: String,
    pub temp: i64,
}

/// One entry per day in the payload, in payload order.
///
/// Stops at the shortest of the aligned arrays.
pub fn render_daily(snapshot: &WeatherSnapshot, unit: UnitPreference) -> Vec<DailyEntry> {
    let Some(daily) = snapshot.daily.as_ref() else {
        return Vec::new();
    };

    daily
        .time
        .iter()
        .zip(&daily.temperature_2m_max)
        .zip(&daily.temperature_2m_min)
        .map(|((time, max), min)| DailyEntry {
            weekday_label: weekday_label(time),
            max_temp: convert(*max, unit),
            min_temp: convert(*min, unit),
        })
        .collect()
}

/// The first [`HOURLY_ENTRIES`] hours, or fewer when the payload is shorter.
pub fn render_hourly(snapshot: &WeatherSnapshot, unit: UnitPreference) -> Vec<HourlyEntry> {
    let Some(hourly) = snapshot.hourly.as_ref() else {
        return Vec::new();
    };

    hourly
        .time
        .iter()
        .zip(&hourly.temperature_2m)
        .take(HOURLY_ENTRIES)
        .map(|(time, temp)| HourlyEntry {
            hour_label: hour_label(time),
            temp: convert(*temp, unit),
        })
        .collect()
}

fn weekday_label(date: &str) -> String {
    parse_timestamp(date)
        .map(|d| d.format("%a").to_string())
        .unwrap_or_else(|| date.to_string())
}

fn hour_label(time: &str) -> String {
    parse_timestamp(time)
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| time.to_string())
}
