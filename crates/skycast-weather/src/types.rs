use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Temperature unit preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitPreference {
    #[default]
    Metric,
    Imperial,
}

/// Icon categories, selected from WMO weather codes by threshold bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherIcon {
    Sunny,
    PartlyCloudy,
    Fog,
    Rain,
    Snow,
    Storm,
}

impl WeatherIcon {
    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Sunny => "Sunny",
            Self::PartlyCloudy => "Partly Cloudy",
            Self::Fog => "Fog",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Storm => "Storm",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sunny => "sunny",
            Self::PartlyCloudy => "partly-cloudy",
            Self::Fog => "fog",
            Self::Rain => "rain",
            Self::Snow => "snow",
            Self::Storm => "storm",
        }
    }

    /// Asset path of the icon image
    pub fn asset(&self) -> String {
        format!("icons/{}.svg", self.name())
    }
}

/// A resolved place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// `current_weather` block of the forecast response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature: f64,
    pub windspeed: f64,
    pub weathercode: i32,
    pub time: String,
    #[serde(default)]
    pub winddirection: Option<f64>,
    #[serde(default)]
    pub is_day: Option<u8>,
}

/// Hourly series; all vectors are index-aligned with `time`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HourlySeries {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m: Vec<f64>,
    #[serde(default)]
    pub relativehumidity_2m: Vec<f64>,
    #[serde(default)]
    pub precipitation: Vec<f64>,
    #[serde(default)]
    pub apparent_temperature: Vec<f64>,
}

/// Daily series; all vectors are index-aligned with `time`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailySeries {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m_max: Vec<f64>,
    #[serde(default)]
    pub temperature_2m_min: Vec<f64>,
}

/// One complete forecast payload.
///
/// Fields the renderers do not read are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub current_weather: CurrentWeather,
    #[serde(default)]
    pub hourly: Option<HourlySeries>,
    #[serde(default)]
    pub daily: Option<DailySeries>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl WeatherSnapshot {
    /// Index into the hourly series matching the current-conditions time.
    ///
    /// Falls back to the first entry when the time is not in the series.
    pub fn current_hour_index(&self) -> usize {
        self.hourly
            .as_ref()
            .and_then(|h| h.time.iter().position(|t| *t == self.current_weather.time))
            .unwrap_or(0)
    }
}

/// Weather client errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("No location found for \"{query}\"")]
    NotFound { query: String },
    #[error("Weather data unavailable: {0}")]
    Unavailable(String),
    #[error("Request to {url} failed with status {status}")]
    Status { status: u16, url: String },
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
