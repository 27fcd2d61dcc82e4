use crate::types::{CurrentWeather, DailySeries, HourlySeries, WeatherError, WeatherSnapshot};
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;

const HOURLY_FIELDS: &str = "temperature_2m,relativehumidity_2m,precipitation,apparent_temperature";
const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min";

/// Forecast payload before the current-weather section is checked
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    current_weather: Option<CurrentWeather>,
    #[serde(default)]
    hourly: Option<HourlySeries>,
    #[serde(default)]
    daily: Option<DailySeries>,
    #[serde(flatten)]
    extra: BTreeMap<String, serde_json::Value>,
}

impl TryFrom<ForecastResponse> for WeatherSnapshot {
    type Error = WeatherError;

    fn try_from(response: ForecastResponse) -> Result<Self, Self::Error> {
        let current_weather = response.current_weather.ok_or_else(|| {
            WeatherError::Unavailable("response has no current_weather section".to_string())
        })?;

        Ok(Self {
            current_weather,
            hourly: response.hourly,
            daily: response.daily,
            extra: response.extra,
        })
    }
}

/// Open-Meteo forecast client
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: Url,
}

impl WeatherClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, WeatherError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: Url::parse(base_url)?,
        })
    }

    /// Fetch current conditions plus hourly and daily series.
    ///
    /// Coordinates are passed through unchecked.
    pub async fn fetch_weather(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherSnapshot, WeatherError> {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("latitude", &latitude.to_string())
            .append_pair("longitude", &longitude.to_string())
            .append_pair("current_weather", "true")
            .append_pair("hourly", HOURLY_FIELDS)
            .append_pair("daily", DAILY_FIELDS)
            .append_pair("timezone", "auto");

        tracing::debug!("Fetching weather for {}, {}", latitude, longitude);

        let response = self.client.get(url.clone()).send().await?;

        if !response.status().is_success() {
            tracing::warn!("Forecast returned status {}", response.status());
            return Err(WeatherError::Status {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        let body: ForecastResponse = response.json().await?;
        let snapshot = WeatherSnapshot::try_from(body)?;

        tracing::info!(
            "Weather fetched: {}° code {} at {}",
            snapshot.current_weather.temperature,
            snapshot.current_weather.weathercode,
            snapshot.current_weather.time
        );
        Ok(snapshot)
    }
}
