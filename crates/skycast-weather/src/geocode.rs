//! Forward geocoding: convert a place name to coordinates.
//! Uses the Open-Meteo geocoding API - free, no API key required.

use crate::types::{Location, WeatherError};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!("skycast/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Option<Vec<GeocodeMatch>>,
}

#[derive(Debug, Deserialize)]
struct GeocodeMatch {
    name: String,
    #[serde(default)]
    country: Option<String>,
    latitude: f64,
    longitude: f64,
}

impl From<GeocodeMatch> for Location {
    fn from(m: GeocodeMatch) -> Self {
        Self {
            name: m.name,
            country: m.country.unwrap_or_default(),
            latitude: m.latitude,
            longitude: m.longitude,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeocodeClient {
    client: Client,
    base_url: Url,
}

impl GeocodeClient {
    /// Create a client for the geocoding endpoint at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: Url::parse(base_url)?,
        })
    }

    /// Resolve a place name to its best-ranked match.
    ///
    /// The caller is expected to pass a trimmed, non-empty query.
    pub async fn resolve(&self, query: &str) -> Result<Location, WeatherError> {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("name", query)
            .append_pair("count", "1");

        tracing::debug!("Geocoding \"{}\"", query);

        let response = self.client.get(url.clone()).send().await?;

        if !response.status().is_success() {
            tracing::warn!("Geocoding returned status {}", response.status());
            return Err(WeatherError::Status {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        let body: GeocodeResponse = response.json().await?;

        let location: Location = body
            .results
            .and_then(|results| results.into_iter().next())
            .map(Location::from)
            .ok_or_else(|| WeatherError::NotFound {
                query: query.to_string(),
            })?;

        tracing::info!(
            "Geocoded \"{}\" to {}, {} ({}, {})",
            query,
            location.name,
            location.country,
            location.latitude,
            location.longitude
        );
        Ok(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_without_country() {
        let m: GeocodeMatch = serde_json::from_value(serde_json::json!({
            "name": "Null Island",
            "latitude": 0.0,
            "longitude": 0.0
        }))
        .unwrap();
        let location = Location::from(m);
        assert_eq!(location.country, "");
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let result = GeocodeClient::new("not a url", Duration::from_secs(1));
        assert!(matches!(result, Err(WeatherError::InvalidUrl(_))));
    }

    #[tokio::test]
    #[ignore] // Run with: cargo test -p skycast-weather -- --ignored
    async fn test_resolve_berlin_live() {
        let client = GeocodeClient::new(
            "https://geocoding-api.open-meteo.com/v1/search",
            Duration::from_secs(10),
        )
        .unwrap();
        let location = client.resolve("Berlin").await.unwrap();
        assert_eq!(location.name, "Berlin");
        assert!((location.latitude - 52.52).abs() < 0.1);
    }
}
