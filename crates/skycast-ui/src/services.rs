//! Weather backend: async geocoding and forecast fetching.
//! All network work runs on the tokio runtime; results sent via mpsc.

use std::sync::Arc;

use skycast_weather::{GeocodeClient, Location, WeatherClient, WeatherError, WeatherSnapshot};
use tokio::sync::mpsc::UnboundedSender;

/// Messages sent from async operations back to the controller.
///
/// `seq` is the request token the operation was started with.
#[derive(Debug)]
pub enum ServiceMessage {
    /// Result of resolving a search query
    GeocodeDone {
        seq: u64,
        result: Result<Location, WeatherError>,
    },
    /// Result of fetching weather for a resolved location
    WeatherDone {
        seq: u64,
        location: Location,
        result: Result<WeatherSnapshot, WeatherError>,
    },
}

impl ServiceMessage {
    pub fn seq(&self) -> u64 {
        match self {
            ServiceMessage::GeocodeDone { seq, .. } | ServiceMessage::WeatherDone { seq, .. } => {
                *seq
            }
        }
    }
}

/// Request geocoding of `query`.
/// Sends `GeocodeDone` on the channel when complete.
pub fn request_geocode(
    tx: &UnboundedSender<ServiceMessage>,
    geocoder: Arc<GeocodeClient>,
    seq: u64,
    query: String,
) {
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = geocoder.resolve(&query).await;
        if tx.send(ServiceMessage::GeocodeDone { seq, result }).is_err() {
            tracing::debug!("Controller gone, dropping geocode result #{}", seq);
        }
    });
}

/// Request a forecast for `location`.
/// Sends `WeatherDone` on the channel when complete.
pub fn request_weather(
    tx: &UnboundedSender<ServiceMessage>,
    weather: Arc<WeatherClient>,
    seq: u64,
    location: Location,
) {
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = weather
            .fetch_weather(location.latitude, location.longitude)
            .await;
        let message = ServiceMessage::WeatherDone {
            seq,
            location,
            result,
        };
        if tx.send(message).is_err() {
            tracing::debug!("Controller gone, dropping weather result #{}", seq);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_message_seq() {
        let msg = ServiceMessage::GeocodeDone {
            seq: 7,
            result: Err(WeatherError::NotFound {
                query: "x".into(),
            }),
        };
        assert_eq!(msg.seq(), 7);
    }
}
