use skycast_core::{AppError, ReqwestErrorExt, WeatherError};
use skycast_weather::WeatherError as ClientWeatherError;

/// Map a weather client error into the application error hierarchy.
pub fn to_app_error(e: ClientWeatherError) -> AppError {
    match e {
        ClientWeatherError::NotFound { query } => {
            AppError::Weather(WeatherError::LocationNotFound(query))
        }
        ClientWeatherError::Unavailable(_) => AppError::Weather(WeatherError::ServiceUnavailable),
        ClientWeatherError::Status { status, url } => {
            AppError::Weather(WeatherError::ApiError(format!("{} returned {}", url, status)))
        }
        ClientWeatherError::Network(e) => AppError::Network(e.into_network_error()),
        ClientWeatherError::InvalidUrl(e) => {
            AppError::Weather(WeatherError::ApiError(e.to_string()))
        }
    }
}
