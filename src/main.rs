use std::time::Duration;

use anyhow::{Context, Result};
use skycast_core::{AppError, Config, DefaultLocation, TemperatureUnit};
use skycast_ui::{AppController, ViewState};
use skycast_weather::{GeocodeClient, Location, UnitPreference, WeatherClient};
use tokio::io::{AsyncBufReadExt, BufReader};

fn unit_preference(unit: TemperatureUnit) -> UnitPreference {
    match unit {
        TemperatureUnit::Metric => UnitPreference::Metric,
        TemperatureUnit::Imperial => UnitPreference::Imperial,
    }
}

fn default_location(location: &DefaultLocation) -> Location {
    Location {
        name: location.name.clone(),
        country: location.country.clone(),
        latitude: location.latitude,
        longitude: location.longitude,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    skycast_core::init()?;

    let (config, _) = match Config::load_validated() {
        Ok(loaded) => loaded,
        Err(e) => {
            let error = AppError::from_anyhow(e);
            tracing::error!("Failed to load config: {:#}", error);
            eprintln!("{}", error.user_message());
            return Err(error.into());
        }
    };
    tracing::info!("Config directory: {}", config.config_dir.display());

    let weather_config = &config.weather;
    let timeout = Duration::from_secs(weather_config.timeout_secs);
    let geocoder = GeocodeClient::new(&weather_config.geocode_url, timeout)
        .context("Failed to create geocoding client")?;
    let weather = WeatherClient::new(&weather_config.forecast_url, timeout)
        .context("Failed to create weather client")?;

    let mut controller = AppController::new(
        geocoder,
        weather,
        ViewState::default(),
        unit_preference(weather_config.temperature_unit),
    );

    println!("Skycast - type a city to search, :u to switch units, :q to quit");
    controller.load_default(default_location(&weather_config.default_location));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    break;
                };
                match line.trim() {
                    ":q" | ":quit" => break,
                    ":u" | ":units" => {
                        controller.toggle_unit();
                        print!("{}", controller.view());
                    }
                    query => controller.submit(query),
                }
            }
            Some(message) = controller.next_message() => {
                controller.handle(message);
                print!("{}", controller.view());
            }
        }
    }

    tracing::info!("Skycast shutting down");
    Ok(())
}
