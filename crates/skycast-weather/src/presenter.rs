//! Display formatting for current conditions.

use chrono::{NaiveDate, NaiveDateTime};

use crate::types::{Location, UnitPreference, WeatherIcon, WeatherSnapshot};
use crate::units::convert;

/// Shown when a value is missing from the payload
pub const PLACEHOLDER: &str = "--";

/// Parse the timestamp formats Open-Meteo returns with `timezone=auto`
pub(crate) fn parse_timestamp(iso: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(iso, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Long-form date, e.g. "Monday, January 1, 2024".
///
/// Input that cannot be parsed is returned as-is.
pub fn format_date(iso: &str) -> String {
    match parse_timestamp(iso) {
        Some(dt) => dt.format("%A, %B %-d, %Y").to_string(),
        None => {
            tracing::debug!("Unparseable timestamp: {}", iso);
            iso.to_string()
        }
    }
}

/// Map a WMO weather code to an icon.
///
/// Ascending inclusive upper bounds, first match wins. The bands are coarser than
/// the WMO table on purpose (everything from 4 to 48 is fog).
pub fn select_icon(code: i32) -> WeatherIcon {
    if code == 0 {
        WeatherIcon::Sunny
    } else if code <= 3 {
        WeatherIcon::PartlyCloudy
    } else if code <= 48 {
        WeatherIcon::Fog
    } else if code <= 67 {
        WeatherIcon::Rain
    } else if code <= 77 {
        WeatherIcon::Snow
    } else {
        WeatherIcon::Storm
    }
}

pub fn city_line(location: &Location) -> String {
    if location.country.is_empty() {
        location.name.clone()
    } else {
        format!("{}, {}", location.name, location.country)
    }
}

pub fn temperature_line(temp_celsius: f64, unit: UnitPreference) -> String {
    format!("{}°", convert(temp_celsius, unit))
}

/// Secondary readings shown under the current temperature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionStats {
    pub feels_like: String,
    pub humidity: String,
    pub wind: String,
    pub precipitation: String,
}

/// Build the stats lines from the hourly entry matching the current time.
pub fn condition_stats(snapshot: &WeatherSnapshot, unit: UnitPreference) -> ConditionStats {
    let current = &snapshot.current_weather;
    let index = snapshot.current_hour_index();
    let hourly = snapshot.hourly.as_ref();

    let feels_like = hourly
        .and_then(|h| h.apparent_temperature.get(index))
        .copied()
        .unwrap_or(current.temperature);

    let humidity = hourly
        .and_then(|h| h.relativehumidity_2m.get(index))
        .map(|v| format!("{}%", v.round() as i64))
        .unwrap_or_else(|| PLACEHOLDER.to_string());

    let precipitation = hourly
        .and_then(|h| h.precipitation.get(index))
        .map(|v| format!("{:.1} mm", v))
        .unwrap_or_else(|| PLACEHOLDER.to_string());

    ConditionStats {
        feels_like: temperature_line(feels_like, unit),
        humidity,
        wind: format!("{} km/h", current.windspeed.round() as i64),
        precipitation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(country: &str) -> Location {
        Location {
            name: "Berlin".to_string(),
            country: country.to_string(),
            latitude: 52.52,
            longitude: 13.405,
        }
    }

    #[test]
    fn test_format_date_long_form() {
        assert_eq!(format_date("2024-01-01T12:00"), "Monday, January 1, 2024");
        assert_eq!(format_date("2024-02-29"), "Thursday, February 29, 2024");
        assert_eq!(format_date("2024-07-04T08:30:15"), "Thursday, July 4, 2024");
    }

    #[test]
    fn test_format_date_passes_through_garbage() {
        assert_eq!(format_date("yesterday"), "yesterday");
    }

    #[test]
    fn test_icon_band_boundaries() {
        assert_eq!(select_icon(0), WeatherIcon::Sunny);
        assert_eq!(select_icon(1), WeatherIcon::PartlyCloudy);
        assert_eq!(select_icon(3), WeatherIcon::PartlyCloudy);
        assert_eq!(select_icon(4), WeatherIcon::Fog);
        assert_eq!(select_icon(48), WeatherIcon::Fog);
        assert_eq!(select_icon(49), WeatherIcon::Rain);
        assert_eq!(select_icon(67), WeatherIcon::Rain);
        assert_eq!(select_icon(68), WeatherIcon::Snow);
        assert_eq!(select_icon(77), WeatherIcon::Snow);
        assert_eq!(select_icon(78), WeatherIcon::Storm);
        assert_eq!(select_icon(99), WeatherIcon::Storm);
    }

    #[test]
    fn test_icon_is_total() {
        for code in -10..=200 {
            let icon = select_icon(code);
            assert!(!icon.name().is_empty());
        }
        assert_eq!(select_icon(-1), WeatherIcon::PartlyCloudy);
        assert_eq!(select_icon(i32::MAX), WeatherIcon::Storm);
    }

    #[test]
    fn test_city_line() {
        assert_eq!(city_line(&location("Germany")), "Berlin, Germany");
        assert_eq!(city_line(&location("")), "Berlin");
    }

    #[test]
    fn test_temperature_line() {
        assert_eq!(temperature_line(18.4, UnitPreference::Metric), "18°");
        assert_eq!(temperature_line(18.4, UnitPreference::Imperial), "65°");
    }

    #[test]
    fn test_condition_stats_from_matching_hour() {
        let snapshot: WeatherSnapshot = serde_json::from_value(serde_json::json!({
            "current_weather": {
                "temperature": 18.4,
                "windspeed": 10.4,
                "weathercode": 1,
                "time": "2024-01-01T01:00"
            },
            "hourly": {
                "time": ["2024-01-01T00:00", "2024-01-01T01:00"],
                "temperature_2m": [17.0, 18.4],
                "relativehumidity_2m": [70, 65],
                "precipitation": [0.0, 0.3],
                "apparent_temperature": [16.0, 16.6]
            }
        }))
        .unwrap();

        let stats = condition_stats(&snapshot, UnitPreference::Metric);
        assert_eq!(stats.feels_like, "17°");
        assert_eq!(stats.humidity, "65%");
        assert_eq!(stats.wind, "10 km/h");
        assert_eq!(stats.precipitation, "0.3 mm");
    }

    #[test]
    fn test_condition_stats_without_hourly() {
        let snapshot: WeatherSnapshot = serde_json::from_value(serde_json::json!({
            "current_weather": {
                "temperature": 0.0,
                "windspeed": 3.0,
                "weathercode": 0,
                "time": "2024-01-01T01:00"
            }
        }))
        .unwrap();

        let stats = condition_stats(&snapshot, UnitPreference::Imperial);
        assert_eq!(stats.feels_like, "32°");
        assert_eq!(stats.humidity, PLACEHOLDER);
        assert_eq!(stats.precipitation, PLACEHOLDER);
    }
}
