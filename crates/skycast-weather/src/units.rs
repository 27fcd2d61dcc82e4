//! Temperature unit conversion.

use crate::types::UnitPreference;

impl UnitPreference {
    /// The other unit
    pub fn toggled(self) -> Self {
        match self {
            Self::Metric => Self::Imperial,
            Self::Imperial => Self::Metric,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Metric => "°C",
            Self::Imperial => "°F",
        }
    }
}

/// Convert a Celsius reading to the preferred unit, rounded to a whole degree.
///
/// Halves round up (toward positive infinity), so `-2.5` becomes `-2`.
pub fn convert(temp_celsius: f64, unit: UnitPreference) -> i64 {
    let value = match unit {
        UnitPreference::Metric => temp_celsius,
        UnitPreference::Imperial => temp_celsius * 9.0 / 5.0 + 32.0,
    };
    round_half_up(value)
}

fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
