use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::constants::{
    KELVIN_TO_FAHRENHEIT_OFFSET, KELVIN_TO_FAHRENHEIT_SCALE, MILLIS_PER_SECOND,
};

/// A single climate observation, one per input line.
///
/// The surface temperature is stored in Fahrenheit; the Kelvin reading from
/// the input is converted on construction and discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub region_code: String,
    pub timestamp: DateTime<Utc>,
    pub humidity: f64,
    pub snow: bool,
    pub cloud_cover: f64,
    pub lightning: bool,
    pub pressure: f64,
    pub surface_temperature: f64,
}

impl Observation {
    /// Converts a Kelvin reading to Fahrenheit.
    pub fn fahrenheit_from_kelvin(kelvin: f64) -> f64 {
        kelvin * KELVIN_TO_FAHRENHEIT_SCALE - KELVIN_TO_FAHRENHEIT_OFFSET
    }

    /// Builds a UTC timestamp from a millisecond epoch value, truncating to
    /// whole seconds. Returns None outside the representable datetime range.
    pub fn timestamp_from_millis(millis: i64) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(millis / MILLIS_PER_SECOND, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kelvin_to_fahrenheit() {
        let freezing = Observation::fahrenheit_from_kelvin(273.15);
        assert!((freezing - 32.0).abs() < 1e-9);

        let sample = Observation::fahrenheit_from_kelvin(277.58716);
        assert!((sample - 39.986888).abs() < 1e-6);

        let absolute_zero = Observation::fahrenheit_from_kelvin(0.0);
        assert!((absolute_zero - (-459.67)).abs() < 1e-9);
    }

    #[test]
    fn test_timestamp_truncates_milliseconds() {
        let exact = Observation::timestamp_from_millis(1428300000000).unwrap();
        assert_eq!(exact.timestamp(), 1428300000);

        // Sub-second precision is dropped, never rounded up
        let fractional = Observation::timestamp_from_millis(1428300000999).unwrap();
        assert_eq!(fractional.timestamp(), 1428300000);
    }

    #[test]
    fn test_timestamp_pre_epoch_truncates_toward_zero() {
        let before_epoch = Observation::timestamp_from_millis(-1500).unwrap();
        assert_eq!(before_epoch.timestamp(), -1);
    }
}
