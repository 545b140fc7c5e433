use crate::error::{ProcessingError, Result};
use crate::models::Observation;
use crate::utils::constants::{REGION_CODE_LEN, TDV_FIELD_COUNT};

/// Parses tab-delimited observation lines into typed records.
///
/// Field order: region code, epoch milliseconds, geolocation hash (unused),
/// humidity, snow flag, cloud cover, lightning flag, pressure, surface
/// temperature in Kelvin.
pub struct ObservationParser;

impl ObservationParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a single observation line. Stateless: the same input always
    /// yields the same record or the same error.
    pub fn parse_line(&self, line: &str) -> Result<Observation> {
        let fields: Vec<&str> = line.split('\t').map(|f| f.trim()).collect();

        if fields.len() < TDV_FIELD_COUNT {
            return Err(ProcessingError::MalformedRecord {
                reason: format!(
                    "expected {} fields, found {}",
                    TDV_FIELD_COUNT,
                    fields.len()
                ),
            });
        }

        // Region codes longer than two characters are truncated, shorter
        // ones pass through as-is
        let region_code: String = fields[0].chars().take(REGION_CODE_LEN).collect();

        let millis = fields[1]
            .parse::<i64>()
            .map_err(|_| ProcessingError::MalformedRecord {
                reason: format!("invalid timestamp: '{}'", fields[1]),
            })?;

        let timestamp = Observation::timestamp_from_millis(millis).ok_or_else(|| {
            ProcessingError::MalformedRecord {
                reason: format!("timestamp out of range: '{}'", fields[1]),
            }
        })?;

        // fields[2] is the geolocation hash, not used in any summary

        let humidity = self.parse_number(fields[3], "humidity")?;
        let snow = self.parse_number(fields[4], "snow flag")? != 0.0;
        let cloud_cover = self.parse_number(fields[5], "cloud cover")?;
        let lightning = self.parse_number(fields[6], "lightning flag")? != 0.0;
        let pressure = self.parse_number(fields[7], "pressure")?;
        let kelvin = self.parse_number(fields[8], "surface temperature")?;

        Ok(Observation {
            region_code,
            timestamp,
            humidity,
            snow,
            cloud_cover,
            lightning,
            pressure,
            surface_temperature: Observation::fahrenheit_from_kelvin(kelvin),
        })
    }

    fn parse_number(&self, field: &str, name: &str) -> Result<f64> {
        field
            .parse::<f64>()
            .map_err(|_| ProcessingError::MalformedRecord {
                reason: format!("invalid {}: '{}'", name, field),
            })
    }
}

impl Default for ObservationParser {
    fn default() -> Self {
        Self::new()
    }
}
