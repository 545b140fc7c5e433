use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Observation;

/// Running statistics for a single region, folded from its observations.
///
/// Averages are derived from the sums on demand rather than stored, so they
/// can never drift out of step with the underlying totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionStats {
    pub region_code: String,
    pub record_count: u64,
    pub humidity_sum: f64,
    pub cloud_cover_sum: f64,
    pub temperature_sum: f64,
    pub pressure_sum: f64,
    pub snow_events: u64,
    pub lightning_events: u64,
    pub max_temperature: f64,
    pub max_temperature_at: DateTime<Utc>,
    pub min_temperature: f64,
    pub min_temperature_at: DateTime<Utc>,
}

impl RegionStats {
    /// Seeds statistics from a region's first observation. Both extremes
    /// start at that observation's temperature and timestamp.
    pub fn from_observation(observation: &Observation) -> Self {
        Self {
            region_code: observation.region_code.clone(),
            record_count: 1,
            humidity_sum: observation.humidity,
            cloud_cover_sum: observation.cloud_cover,
            temperature_sum: observation.surface_temperature,
            pressure_sum: observation.pressure,
            snow_events: u64::from(observation.snow),
            lightning_events: u64::from(observation.lightning),
            max_temperature: observation.surface_temperature,
            max_temperature_at: observation.timestamp,
            min_temperature: observation.surface_temperature,
            min_temperature_at: observation.timestamp,
        }
    }

    /// Folds a subsequent observation into the running totals.
    pub fn update(&mut self, observation: &Observation) {
        self.record_count += 1;
        self.humidity_sum += observation.humidity;
        self.cloud_cover_sum += observation.cloud_cover;
        self.temperature_sum += observation.surface_temperature;
        self.pressure_sum += observation.pressure;

        if observation.snow {
            self.snow_events += 1;
        }
        if observation.lightning {
            self.lightning_events += 1;
        }

        // Strict comparisons: a tie keeps the earlier timestamp
        if observation.surface_temperature > self.max_temperature {
            self.max_temperature = observation.surface_temperature;
            self.max_temperature_at = observation.timestamp;
        }
        if observation.surface_temperature < self.min_temperature {
            self.min_temperature = observation.surface_temperature;
            self.min_temperature_at = observation.timestamp;
        }
    }

    pub fn avg_humidity(&self) -> f64 {
        self.humidity_sum / self.record_count as f64
    }

    pub fn avg_cloud_cover(&self) -> f64 {
        self.cloud_cover_sum / self.record_count as f64
    }

    pub fn avg_temperature(&self) -> f64 {
        self.temperature_sum / self.record_count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation(code: &str, seconds: i64, temperature: f64) -> Observation {
        Observation {
            region_code: code.to_string(),
            timestamp: DateTime::from_timestamp(seconds, 0).unwrap(),
            humidity: 50.0,
            snow: false,
            cloud_cover: 25.0,
            lightning: false,
            pressure: 101325.0,
            surface_temperature: temperature,
        }
    }

    #[test]
    fn test_seed_from_first_observation() {
        let first = observation("CA", 1428300000, 39.9869);
        let stats = RegionStats::from_observation(&first);

        assert_eq!(stats.region_code, "CA");
        assert_eq!(stats.record_count, 1);
        assert_eq!(stats.humidity_sum, 50.0);
        assert_eq!(stats.max_temperature, 39.9869);
        assert_eq!(stats.min_temperature, 39.9869);
        assert_eq!(stats.max_temperature_at, first.timestamp);
        assert_eq!(stats.min_temperature_at, first.timestamp);
    }

    #[test]
    fn test_seed_counts_flag_events() {
        let mut first = observation("WA", 1428300000, 50.0);
        first.snow = true;
        first.lightning = true;

        let stats = RegionStats::from_observation(&first);
        assert_eq!(stats.snow_events, 1);
        assert_eq!(stats.lightning_events, 1);
    }

    #[test]
    fn test_update_accumulates_sums_and_counts() {
        let mut stats = RegionStats::from_observation(&observation("CA", 100, 40.0));

        let mut second = observation("CA", 200, 60.0);
        second.humidity = 70.0;
        second.cloud_cover = 75.0;
        second.snow = true;
        stats.update(&second);

        assert_eq!(stats.record_count, 2);
        assert_eq!(stats.humidity_sum, 120.0);
        assert_eq!(stats.cloud_cover_sum, 100.0);
        assert_eq!(stats.temperature_sum, 100.0);
        assert_eq!(stats.pressure_sum, 202650.0);
        assert_eq!(stats.snow_events, 1);
        assert_eq!(stats.lightning_events, 0);
    }

    #[test]
    fn test_extremes_track_value_and_timestamp_together() {
        let mut stats = RegionStats::from_observation(&observation("CA", 100, 40.0));

        let hotter = observation("CA", 200, 55.0);
        stats.update(&hotter);
        assert_eq!(stats.max_temperature, 55.0);
        assert_eq!(stats.max_temperature_at, hotter.timestamp);
        assert_eq!(stats.min_temperature, 40.0);
        assert_eq!(stats.min_temperature_at.timestamp(), 100);

        let colder = observation("CA", 300, -5.0);
        stats.update(&colder);
        assert_eq!(stats.min_temperature, -5.0);
        assert_eq!(stats.min_temperature_at, colder.timestamp);
        assert_eq!(stats.max_temperature, 55.0);
    }

    #[test]
    fn test_equal_extremes_keep_earlier_timestamp() {
        let mut stats = RegionStats::from_observation(&observation("CA", 100, 40.0));

        stats.update(&observation("CA", 500, 40.0));

        assert_eq!(stats.max_temperature_at.timestamp(), 100);
        assert_eq!(stats.min_temperature_at.timestamp(), 100);
    }

    #[test]
    fn test_all_negative_temperatures_report_correct_max() {
        let mut stats = RegionStats::from_observation(&observation("AK", 100, -20.0));
        stats.update(&observation("AK", 200, -5.0));
        stats.update(&observation("AK", 300, -30.0));

        assert_eq!(stats.max_temperature, -5.0);
        assert_eq!(stats.min_temperature, -30.0);
    }

    #[test]
    fn test_averages_derived_from_sums() {
        let mut stats = RegionStats::from_observation(&observation("CA", 100, 30.0));
        let mut second = observation("CA", 200, 50.0);
        second.humidity = 60.0;
        stats.update(&second);

        assert!((stats.avg_temperature() - 40.0).abs() < 1e-9);
        assert!((stats.avg_humidity() - 55.0).abs() < 1e-9);
        assert!((stats.avg_cloud_cover() - 25.0).abs() < 1e-9);
    }
}
