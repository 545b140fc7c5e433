use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::aggregators::RegionAggregator;
use crate::error::{ProcessingError, Result};
use crate::models::RegionStats;
use crate::utils::constants::{FORMAT_JSON, FORMAT_TEXT, REPORT_SEPARATOR, REPORT_TIME_FORMAT};

/// Output format for the summary report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            FORMAT_TEXT => Ok(ReportFormat::Text),
            FORMAT_JSON => Ok(ReportFormat::Json),
            other => Err(ProcessingError::Config(format!(
                "Unknown report format: '{}'",
                other
            ))),
        }
    }
}

/// Per-region view of the aggregated statistics, ready for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct RegionSummary {
    pub region_code: String,
    pub record_count: u64,
    pub avg_humidity: f64,
    pub avg_temperature: f64,
    pub max_temperature: f64,
    pub max_temperature_at: DateTime<Utc>,
    pub min_temperature: f64,
    pub min_temperature_at: DateTime<Utc>,
    pub lightning_strikes: u64,
    pub snow_cover_records: u64,
    pub avg_cloud_cover: f64,
}

impl From<&RegionStats> for RegionSummary {
    fn from(stats: &RegionStats) -> Self {
        Self {
            region_code: stats.region_code.clone(),
            record_count: stats.record_count,
            avg_humidity: stats.avg_humidity(),
            avg_temperature: stats.avg_temperature(),
            max_temperature: stats.max_temperature,
            max_temperature_at: stats.max_temperature_at,
            min_temperature: stats.min_temperature,
            min_temperature_at: stats.min_temperature_at,
            lightning_strikes: stats.lightning_events,
            snow_cover_records: stats.snow_events,
            avg_cloud_cover: stats.avg_cloud_cover(),
        }
    }
}

/// Final report over all regions, in first-seen order.
#[derive(Debug, Clone)]
pub struct SummaryReport {
    pub regions: Vec<RegionSummary>,
}

impl SummaryReport {
    pub fn from_aggregator(aggregator: &RegionAggregator) -> Self {
        Self {
            regions: aggregator.regions().map(RegionSummary::from).collect(),
        }
    }

    /// Renders the plain-text report: a header listing every region code,
    /// then one block per region. An empty report is just the header line.
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        out.push_str("Regions found:");
        for region in &self.regions {
            out.push(' ');
            out.push_str(&region.region_code);
        }
        out.push('\n');

        for region in &self.regions {
            out.push_str(&format!("Region: {}\n", region.region_code));
            out.push_str(&format!("Number of Records: {}\n", region.record_count));
            out.push_str(&format!("Average Humidity: {:.1}%\n", region.avg_humidity));
            out.push_str(&format!(
                "Average Temperature: {:.1}F\n",
                region.avg_temperature
            ));
            out.push_str(&format!(
                "Max Temperature: {:.1}F on {}\n",
                region.max_temperature,
                region.max_temperature_at.format(REPORT_TIME_FORMAT)
            ));
            out.push_str(&format!(
                "Min Temperature: {:.1}F on {}\n",
                region.min_temperature,
                region.min_temperature_at.format(REPORT_TIME_FORMAT)
            ));
            out.push_str(&format!(
                "Lightning Strikes: {}\n",
                region.lightning_strikes
            ));
            out.push_str(&format!(
                "Records with Snow Cover: {}\n",
                region.snow_cover_records
            ));
            out.push_str(&format!(
                "Average Cloud Cover: {:.1}%\n",
                region.avg_cloud_cover
            ));
            out.push_str(REPORT_SEPARATOR);
            out.push('\n');
        }

        out
    }

    /// Renders the per-region summaries as pretty-printed JSON.
    pub fn render_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.regions)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Observation;
    use pretty_assertions::assert_eq;

    fn observation(code: &str, seconds: i64, humidity: f64, temperature: f64) -> Observation {
        Observation {
            region_code: code.to_string(),
            timestamp: DateTime::from_timestamp(seconds, 0).unwrap(),
            humidity,
            snow: false,
            cloud_cover: 30.0,
            lightning: false,
            pressure: 101325.0,
            surface_temperature: temperature,
        }
    }

    fn sample_aggregator() -> RegionAggregator {
        let mut aggregator = RegionAggregator::new();

        aggregator.ingest(observation("CA", 1428300000, 42.0, 39.986888));
        aggregator.ingest(observation("CA", 1430308800, 55.0, 49.064666));

        let mut wa = observation("WA", 1430308800, 88.0, 45.0);
        wa.snow = true;
        wa.lightning = true;
        wa.cloud_cover = 60.0;
        aggregator.ingest(wa);

        aggregator
    }

    #[test]
    fn test_text_report_layout() {
        let report = SummaryReport::from_aggregator(&sample_aggregator());
        let text = report.render_text();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 21);
        assert_eq!(lines[0], "Regions found: CA WA");
        assert_eq!(lines[1], "Region: CA");
        assert_eq!(lines[2], "Number of Records: 2");
        assert_eq!(lines[3], "Average Humidity: 48.5%");
        assert_eq!(lines[4], "Average Temperature: 44.5F");
        assert_eq!(lines[5], "Max Temperature: 49.1F on Wed Apr 29 12:00:00 2015");
        assert_eq!(lines[6], "Min Temperature: 40.0F on Mon Apr  6 06:00:00 2015");
        assert_eq!(lines[7], "Lightning Strikes: 0");
        assert_eq!(lines[8], "Records with Snow Cover: 0");
        assert_eq!(lines[9], "Average Cloud Cover: 30.0%");
        assert_eq!(lines[10], "---------------------------");
        assert_eq!(lines[11], "Region: WA");
        assert_eq!(lines[12], "Number of Records: 1");
        assert_eq!(lines[17], "Lightning Strikes: 1");
        assert_eq!(lines[18], "Records with Snow Cover: 1");
        assert_eq!(lines[20], "---------------------------");
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_empty_report_is_just_the_header() {
        let aggregator = RegionAggregator::new();
        let report = SummaryReport::from_aggregator(&aggregator);

        assert_eq!(report.render_text(), "Regions found:\n");
        assert_eq!(report.render_json().unwrap(), "[]");
    }

    #[test]
    fn test_json_report_fields() {
        let report = SummaryReport::from_aggregator(&sample_aggregator());
        let json = report.render_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let regions = value.as_array().unwrap();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0]["region_code"], "CA");
        assert_eq!(regions[0]["record_count"], 2);
        assert_eq!(regions[0]["avg_humidity"], 48.5);
        assert_eq!(
            regions[0]["max_temperature_at"],
            "2015-04-29T12:00:00Z"
        );
        assert_eq!(regions[1]["region_code"], "WA");
        assert_eq!(regions[1]["lightning_strikes"], 1);
    }

    #[test]
    fn test_report_format_parsing() {
        assert_eq!(ReportFormat::parse("text").unwrap(), ReportFormat::Text);
        assert_eq!(ReportFormat::parse("json").unwrap(), ReportFormat::Json);
        assert!(matches!(
            ReportFormat::parse("yaml"),
            Err(ProcessingError::Config(_))
        ));
    }

    #[test]
    fn test_summaries_follow_first_seen_order() {
        let mut aggregator = RegionAggregator::new();
        for code in ["TX", "AK", "CA"] {
            aggregator.ingest(observation(code, 100, 50.0, 60.0));
        }

        let report = SummaryReport::from_aggregator(&aggregator);
        let order: Vec<&str> = report
            .regions
            .iter()
            .map(|r| r.region_code.as_str())
            .collect();
        assert_eq!(order, vec!["TX", "AK", "CA"]);
    }
}
