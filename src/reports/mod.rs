pub mod summary;

pub use summary::{RegionSummary, ReportFormat, SummaryReport};
