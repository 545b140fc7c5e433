pub mod observation;
pub mod region_stats;

pub use observation::Observation;
pub use region_stats::RegionStats;
