pub mod region_aggregator;

pub use region_aggregator::RegionAggregator;
