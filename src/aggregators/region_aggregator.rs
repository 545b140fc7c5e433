use std::collections::HashMap;

use crate::models::{Observation, RegionStats};

/// Folds observations into per-region running statistics.
///
/// Regions are kept in the order they were first seen, so the same input
/// always reports in the same order. Lookup stays constant-time through a
/// code-to-slot index over the region list.
#[derive(Debug, Default)]
pub struct RegionAggregator {
    index: HashMap<String, usize>,
    regions: Vec<RegionStats>,
}

impl RegionAggregator {
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            regions: Vec::new(),
        }
    }

    /// Folds one observation into its region's statistics. The first
    /// observation of a region seeds it; every later one updates the
    /// running totals. Never fails: only well-formed records reach here.
    pub fn ingest(&mut self, observation: Observation) {
        match self.index.get(&observation.region_code) {
            Some(&slot) => self.regions[slot].update(&observation),
            None => {
                self.index
                    .insert(observation.region_code.clone(), self.regions.len());
                self.regions
                    .push(RegionStats::from_observation(&observation));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Total observations folded in, across all regions.
    pub fn total_records(&self) -> u64 {
        self.regions.iter().map(|r| r.record_count).sum()
    }

    pub fn get(&self, region_code: &str) -> Option<&RegionStats> {
        self.index.get(region_code).map(|&slot| &self.regions[slot])
    }

    /// Iterates regions in first-seen order.
    pub fn regions(&self) -> impl Iterator<Item = &RegionStats> {
        self.regions.iter()
    }

    pub fn into_regions(self) -> Vec<RegionStats> {
        self.regions
    }
}
