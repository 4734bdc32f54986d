//! Statistics aggregation
//!
//! Merges per-worker statistics into a single aggregate view while keeping
//! the per-worker detail available for analysis.

use crate::stats::WorkerStats;
use std::collections::HashMap;

/// Statistics aggregator for multiple workers
///
/// # Usage
///
/// 1. Create with `new()`
/// 2. Add each worker's stats with `add_worker()`
/// 3. Read the merged view with `aggregate()`
#[derive(Debug, Default)]
pub struct StatsAggregator {
    /// Per-worker statistics (worker_id -> stats)
    workers: HashMap<usize, WorkerStats>,
}

impl StatsAggregator {
    /// Create an empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Add statistics from a worker
    pub fn add_worker(&mut self, worker_id: usize, stats: WorkerStats) {
        self.workers.insert(worker_id, stats);
    }

    /// Number of workers added
    pub fn num_workers(&self) -> usize {
        self.workers.len()
    }

    /// Merge all worker statistics into a single view
    pub fn aggregate(&self) -> WorkerStats {
        let mut aggregate = WorkerStats::new();
        for stats in self.workers.values() {
            aggregate.merge(stats);
        }
        aggregate
    }

    /// Statistics for one worker, if present
    pub fn worker_stats(&self, worker_id: usize) -> Option<&WorkerStats> {
        self.workers.get(&worker_id)
    }

    /// Worker IDs in ascending order for consistent iteration
    pub fn worker_ids(&self) -> Vec<usize> {
        let mut ids: Vec<usize> = self.workers.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}
