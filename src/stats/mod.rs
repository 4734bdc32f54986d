//! Statistics collection
//!
//! Per-worker resolution counters and latency histograms, with merge support
//! so the aggregator can combine statistics from all workers after a run.
//! Each worker owns its `WorkerStats` exclusively while running, so no
//! locking is needed on the hot path.
//!
//! # Example
//!
//! ```
//! use geocenter::stats::WorkerStats;
//! use std::time::Duration;
//!
//! let mut stats = WorkerStats::new();
//! stats.record_resolved(Duration::from_millis(120));
//! stats.record_failed(Duration::from_millis(45));
//!
//! assert_eq!(stats.resolved(), 1);
//! assert_eq!(stats.failed(), 1);
//! assert_eq!(stats.attempted(), 2);
//! ```

pub mod aggregator;
pub mod histogram;

use histogram::LatencyHistogram;
use std::time::Duration;

/// Per-worker resolution statistics
///
/// Tracks how many geocode calls a worker completed, how many failed, and
/// the latency distribution across all of its calls (successful or not).
#[derive(Debug, Clone, Default)]
pub struct WorkerStats {
    resolved: u64,
    failed: u64,
    latency: LatencyHistogram,
}

impl WorkerStats {
    /// Create empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful resolution and its call latency
    pub fn record_resolved(&mut self, latency: Duration) {
        self.resolved += 1;
        self.latency.record(latency);
    }

    /// Record a failed resolution and its call latency
    pub fn record_failed(&mut self, latency: Duration) {
        self.failed += 1;
        self.latency.record(latency);
    }

    /// Number of successfully resolved addresses
    pub fn resolved(&self) -> u64 {
        self.resolved
    }

    /// Number of failed resolutions
    pub fn failed(&self) -> u64 {
        self.failed
    }

    /// Total geocode calls made (resolved + failed)
    pub fn attempted(&self) -> u64 {
        self.resolved + self.failed
    }

    /// Latency histogram across all calls
    pub fn latency(&self) -> &LatencyHistogram {
        &self.latency
    }

    /// Fold another worker's statistics into this one
    pub fn merge(&mut self, other: &WorkerStats) {
        self.resolved += other.resolved;
        self.failed += other.failed;
        self.latency.merge(&other.latency);
    }
}
