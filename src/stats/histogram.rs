//! Latency histogram using HdrHistogram
//!
//! Wraps the HdrHistogram library for tracking geocode call latencies with
//! high precision and low overhead.
//!
//! # Example
//!
//! ```
//! use geocenter::stats::histogram::LatencyHistogram;
//! use std::time::Duration;
//!
//! let mut hist = LatencyHistogram::new();
//! hist.record(Duration::from_millis(120));
//! hist.record(Duration::from_millis(340));
//!
//! let p99 = hist.percentile(99.0);
//! println!("p99: {:?}", p99);
//! ```

use hdrhistogram::Histogram;
use std::time::Duration;

/// Maximum recordable latency (1 hour in nanoseconds)
const MAX_LATENCY_NANOS: u64 = 3_600_000_000_000;

/// Latency histogram wrapper
///
/// Configured to track latencies from 1 nanosecond to 1 hour with 3
/// significant digits of precision (values accurate to within 0.1%).
/// Recording and querying are O(1).
#[derive(Debug, Clone)]
pub struct LatencyHistogram {
    histogram: Histogram<u64>,
}

impl LatencyHistogram {
    /// Create a new latency histogram
    pub fn new() -> Self {
        let histogram = Histogram::new_with_bounds(1, MAX_LATENCY_NANOS, 3)
            .expect("Failed to create histogram with valid bounds");
        Self { histogram }
    }

    /// Record a latency sample
    ///
    /// Values outside the histogram's range are clamped to the nearest
    /// valid value.
    #[inline]
    pub fn record(&mut self, latency: Duration) {
        let nanos = (latency.as_nanos() as u64).clamp(1, MAX_LATENCY_NANOS);
        self.histogram
            .record(nanos)
            .expect("clamped value is always in range");
    }

    /// Number of recorded samples
    pub fn len(&self) -> u64 {
        self.histogram.len()
    }

    /// Whether any samples have been recorded
    pub fn is_empty(&self) -> bool {
        self.histogram.is_empty()
    }

    /// Minimum recorded latency
    pub fn min(&self) -> Duration {
        Duration::from_nanos(self.histogram.min())
    }

    /// Mean recorded latency
    pub fn mean(&self) -> Duration {
        Duration::from_nanos(self.histogram.mean() as u64)
    }

    /// Maximum recorded latency
    pub fn max(&self) -> Duration {
        Duration::from_nanos(self.histogram.max())
    }

    /// Latency at the given percentile (0.0 - 100.0)
    pub fn percentile(&self, percentile: f64) -> Duration {
        Duration::from_nanos(self.histogram.value_at_percentile(percentile))
    }

    /// Merge samples from another histogram into this one
    pub fn merge(&mut self, other: &LatencyHistogram) {
        self.histogram
            .add(&other.histogram)
            .expect("histograms share identical bounds");
    }
}

impl Default for LatencyHistogram {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_histogram() {
        let hist = LatencyHistogram::new();
        assert!(hist.is_empty());
        assert_eq!(hist.len(), 0);
    }

    #[test]
    fn test_record_and_query() {
        let mut hist = LatencyHistogram::new();
        hist.record(Duration::from_millis(100));
        hist.record(Duration::from_millis(200));
        hist.record(Duration::from_millis(300));

        assert_eq!(hist.len(), 3);
        assert!(hist.min() >= Duration::from_millis(99));
        assert!(hist.max() <= Duration::from_millis(301));
        assert!(hist.mean() >= Duration::from_millis(190));
        assert!(hist.mean() <= Duration::from_millis(210));
    }

    #[test]
    fn test_percentile() {
        let mut hist = LatencyHistogram::new();
        for i in 1..=100 {
            hist.record(Duration::from_millis(i));
        }

        let p50 = hist.percentile(50.0);
        assert!(p50 >= Duration::from_millis(45) && p50 <= Duration::from_millis(55));

        let p99 = hist.percentile(99.0);
        assert!(p99 >= Duration::from_millis(95));
    }

    #[test]
    fn test_merge() {
        let mut a = LatencyHistogram::new();
        let mut b = LatencyHistogram::new();
        a.record(Duration::from_millis(10));
        b.record(Duration::from_millis(20));
        b.record(Duration::from_millis(30));

        a.merge(&b);
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn test_clamp_extreme_values() {
        let mut hist = LatencyHistogram::new();
        hist.record(Duration::from_nanos(0));
        hist.record(Duration::from_secs(7200));
        assert_eq!(hist.len(), 2);
    }
}
