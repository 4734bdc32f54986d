//! JSON report formatting
//!
//! Serializes a run summary to a JSON report file:
//! - Address counts and failure causes
//! - Latency statistics (min/mean/max + percentiles)
//! - The centroid, or the reason it is undefined
//! - Per-worker detail (optional)

use crate::config::Config;
use crate::pipeline::RunSummary;
use crate::stats::histogram::LatencyHistogram;
use crate::util::time::format_duration;
use crate::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use std::time::Duration;

/// Duration with both microseconds and human-readable format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonDuration {
    pub micros: u64,
    pub human: String,
}

impl JsonDuration {
    pub fn from_duration(d: Duration) -> Self {
        Self {
            micros: d.as_micros() as u64,
            human: format_duration(d),
        }
    }
}

/// Latency statistics with percentiles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonLatency {
    pub min: JsonDuration,
    pub mean: JsonDuration,
    pub max: JsonDuration,
    pub p50: JsonDuration,
    pub p90: JsonDuration,
    pub p99: JsonDuration,
}

impl JsonLatency {
    fn from_histogram(hist: &LatencyHistogram) -> Option<Self> {
        if hist.is_empty() {
            return None;
        }
        Some(Self {
            min: JsonDuration::from_duration(hist.min()),
            mean: JsonDuration::from_duration(hist.mean()),
            max: JsonDuration::from_duration(hist.max()),
            p50: JsonDuration::from_duration(hist.percentile(50.0)),
            p90: JsonDuration::from_duration(hist.percentile(90.0)),
            p99: JsonDuration::from_duration(hist.percentile(99.0)),
        })
    }
}

/// Address counts for the run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonAddressCounts {
    pub read: u64,
    pub attempted: u64,
    pub resolved: u64,
    pub failed: u64,
}

/// One failed address and its cause
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonFailure {
    pub address: String,
    pub error: String,
}

/// The computed centroid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonCentroid {
    pub latitude: f64,
    pub longitude: f64,
    /// Fixed 6-decimal rendering, matching the text report
    pub display: String,
}

/// Per-worker call counts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonWorker {
    pub id: usize,
    pub attempted: u64,
    pub resolved: u64,
    pub failed: u64,
}

/// Complete JSON report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    pub timestamp: String,
    pub backend: String,
    pub workers: usize,
    pub elapsed_secs: f64,
    pub cancelled: bool,
    pub addresses: JsonAddressCounts,
    pub failures: Vec<JsonFailure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency: Option<JsonLatency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub centroid: Option<JsonCentroid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub centroid_error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub per_worker: Vec<JsonWorker>,
}

impl JsonReport {
    /// Build a report from a run summary
    pub fn build(summary: &RunSummary, config: &Config) -> Self {
        let (centroid, centroid_error) = match &summary.centroid {
            Ok(center) => (
                Some(JsonCentroid {
                    latitude: center.latitude(),
                    longitude: center.longitude(),
                    display: center.to_string(),
                }),
                None,
            ),
            Err(e) => (None, Some(e.to_string())),
        };

        let per_worker = if config.output.per_worker_output {
            summary
                .per_worker
                .iter()
                .map(|(id, stats)| JsonWorker {
                    id: *id,
                    attempted: stats.attempted(),
                    resolved: stats.resolved(),
                    failed: stats.failed(),
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            backend: config.geocoder.backend.to_string(),
            workers: config.workers.threads,
            elapsed_secs: summary.elapsed.as_secs_f64(),
            cancelled: summary.cancelled,
            addresses: JsonAddressCounts {
                read: summary.addresses_read,
                attempted: summary.attempted,
                resolved: summary.resolved,
                failed: summary.failures.len() as u64,
            },
            failures: summary
                .failures
                .iter()
                .map(|f| JsonFailure {
                    address: f.address.clone(),
                    error: f.error.to_string(),
                })
                .collect(),
            latency: JsonLatency::from_histogram(summary.stats.latency()),
            centroid,
            centroid_error,
            per_worker,
        }
    }
}

/// Write a JSON report to a file
pub fn write_report(path: &Path, summary: &RunSummary, config: &Config) -> Result<()> {
    let report = JsonReport::build(summary, config);
    let file = File::create(path)
        .with_context(|| format!("Failed to create JSON report: {}", path.display()))?;
    serde_json::to_writer_pretty(file, &report).context("Failed to serialize JSON report")?;
    Ok(())
}
