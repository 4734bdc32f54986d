//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation.

pub mod cli;
pub mod cli_convert;
pub mod toml;
pub mod validator;

use crate::geocode::{BackendKind, GeocoderConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Complete run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Address file to resolve (not required for locate-self mode)
    pub input: Option<PathBuf>,
    #[serde(default)]
    pub geocoder: GeocoderSettings,
    #[serde(default)]
    pub workers: WorkerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Geocoding backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocoderSettings {
    /// Backend to resolve addresses with
    #[serde(default)]
    pub backend: BackendKind,
    /// API key for the selected backend
    #[serde(default)]
    pub api_key: String,
    /// Per-call timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Optional region suffix appended to every query (e.g. "CA")
    pub region: Option<String>,
}

impl GeocoderSettings {
    /// Build the backend constructor configuration
    pub fn to_geocoder_config(&self) -> GeocoderConfig {
        GeocoderConfig {
            api_key: self.api_key.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            region: self.region.clone(),
        }
    }
}

impl Default for GeocoderSettings {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
            region: None,
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

/// Worker pool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Number of resolver threads
    #[serde(default = "default_threads")]
    pub threads: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            threads: default_threads(),
        }
    }
}

fn default_threads() -> usize {
    num_cpus::get()
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// Write a JSON report to this path
    pub json_output: Option<PathBuf>,
    /// Show latency percentiles in the text report
    #[serde(default)]
    pub show_percentiles: bool,
    /// Show per-worker call counts in the text report
    #[serde(default)]
    pub per_worker_output: bool,
}
