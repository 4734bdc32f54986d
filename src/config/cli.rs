//! CLI argument parsing using clap

use crate::geocode::BackendKind;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Execution mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RunMode {
    /// Resolve an address file and compute its centroid (default)
    Resolve,
    /// Locate this machine from its public IP and exit
    LocateSelf,
}

/// GeoCenter - Concurrent address geocoding and spherical centroid tool
#[derive(Parser, Debug)]
#[command(name = "geocenter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Execution mode: resolve or locate-self
    #[arg(long, value_enum, default_value = "resolve")]
    pub mode: RunMode,

    /// Address file (UTF-8, one address per line, blank lines ignored)
    ///
    /// Not required in locate-self mode
    #[arg(value_name = "ADDRESS_FILE")]
    pub input: Option<PathBuf>,

    /// TOML configuration file; CLI flags override its values
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    // === Geocoder Options ===
    /// Geocoding backend to use
    #[arg(long, value_enum)]
    pub backend: Option<BackendKind>,

    /// API key for the selected backend
    #[arg(long, env = "GEOCODER_API_KEY")]
    pub api_key: Option<String>,

    /// Per-call timeout (e.g., 500ms, 10s, 1m)
    #[arg(long)]
    pub timeout: Option<String>,

    /// Region suffix appended to every query (e.g., "CA")
    #[arg(long)]
    pub region: Option<String>,

    // === Worker Options ===
    /// Number of worker threads (default: CPU count)
    #[arg(short = 'w', long)]
    pub workers: Option<usize>,

    // === Output Options ===
    /// Write a JSON report to this path
    #[arg(long)]
    pub json_output: Option<PathBuf>,

    /// Show latency percentiles in the text report
    #[arg(long)]
    pub show_percentiles: bool,

    /// Show per-worker call counts in the text report
    #[arg(long)]
    pub per_worker_output: bool,

    // === Runtime Options ===
    /// Validate configuration and exit without resolving anything
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Cheap argument-level checks that don't need the merged config
    pub fn validate(&self) -> Result<()> {
        if let Some(workers) = self.workers {
            if workers == 0 {
                anyhow::bail!("--workers must be at least 1");
            }
        }
        Ok(())
    }
}
