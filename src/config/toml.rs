//! TOML configuration file parsing

use super::{cli::Cli, cli_convert, Config};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse a TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from a string
pub fn parse_toml_string(contents: &str) -> Result<Config> {
    let config: Config =
        ::toml::from_str(contents).context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Merge CLI arguments with TOML configuration (CLI takes precedence)
pub fn merge_cli_with_config(cli: &Cli, mut config: Config) -> Result<Config> {
    if let Some(ref input) = cli.input {
        config.input = Some(input.clone());
    }

    // Override geocoder settings
    if let Some(backend) = cli.backend {
        config.geocoder.backend = backend;
    }
    if let Some(ref api_key) = cli.api_key {
        config.geocoder.api_key = api_key.clone();
    }
    if let Some(ref timeout_str) = cli.timeout {
        let timeout = cli_convert::parse_duration(timeout_str).context("Invalid timeout")?;
        config.geocoder.timeout_secs = timeout.as_secs().max(1);
    }
    if let Some(ref region) = cli.region {
        config.geocoder.region = Some(region.clone());
    }

    // Override worker settings
    if let Some(workers) = cli.workers {
        config.workers.threads = workers;
    }

    // Override output settings
    if let Some(ref path) = cli.json_output {
        config.output.json_output = Some(path.clone());
    }
    if cli.show_percentiles {
        config.output.show_percentiles = true;
    }
    if cli.per_worker_output {
        config.output.per_worker_output = true;
    }

    Ok(config)
}
