//! GeoCenter CLI entry point

use anyhow::{Context, Result};
use geocenter::config::cli::{Cli, RunMode};
use geocenter::config::{cli_convert, toml as config_toml, validator, Config};
use geocenter::geocode::create_geocoder;
use geocenter::geocode::geoip::GeoIpClient;
use geocenter::output;
use geocenter::pipeline::{CancelToken, Pipeline};
use geocenter::source::AddressSource;
use std::time::Duration;

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    cli.validate()?;

    let default_level = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    println!("GeoCenter v{}", env!("CARGO_PKG_VERSION"));
    println!("Concurrent address geocoding and spherical centroid tool");
    println!();

    match cli.mode {
        RunMode::Resolve => run_resolve(cli),
        RunMode::LocateSelf => run_locate_self(cli),
    }
}

/// Resolve an address file and report its centroid
fn run_resolve(cli: Cli) -> Result<()> {
    let config = build_config_from_cli(&cli)?;

    validator::validate_config(&config).context("Configuration validation failed")?;
    print_configuration(&config);

    if cli.dry_run {
        println!();
        println!("Dry run mode - configuration validated successfully");
        return Ok(());
    }

    let input = config
        .input
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("Address file required"))?;
    let source = AddressSource::open(input)?;

    let geocoder = create_geocoder(
        config.geocoder.backend,
        &config.geocoder.to_geocoder_config(),
    )?;
    let pipeline = Pipeline::new(geocoder, config.workers.threads);

    println!();
    println!("Resolving addresses...");
    println!();

    let cancel = CancelToken::new();
    let summary = pipeline.run(source, &cancel);

    output::text::print_report(&summary, &config);

    if let Some(ref path) = config.output.json_output {
        output::json::write_report(path, &summary, &config)?;
        println!("JSON report written to {}", path.display());
    }

    if let Some(e) = summary.source_error {
        return Err(anyhow::Error::new(e).context("Address source failed mid-read"));
    }
    if let Err(e) = summary.centroid {
        anyhow::bail!("{}", e);
    }
    Ok(())
}

/// Locate this machine from its public IP and print the record
fn run_locate_self(cli: Cli) -> Result<()> {
    let timeout = match cli.timeout {
        Some(ref s) => cli_convert::parse_duration(s).context("Invalid timeout")?,
        None => Duration::from_secs(10),
    };

    let client = GeoIpClient::new(timeout)?;
    let record = client
        .locate_self()
        .context("Failed to locate this machine")?;

    println!("{}", record);
    println!();
    let coord = record.coordinate()?;
    println!("Coordinate: {}", coord);
    Ok(())
}

/// Build the run configuration from CLI arguments and an optional TOML file
fn build_config_from_cli(cli: &Cli) -> Result<Config> {
    let base = match &cli.config {
        Some(path) => config_toml::parse_toml_file(path)?,
        None => config_toml::parse_toml_string("")?,
    };
    config_toml::merge_cli_with_config(cli, base)
}

/// Print configuration summary
///
/// The API key is never echoed back.
fn print_configuration(config: &Config) {
    println!("Configuration:");
    if let Some(ref input) = config.input {
        println!("  Input: {}", input.display());
    }
    println!("  Geocoder:");
    println!("    Backend: {}", config.geocoder.backend);
    println!("    Timeout: {}s", config.geocoder.timeout_secs);
    if let Some(ref region) = config.geocoder.region {
        println!("    Region: {}", region);
    }
    println!("  Workers:");
    println!("    Threads: {}", config.workers.threads);
    if let Some(ref path) = config.output.json_output {
        println!("  Output:");
        println!("    JSON report: {}", path.display());
    }
}
