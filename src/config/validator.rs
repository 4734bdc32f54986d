//! Configuration validation

use super::Config;
use anyhow::Result;

/// Maximum worker thread count
///
/// A cap on fan-out: beyond this the tool is just hammering the geocoding
/// service, not getting faster.
const MAX_WORKERS: usize = 1024;

/// Validate a merged configuration before a resolve run
pub fn validate_config(config: &Config) -> Result<()> {
    if config.input.is_none() {
        anyhow::bail!("Address file required (pass it as the positional argument)");
    }

    if config.workers.threads == 0 {
        anyhow::bail!("Worker thread count must be at least 1");
    }
    if config.workers.threads > MAX_WORKERS {
        anyhow::bail!(
            "Worker thread count {} exceeds maximum {}",
            config.workers.threads,
            MAX_WORKERS
        );
    }

    if config.geocoder.timeout_secs == 0 {
        anyhow::bail!("Geocode timeout must be at least 1 second");
    }

    if config.geocoder.api_key.is_empty() {
        anyhow::bail!(
            "API key required for the {} backend (pass --api-key or set GEOCODER_API_KEY)",
            config.geocoder.backend
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GeocoderSettings, OutputConfig, WorkerConfig};
    use std::path::PathBuf;

    fn valid_config() -> Config {
        Config {
            input: Some(PathBuf::from("addresses.txt")),
            geocoder: GeocoderSettings {
                api_key: "key123".into(),
                ..Default::default()
            },
            workers: WorkerConfig { threads: 4 },
            output: OutputConfig::default(),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_missing_input_rejected() {
        let mut config = valid_config();
        config.input = None;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let mut config = valid_config();
        config.workers.threads = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_excessive_workers_rejected() {
        let mut config = valid_config();
        config.workers.threads = 4096;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = valid_config();
        config.geocoder.timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_missing_api_key_rejected() {
        let mut config = valid_config();
        config.geocoder.api_key.clear();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("API key"));
    }
}
