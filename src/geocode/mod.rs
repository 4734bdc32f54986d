//! Geocoding backend abstraction
//!
//! This module defines the core abstraction for geocoding backends. A
//! backend resolves one street address to a [`Coordinate`] or a typed error.
//! The pipeline treats backends as black boxes: any implementation works as
//! long as it honors the `Geocoder` contract.
//!
//! # Backends
//!
//! - **MapQuest**: MapQuest open geocoding API (JSON)
//! - **Google**: Google Maps geocoding API (JSON)
//! - **Mock**: scripted in-memory backend for tests
//!
//! Credentials and per-call timeouts are injected through
//! [`GeocoderConfig`]; backends never read process-wide state.
//!
//! # Thread Safety
//!
//! Backends must be `Send + Sync`: a single instance is shared by all
//! pipeline workers and its `geocode` calls run concurrently. Implementations
//! must not require callers to hold a lock across the network call.

use crate::coord::{Coordinate, CoordinateError};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

pub mod geoip;
pub mod google;
pub mod mapquest;
pub mod mock;

/// Error returned by a geocoding backend for a single address
///
/// These errors are recoverable at the pipeline level: the failing address
/// is recorded and excluded from the centroid, and the run continues.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// The request exceeded the configured per-call timeout
    #[error("geocode request timed out")]
    Timeout,

    /// The request could not be sent or the response not received
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend answered but rejected the request
    #[error("backend rejected request: {0}")]
    Rejected(String),

    /// The backend returned zero candidate matches for the address
    #[error("no matches for address")]
    NoMatches,

    /// The response body could not be decoded
    #[error("failed to decode backend response: {0}")]
    Decode(String),

    /// The backend returned an out-of-range coordinate
    #[error("backend returned invalid coordinate: {0}")]
    InvalidCoordinate(#[from] CoordinateError),
}

/// Geocoding backend trait
///
/// Resolves a single address to a coordinate. Each call is independent and
/// side-effect-free with respect to other calls, which is what allows the
/// pipeline to run many of them concurrently.
pub trait Geocoder: Send + Sync {
    /// Resolve an address to a coordinate
    ///
    /// The pipeline always takes the first/best match the backend offers;
    /// candidate disambiguation is out of scope.
    ///
    /// # Errors
    ///
    /// Returns a [`GeocodeError`] describing why resolution failed. A
    /// timed-out call must map to `GeocodeError::Timeout`.
    fn geocode(&self, address: &str) -> Result<Coordinate, GeocodeError>;

    /// Short backend name for logs and reports
    fn name(&self) -> &'static str;
}

/// Backend configuration
///
/// Credentials are passed explicitly here rather than read from globals, so
/// the pipeline core never touches them.
#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    /// API key for the selected backend
    pub api_key: String,

    /// Per-call timeout applied by the HTTP client
    pub timeout: Duration,

    /// Optional region suffix appended to every query (e.g. "CA")
    pub region: Option<String>,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            timeout: Duration::from_secs(10),
            region: None,
        }
    }
}

/// Selectable geocoding backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// MapQuest geocoding API (default)
    Mapquest,
    /// Google Maps geocoding API
    Google,
}

impl Default for BackendKind {
    fn default() -> Self {
        BackendKind::Mapquest
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Mapquest => write!(f, "mapquest"),
            BackendKind::Google => write!(f, "google"),
        }
    }
}

/// Create a geocoder for the selected backend
///
/// Returns the backend behind an `Arc` so it can be shared by all workers.
pub fn create_geocoder(
    kind: BackendKind,
    config: &GeocoderConfig,
) -> crate::Result<Arc<dyn Geocoder>> {
    let geocoder: Arc<dyn Geocoder> = match kind {
        BackendKind::Mapquest => Arc::new(mapquest::MapQuestGeocoder::new(config)?),
        BackendKind::Google => Arc::new(google::GoogleGeocoder::new(config)?),
    };
    Ok(geocoder)
}

/// Map a reqwest error to the matching `GeocodeError` variant
pub(crate) fn request_error(e: reqwest::Error) -> GeocodeError {
    if e.is_timeout() {
        GeocodeError::Timeout
    } else if e.is_decode() {
        GeocodeError::Decode(e.to_string())
    } else {
        GeocodeError::Transport(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_kind_display() {
        assert_eq!(BackendKind::Mapquest.to_string(), "mapquest");
        assert_eq!(BackendKind::Google.to_string(), "google");
    }

    #[test]
    fn test_default_config() {
        let config = GeocoderConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.api_key.is_empty());
        assert!(config.region.is_none());
    }

    #[test]
    fn test_geocode_error_from_coordinate_error() {
        let err: GeocodeError = CoordinateError::LatitudeOutOfRange(99.0).into();
        assert!(matches!(err, GeocodeError::InvalidCoordinate(_)));
    }
}
