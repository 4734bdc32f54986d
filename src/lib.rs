//! GeoCenter - Concurrent address geocoding and spherical centroid tool
//!
//! GeoCenter resolves a batch of street addresses to geographic coordinates
//! through a pluggable geocoding backend and computes the spherical centroid
//! of the resulting point set.
//!
//! # Architecture
//!
//! - **Pluggable geocoders**: Google, MapQuest, mock (for tests)
//! - **Bounded worker pool**: shared work queue, independent result channel
//! - **Spherical centroid**: mean unit-vector, safe near poles and antimeridian
//! - **Comprehensive stats**: per-call latency histograms, per-worker metrics

pub mod centroid;
pub mod config;
pub mod coord;
pub mod geocode;
pub mod output;
pub mod pipeline;
pub mod source;
pub mod stats;
pub mod util;

// Re-export commonly used types
pub use coord::Coordinate;
pub use geocode::Geocoder;
pub use pipeline::Pipeline;

/// Result type used throughout GeoCenter
pub type Result<T> = anyhow::Result<T>;
