//! Geographic coordinate value type
//!
//! A `Coordinate` is an immutable latitude/longitude pair in degrees. It is
//! produced by geocoding backends (or test fixtures) and consumed by the
//! centroid accumulator; it is never mutated after construction.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error returned when constructing a coordinate from out-of-range values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    /// Latitude outside [-90, 90] degrees
    #[error("latitude {0} out of range [-90, 90]")]
    LatitudeOutOfRange(f64),

    /// Longitude outside [-180, 180] degrees
    #[error("longitude {0} out of range [-180, 180]")]
    LongitudeOutOfRange(f64),

    /// Latitude or longitude is NaN or infinite
    #[error("coordinate component is not finite")]
    NotFinite,
}

/// A geographic point in degrees
///
/// Two coordinates with equal latitude and longitude are interchangeable;
/// the type carries no identity beyond its values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Create a coordinate, validating that both components are finite and
    /// within the conventional degree ranges
    ///
    /// # Errors
    ///
    /// Returns `CoordinateError` if latitude is outside [-90, 90], longitude
    /// is outside [-180, 180], or either component is NaN/infinite.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(CoordinateError::NotFinite);
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees, [-90, 90]
    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees, [-180, 180]
    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Coordinate {
    /// Fixed 6-decimal precision, the precision used for all coordinate
    /// display in the tool
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid() {
        let c = Coordinate::new(43.6065827, -79.6563887).unwrap();
        assert_eq!(c.latitude(), 43.6065827);
        assert_eq!(c.longitude(), -79.6563887);
    }

    #[test]
    fn test_new_boundaries() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(Coordinate::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_new_latitude_out_of_range() {
        assert_eq!(
            Coordinate::new(90.5, 0.0),
            Err(CoordinateError::LatitudeOutOfRange(90.5))
        );
        assert_eq!(
            Coordinate::new(-91.0, 0.0),
            Err(CoordinateError::LatitudeOutOfRange(-91.0))
        );
    }

    #[test]
    fn test_new_longitude_out_of_range() {
        assert_eq!(
            Coordinate::new(0.0, 180.1),
            Err(CoordinateError::LongitudeOutOfRange(180.1))
        );
    }

    #[test]
    fn test_new_not_finite() {
        assert_eq!(
            Coordinate::new(f64::NAN, 0.0),
            Err(CoordinateError::NotFinite)
        );
        assert_eq!(
            Coordinate::new(0.0, f64::INFINITY),
            Err(CoordinateError::NotFinite)
        );
    }

    #[test]
    fn test_display_six_decimals() {
        let c = Coordinate::new(43.6065827, -79.6563887).unwrap();
        assert_eq!(c.to_string(), "43.606583, -79.656389");

        let origin = Coordinate::new(0.0, 0.0).unwrap();
        assert_eq!(origin.to_string(), "0.000000, 0.000000");
    }
}
