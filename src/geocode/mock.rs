//! Mock geocoding backend for testing
//!
//! Resolves addresses from a scripted in-memory table instead of calling a
//! network service, making pipeline tests fast and deterministic.
//!
//! # Features
//!
//! - Scripted coordinate per address
//! - Failure injection for individual addresses or for every call
//! - Optional simulated call latency
//! - Thread-safe call recording for verification
//!
//! # Example
//!
//! ```
//! use geocenter::geocode::mock::MockGeocoder;
//! use geocenter::geocode::Geocoder;
//! use geocenter::coord::Coordinate;
//!
//! let mock = MockGeocoder::new();
//! mock.insert("74 Wingold Avenue", Coordinate::new(43.7, -79.45).unwrap());
//!
//! let coord = mock.geocode("74 Wingold Avenue").unwrap();
//! assert_eq!(coord.latitude(), 43.7);
//! assert_eq!(mock.call_count(), 1);
//! ```

use super::{GeocodeError, Geocoder};
use crate::coord::Coordinate;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

/// Scripted geocoder for tests
///
/// All state lives behind mutexes so a single instance can be shared by
/// concurrent pipeline workers, exactly like a real backend.
#[derive(Default)]
pub struct MockGeocoder {
    /// Scripted address -> coordinate table
    responses: Mutex<HashMap<String, Coordinate>>,

    /// Addresses that always fail
    failing: Mutex<HashSet<String>>,

    /// Whether every call should fail regardless of scripting
    fail_all: Mutex<bool>,

    /// Simulated latency applied to every call
    delay: Mutex<Option<Duration>>,

    /// Every address this mock was asked to resolve, in call order
    calls: Mutex<Vec<String>>,
}

impl MockGeocoder {
    /// Create a mock with no scripted responses
    ///
    /// Unscripted addresses resolve to `GeocodeError::NoMatches`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a coordinate for an address
    pub fn insert(&self, address: &str, coord: Coordinate) {
        self.responses
            .lock()
            .unwrap()
            .insert(address.to_string(), coord);
    }

    /// Make one address always fail with a timeout error
    pub fn fail_address(&self, address: &str) {
        self.failing.lock().unwrap().insert(address.to_string());
    }

    /// Make every call fail regardless of scripted responses
    pub fn set_fail_all(&self, fail_all: bool) {
        *self.fail_all.lock().unwrap() = fail_all;
    }

    /// Simulate per-call latency
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    /// Addresses resolved so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of geocode calls made
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Geocoder for MockGeocoder {
    fn geocode(&self, address: &str) -> Result<Coordinate, GeocodeError> {
        self.calls.lock().unwrap().push(address.to_string());

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            std::thread::sleep(delay);
        }

        if *self.fail_all.lock().unwrap() {
            return Err(GeocodeError::Transport("mock transport failure".into()));
        }
        if self.failing.lock().unwrap().contains(address) {
            return Err(GeocodeError::Timeout);
        }

        self.responses
            .lock()
            .unwrap()
            .get(address)
            .copied()
            .ok_or(GeocodeError::NoMatches)
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn test_scripted_response() {
        let mock = MockGeocoder::new();
        mock.insert("Square One, Mississauga", coord(43.593, -79.642));

        let resolved = mock.geocode("Square One, Mississauga").unwrap();
        assert_eq!(resolved, coord(43.593, -79.642));
    }

    #[test]
    fn test_unscripted_address_has_no_matches() {
        let mock = MockGeocoder::new();
        assert!(matches!(
            mock.geocode("nowhere"),
            Err(GeocodeError::NoMatches)
        ));
    }

    #[test]
    fn test_failure_injection() {
        let mock = MockGeocoder::new();
        mock.insert("good", coord(1.0, 2.0));
        mock.fail_address("good");

        assert!(matches!(mock.geocode("good"), Err(GeocodeError::Timeout)));
    }

    #[test]
    fn test_fail_all() {
        let mock = MockGeocoder::new();
        mock.insert("good", coord(1.0, 2.0));
        mock.set_fail_all(true);

        assert!(matches!(
            mock.geocode("good"),
            Err(GeocodeError::Transport(_))
        ));

        mock.set_fail_all(false);
        assert!(mock.geocode("good").is_ok());
    }

    #[test]
    fn test_call_recording() {
        let mock = MockGeocoder::new();
        mock.insert("a", coord(1.0, 1.0));

        let _ = mock.geocode("a");
        let _ = mock.geocode("b");

        assert_eq!(mock.calls(), vec!["a", "b"]);
        assert_eq!(mock.call_count(), 2);
    }
}
