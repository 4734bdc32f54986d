//! Google Maps geocoding backend
//!
//! Queries the Google Maps geocoding API and takes the first result's
//! geometry location. The response carries a `status` string alongside the
//! result list; anything other than `OK` or `ZERO_RESULTS` is surfaced as a
//! rejection.

use super::{request_error, GeocodeError, Geocoder, GeocoderConfig};
use crate::coord::Coordinate;
use log::debug;
use serde::Deserialize;

const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Geocoder backed by the Google Maps geocoding API
pub struct GoogleGeocoder {
    client: reqwest::blocking::Client,
    api_key: String,
    region: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
    status: String,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl GoogleGeocoder {
    /// Create a backend with the key, timeout and optional region from `config`
    pub fn new(config: &GeocoderConfig) -> crate::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            region: config.region.clone(),
        })
    }
}

impl Geocoder for GoogleGeocoder {
    fn geocode(&self, address: &str) -> Result<Coordinate, GeocodeError> {
        let query = match &self.region {
            Some(region) => format!("{}, {}", address, region),
            None => address.to_string(),
        };

        let response: GeocodeResponse = self
            .client
            .get(GEOCODE_URL)
            .query(&[("address", query.as_str()), ("key", self.api_key.as_str())])
            .send()
            .map_err(request_error)?
            .json()
            .map_err(request_error)?;

        match response.status.as_str() {
            "OK" => {}
            "ZERO_RESULTS" => return Err(GeocodeError::NoMatches),
            other => return Err(GeocodeError::Rejected(other.to_string())),
        }

        let location = &response
            .results
            .first()
            .ok_or(GeocodeError::NoMatches)?
            .geometry
            .location;

        debug!(
            "google resolved '{}' to ({}, {})",
            address, location.lat, location.lng
        );
        Ok(Coordinate::new(location.lat, location.lng)?)
    }

    fn name(&self) -> &'static str {
        "google"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response_with_result() {
        let body = r#"{
            "results": [
                {"geometry": {"location": {"lat": 43.6065827, "lng": -79.6563887}}}
            ],
            "status": "OK"
        }"#;
        let response: GeocodeResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.status, "OK");
        assert_eq!(response.results[0].geometry.location.lat, 43.6065827);
    }

    #[test]
    fn test_parse_zero_results() {
        let body = r#"{"results": [], "status": "ZERO_RESULTS"}"#;
        let response: GeocodeResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.status, "ZERO_RESULTS");
        assert!(response.results.is_empty());
    }

    #[test]
    fn test_parse_ignores_extra_fields() {
        // Real responses carry address components, viewport bounds, place
        // ids etc. that the pipeline never looks at.
        let body = r#"{
            "results": [{
                "formatted_address": "74 Wingold Ave, North York, ON",
                "place_id": "abc123",
                "geometry": {
                    "location": {"lat": 43.7, "lng": -79.45},
                    "location_type": "ROOFTOP"
                }
            }],
            "status": "OK"
        }"#;
        let response: GeocodeResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.results[0].geometry.location.lng, -79.45);
    }
}
