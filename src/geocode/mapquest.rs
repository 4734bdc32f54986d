//! MapQuest geocoding backend
//!
//! Queries the MapQuest geocoding API and takes the first location of the
//! first result. MapQuest signals errors through `info.statuscode` (0 means
//! success) rather than HTTP status.

use super::{request_error, GeocodeError, Geocoder, GeocoderConfig};
use crate::coord::Coordinate;
use log::debug;
use serde::Deserialize;

const GEOCODE_URL: &str = "https://www.mapquestapi.com/geocoding/v1/address";

/// Geocoder backed by the MapQuest geocoding API
pub struct MapQuestGeocoder {
    client: reqwest::blocking::Client,
    api_key: String,
    region: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    info: Info,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct Info {
    statuscode: i32,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    #[serde(default)]
    locations: Vec<Location>,
}

#[derive(Debug, Deserialize)]
struct Location {
    #[serde(rename = "latLng")]
    lat_lng: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl MapQuestGeocoder {
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

impl Geocoder for MapQuestGeocoder {
    fn geocode(&self, address: &str) -> Result<Coordinate, GeocodeError> {
        let location = match &self.region {
            Some(region) => format!("{}, {}", address, region),
            None => address.to_string(),
        };

        let response: GeocodeResponse = self
            .client
            .get(GEOCODE_URL)
            .query(&[("key", self.api_key.as_str()), ("location", location.as_str())])
            .send()
            .map_err(request_error)?
            .json()
            .map_err(request_error)?;

        if response.info.statuscode != 0 {
            return Err(GeocodeError::Rejected(format!(
                "statuscode {}",
                response.info.statuscode
            )));
        }

        let lat_lng = &response
            .results
            .first()
            .and_then(|r| r.locations.first())
            .ok_or(GeocodeError::NoMatches)?
            .lat_lng;

        debug!(
            "mapquest resolved '{}' to ({}, {})",
            address, lat_lng.lat, lat_lng.lng
        );
        Ok(Coordinate::new(lat_lng.lat, lat_lng.lng)?)
    }

    fn name(&self) -> &'static str {
        "mapquest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response_with_location() {
        let body = r#"{
            "info": {"statuscode": 0},
            "results": [{
                "providedLocation": {"location": "120 Little Creek Road"},
                "locations": [{
                    "street": "120 Little Creek Rd",
                    "geocodeQuality": "POINT",
                    "latLng": {"lat": 43.54846, "lng": -79.58812}
                }]
            }]
        }"#;
        let response: GeocodeResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.info.statuscode, 0);
        assert_eq!(
            response.results[0].locations[0].lat_lng.lat,
            43.54846
        );
    }

    #[test]
    fn test_parse_error_statuscode() {
        let body = r#"{"info": {"statuscode": 403}, "results": []}"#;
        let response: GeocodeResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.info.statuscode, 403);
    }

    #[test]
    fn test_parse_empty_locations() {
        let body = r#"{
            "info": {"statuscode": 0},
            "results": [{"locations": []}]
        }"#;
        let response: GeocodeResponse = serde_json::from_str(body).unwrap();
        assert!(response.results[0].locations.is_empty());
    }
}
