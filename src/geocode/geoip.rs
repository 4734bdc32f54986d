//! IP geolocation
//!
//! Resolves the machine's public IP address to a coarse geographic location
//! via a freegeoip-style JSON endpoint. Backs the `locate-self` CLI mode.

use super::{request_error, GeocodeError};
use crate::coord::Coordinate;
use log::debug;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

const PUBLIC_IP_URL: &str = "http://whatismyip.akamai.com/";
const GEOIP_URL: &str = "https://freegeoip.app/json";

/// Geolocation record for an IP address
#[derive(Debug, Clone, Deserialize)]
pub struct GeoIpRecord {
    pub ip: String,
    #[serde(default)]
    pub country_code: String,
    #[serde(default)]
    pub country_name: String,
    #[serde(default)]
    pub region_code: String,
    #[serde(default)]
    pub region_name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zipcode: String,
    #[serde(rename = "latitude")]
    pub lat: f64,
    #[serde(rename = "longitude")]
    pub long: f64,
    #[serde(default)]
    pub metro_code: i32,
}

impl GeoIpRecord {
    /// The record's position as a validated coordinate
    pub fn coordinate(&self) -> Result<Coordinate, GeocodeError> {
        Ok(Coordinate::new(self.lat, self.long)?)
    }
}

impl fmt::Display for GeoIpRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "IP Geo-Location:")?;
        writeln!(f, "  IP address:   {}", self.ip)?;
        writeln!(f, "  Country code: {}", self.country_code)?;
        writeln!(f, "  Country name: {}", self.country_name)?;
        writeln!(f, "  City:         {}", self.city)?;
        writeln!(f, "  Zip code:     {}", self.zipcode)?;
        writeln!(f, "  Latitude:     {:.6}", self.lat)?;
        writeln!(f, "  Longitude:    {:.6}", self.long)?;
        write!(f, "  Metro code:   {}", self.metro_code)
    }
}

/// Client for public-IP discovery and IP geolocation
pub struct GeoIpClient {
    client: reqwest::blocking::Client,
    geoip_url: String,
}

impl GeoIpClient {
    /// Create a client with the given per-call timeout
    pub fn new(timeout: Duration) -> crate::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            geoip_url: GEOIP_URL.to_string(),
        })
    }

    /// Override the geolocation endpoint (used by tests)
    pub fn with_geoip_url(mut self, url: &str) -> Self {
        self.geoip_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Discover this machine's public IP address
    pub fn public_ip(&self) -> Result<String, GeocodeError> {
        let body = self
            .client
            .get(PUBLIC_IP_URL)
            .send()
            .map_err(request_error)?
            .text()
            .map_err(request_error)?;
        Ok(body.trim().to_string())
    }

    /// Look up the geolocation record for an IP address
    pub fn locate(&self, ip: &str) -> Result<GeoIpRecord, GeocodeError> {
        let url = format!("{}/{}", self.geoip_url, ip);
        let record: GeoIpRecord = self
            .client
            .get(&url)
            .send()
            .map_err(request_error)?
            .json()
            .map_err(request_error)?;
        debug!("located {} at ({}, {})", ip, record.lat, record.long);
        Ok(record)
    }

    /// Locate this machine from its public IP
    pub fn locate_self(&self) -> Result<GeoIpRecord, GeocodeError> {
        let ip = self.public_ip()?;
        self.locate(&ip)
    }
}
