use anyhow::{anyhow, Result};
use geoconsensus_core::{entities::*, gateways::geocode::GeoCodingGateway};
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::{first_valid_point, http::get_json, resolve_or_missing};

pub const DEFAULT_API_BASE_URL: &str = "https://api.opencagedata.com/geocode/v1";

/// OpenCage Geocoding API.
#[derive(Debug, Clone)]
pub struct OpenCage {
    pub api_key: String,
    pub api_base_url: String,
    client: Client,
}

impl OpenCage {
    pub fn new(client: Client, api_key: String) -> Self {
        Self::with_api_base_url(client, api_key, DEFAULT_API_BASE_URL.to_string())
    }

    pub fn with_api_base_url(client: Client, api_key: String, api_base_url: String) -> Self {
        Self {
            api_key,
            api_base_url,
            client,
        }
    }

    fn forward(&self, addr: &str) -> Result<Option<MapPoint>> {
        let url = format!("{}/json", self.api_base_url);
        let request = self.client.get(url).query(&[
            ("q", addr),
            ("key", self.api_key.as_str()),
            ("limit", "1"),
            ("no_annotations", "1"),
        ]);
        first_location(get_json(request)?)
    }
}

impl GeoCodingGateway for OpenCage {
    fn resolve_address_lat_lng(&self, addr: &str) -> Coordinate {
        resolve_or_missing(ProviderName::Opencage, addr, |addr| self.forward(addr))
    }
}

#[derive(Debug, Deserialize)]
struct Response {
    status: Status,
    #[serde(default)]
    results: Vec<GeocodingResult>,
}

#[derive(Debug, Deserialize)]
struct Status {
    code: u16,
    message: String,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    lat: f64,
    lng: f64,
}

fn first_location(response: Response) -> Result<Option<MapPoint>> {
    let Response { status, results } = response;
    if status.code != 200 {
        return Err(anyhow!("{}: {}", status.code, status.message));
    }
    let candidates = results
        .into_iter()
        .map(|r| (r.geometry.lat, r.geometry.lng));
    Ok(first_valid_point(ProviderName::Opencage, candidates))
}
