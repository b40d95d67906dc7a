use anyhow::{anyhow, Result};
use geoconsensus_core::{entities::*, gateways::geocode::GeoCodingGateway};
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::{first_valid_point, http::get_json, resolve_or_missing};

pub const DEFAULT_API_BASE_URL: &str = "https://maps.googleapis.com/maps/api/geocode";

/// Google Geocoding API.
#[derive(Debug, Clone)]
pub struct Google {
    pub api_key: String,
    pub api_base_url: String,
    client: Client,
}

impl Google {
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

    fn geocode(&self, addr: &str) -> Result<Option<MapPoint>> {
        let url = format!("{}/json", self.api_base_url);
        let request = self
            .client
            .get(url)
            .query(&[("address", addr), ("key", self.api_key.as_str())]);
        first_location(get_json(request)?)
    }
}

impl GeoCodingGateway for Google {
    fn resolve_address_lat_lng(&self, addr: &str) -> Coordinate {
        resolve_or_missing(ProviderName::Google, addr, |addr| self.geocode(addr))
    }
}

#[derive(Debug, Deserialize)]
struct Response {
    status: String,
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<GeocodingResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
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

fn first_location(response: Response) -> Result<Option<MapPoint>> {
    let Response {
        status,
        error_message,
        results,
    } = response;
    match status.as_str() {
        "OK" => {
            let candidates = results
                .into_iter()
                .map(|r| (r.geometry.location.lat, r.geometry.location.lng));
            Ok(first_valid_point(ProviderName::Google, candidates))
        }
        "ZERO_RESULTS" => Ok(None),
        _ => Err(match error_message {
            Some(msg) => anyhow!("{status}: {msg}"),
            None => anyhow!("{status}"),
        }),
    }
}
