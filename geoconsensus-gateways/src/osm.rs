use anyhow::Result;
use geoconsensus_core::{entities::*, gateways::geocode::GeoCodingGateway};
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::{first_valid_point, http::get_json, resolve_or_missing};

pub const DEFAULT_API_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Nominatim search on OpenStreetMap data.
///
/// The public instance is free but allows at most one request
/// per second. Point `api_base_url` to a private instance
/// for larger batches.
#[derive(Debug, Clone)]
pub struct Nominatim {
    pub api_base_url: String,
    client: Client,
}

impl Nominatim {
    pub fn new(client: Client) -> Self {
        Self::with_api_base_url(client, DEFAULT_API_BASE_URL.to_string())
    }

    pub fn with_api_base_url(client: Client, api_base_url: String) -> Self {
        Self {
            api_base_url,
            client,
        }
    }

    fn search(&self, addr: &str) -> Result<Option<MapPoint>> {
        let url = format!("{}/search", self.api_base_url);
        let request = self
            .client
            .get(url)
            .query(&[("q", addr), ("format", "jsonv2"), ("limit", "1")]);
        first_location(get_json(request)?)
    }
}

impl GeoCodingGateway for Nominatim {
    fn resolve_address_lat_lng(&self, addr: &str) -> Coordinate {
        resolve_or_missing(ProviderName::Osm, addr, |addr| self.search(addr))
    }
}

// Nominatim encodes the coordinates as strings
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

fn first_location(places: Vec<Place>) -> Result<Option<MapPoint>> {
    let mut candidates = Vec::with_capacity(places.len());
    for Place { lat, lon } in places {
        candidates.push((lat.parse::<f64>()?, lon.parse::<f64>()?));
    }
    Ok(first_valid_point(ProviderName::Osm, candidates))
}
