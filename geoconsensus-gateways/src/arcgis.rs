use anyhow::{anyhow, Result};
use geoconsensus_core::{entities::*, gateways::geocode::GeoCodingGateway};
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::{first_valid_point, http::get_json, resolve_or_missing};

pub const DEFAULT_API_BASE_URL: &str =
    "https://geocode.arcgis.com/arcgis/rest/services/World/GeocodeServer";

/// ArcGIS World Geocoding Service.
///
/// Search requests without a token are free.
#[derive(Debug, Clone)]
pub struct ArcGis {
    pub api_base_url: String,
    client: Client,
}

impl ArcGis {
    pub fn new(client: Client) -> Self {
        Self::with_api_base_url(client, DEFAULT_API_BASE_URL.to_string())
    }

    pub fn with_api_base_url(client: Client, api_base_url: String) -> Self {
        Self {
            api_base_url,
            client,
        }
    }

    fn find_address_candidates(&self, addr: &str) -> Result<Option<MapPoint>> {
        let url = format!("{}/findAddressCandidates", self.api_base_url);
        let request = self.client.get(url).query(&[
            ("SingleLine", addr),
            ("f", "json"),
            ("maxLocations", "1"),
        ]);
        first_location(get_json(request)?)
    }
}

impl GeoCodingGateway for ArcGis {
    fn resolve_address_lat_lng(&self, addr: &str) -> Coordinate {
        resolve_or_missing(ProviderName::Arcgis, addr, |addr| {
            self.find_address_candidates(addr)
        })
    }
}

#[derive(Debug, Deserialize)]
struct Response {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<JsonError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    location: Location,
}

// ArcGIS uses x = longitude, y = latitude
#[derive(Debug, Deserialize)]
struct Location {
    x: f64,
    y: f64,
}

#[derive(Debug, Deserialize, thiserror::Error)]
#[error("{code}: {message}")]
struct JsonError {
    code: i64,
    message: String,
}

// The service reports errors with HTTP 200
fn first_location(response: Response) -> Result<Option<MapPoint>> {
    if let Some(err) = response.error {
        return Err(anyhow!(err));
    }
    let candidates = response
        .candidates
        .into_iter()
        .map(|c| (c.location.y, c.location.x));
    Ok(first_valid_point(ProviderName::Arcgis, candidates))
}
