use anyhow::{anyhow, Result};
use geoconsensus_core::{entities::*, gateways::geocode::GeoCodingGateway};
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::{first_valid_point, http::get_json, resolve_or_missing};

pub const DEFAULT_API_BASE_URL: &str = "https://dev.virtualearth.net/REST/v1";

/// Bing Maps Locations API.
#[derive(Debug, Clone)]
pub struct Bing {
    pub api_key: String,
    pub api_base_url: String,
    client: Client,
}

impl Bing {
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

    fn find_location(&self, addr: &str) -> Result<Option<MapPoint>> {
        let url = format!("{}/Locations", self.api_base_url);
        let request = self.client.get(url).query(&[
            ("query", addr),
            ("maxResults", "1"),
            ("key", self.api_key.as_str()),
        ]);
        first_location(get_json(request)?)
    }
}

impl GeoCodingGateway for Bing {
    fn resolve_address_lat_lng(&self, addr: &str) -> Coordinate {
        resolve_or_missing(ProviderName::Bing, addr, |addr| self.find_location(addr))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Response {
    status_code: u16,
    #[serde(default)]
    error_details: Vec<String>,
    #[serde(default)]
    resource_sets: Vec<ResourceSet>,
}

#[derive(Debug, Deserialize)]
struct ResourceSet {
    #[serde(default)]
    resources: Vec<Resource>,
}

#[derive(Debug, Deserialize)]
struct Resource {
    point: Point,
}

// GeoJSON-like, but in lat, lng order
#[derive(Debug, Deserialize)]
struct Point {
    coordinates: (f64, f64),
}

fn first_location(response: Response) -> Result<Option<MapPoint>> {
    if response.status_code != 200 {
        return Err(anyhow!(
            "status {}: {}",
            response.status_code,
            response.error_details.join("; ")
        ));
    }
    let candidates = response
        .resource_sets
        .into_iter()
        .flat_map(|set| set.resources)
        .map(|r| r.point.coordinates);
    Ok(first_valid_point(ProviderName::Bing, candidates))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_resources() {
        let json = r#"{
            "authenticationResultCode": "ValidCredentials",
            "resourceSets": [
                {
                    "estimatedTotal": 1,
                    "resources": [
                        {
                            "name": "Calle 131A 9, Bogotá, Colombia",
                            "point": { "type": "Point", "coordinates": [4.71702, -74.03419] },
                            "confidence": "Medium"
                        }
                    ]
                }
            ],
            "statusCode": 200,
            "statusDescription": "OK"
        }"#;
        let response: Response = serde_json::from_str(json).unwrap();
        let pt = first_location(response).unwrap().unwrap();
        assert_eq!((4.71702, -74.03419), pt.to_lat_lng_deg());
    }

    #[test]
    fn no_resources() {
        let json = r#"{
            "resourceSets": [ { "estimatedTotal": 0, "resources": [] } ],
            "statusCode": 200
        }"#;
        let response: Response = serde_json::from_str(json).unwrap();
        assert_eq!(None, first_location(response).unwrap());
    }

    #[test]
    fn invalid_credentials() {
        let json = r#"{
            "authenticationResultCode": "InvalidCredentials",
            "errorDetails": ["Access was denied. You may have entered your credentials incorrectly."],
            "resourceSets": [],
            "statusCode": 401,
            "statusDescription": "Unauthorized"
        }"#;
        let response: Response = serde_json::from_str(json).unwrap();
        assert!(first_location(response)
            .unwrap_err()
            .to_string()
            .starts_with("status 401: Access was denied."));
    }
}
