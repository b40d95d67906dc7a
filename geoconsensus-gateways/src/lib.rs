//! Geocoding providers that are queried over HTTP.

pub mod arcgis;
pub mod bing;
pub mod google;
pub mod http;
pub mod opencage;
pub mod osm;

use anyhow::Result;
use geoconsensus_core::entities::{Coordinate, MapPoint, ProviderName};

/// Runs a provider query and turns every failure into a missing coordinate.
pub(crate) fn resolve_or_missing<F>(provider: ProviderName, addr: &str, query: F) -> Coordinate
where
    F: FnOnce(&str) -> Result<Option<MapPoint>>,
{
    let addr = addr.trim();
    if addr.is_empty() {
        log::warn!("Skip {provider} query for an empty address");
        return Coordinate::Missing;
    }
    match query(addr) {
        Ok(Some(pt)) => {
            log::debug!("Resolved address location '{addr}' with {provider}: {pt}");
            Coordinate::Present(pt)
        }
        Ok(None) => {
            log::warn!("{provider} found no location for '{addr}'");
            Coordinate::Missing
        }
        Err(err) => {
            log::warn!("Failed to resolve address location '{addr}' with {provider}: {err:#}");
            Coordinate::Missing
        }
    }
}

/// The first candidate with coordinates in the valid range.
pub(crate) fn first_valid_point<I>(provider: ProviderName, candidates: I) -> Option<MapPoint>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    candidates.into_iter().find_map(|(lat, lng)| {
        let pt = MapPoint::try_from_lat_lng_deg(lat, lng);
        if pt.is_none() {
            log::warn!("Ignore invalid location from {provider}: {lat},{lng}");
        }
        pt
    })
}
