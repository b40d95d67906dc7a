use super::prelude::*;

/// Queries a fixed set of providers one after another.
pub struct Aggregator {
    providers: ProviderSet,
    gateways: Vec<Box<dyn GeoCodingGateway>>,
}

impl Aggregator {
    pub(crate) fn new(providers: ProviderSet, gateways: Vec<Box<dyn GeoCodingGateway>>) -> Self {
        debug_assert_eq!(providers.len(), gateways.len());
        Self {
            providers,
            gateways,
        }
    }

    pub fn providers(&self) -> &ProviderSet {
        &self.providers
    }

    /// Every configured provider is asked, even if others failed before.
    pub fn geocode(&self, address: &str) -> GeocodeResult {
        let mut gateways = self.gateways.iter();
        GeocodeResult::collect(&self.providers, |name| {
            let Some(gw) = gateways.next() else {
                debug_assert!(false, "No gateway for provider '{name}'");
                return Coordinate::Missing;
            };
            match gw.resolve_address_lat_lng(address) {
                Coordinate::Present(pt) if !pt.is_valid() => {
                    log::warn!(
                        "Provider '{name}' returned an invalid location for '{address}': {pt}"
                    );
                    Coordinate::Missing
                }
                Coordinate::Present(pt) => {
                    log::debug!("Provider '{name}' resolved '{address}': {pt}");
                    Coordinate::Present(pt)
                }
                Coordinate::Missing => {
                    log::debug!("Provider '{name}' could not resolve '{address}'");
                    Coordinate::Missing
                }
            }
        })
    }
}

impl std::fmt::Debug for Aggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Aggregator")
            .field("providers", &self.providers)
            .finish_non_exhaustive()
    }
}

pub fn geocode_address(
    aggregator: &Aggregator,
    metric: DisagreementMetric,
    address: &str,
) -> GeocodeRecord {
    let result = aggregator.geocode(address);
    let max_error = metric.evaluate(&result);
    log::info!(
        "Geocoded '{address}' with {} of {} provider(s): {max_error}",
        result.resolved_count(),
        result.len()
    );
    GeocodeRecord {
        address: address.to_string(),
        result,
        max_error,
    }
}
