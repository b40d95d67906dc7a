use crate::config::{self, GeocodingGateway};
use anyhow::Result;
use geoconsensus_core::{entities::ProviderName, registry::ProviderRegistry};
use geoconsensus_gateways::{
    arcgis::ArcGis, bing::Bing, google::Google, http, opencage::OpenCage, osm::Nominatim,
};

/// Registers one gateway for each configured provider.
///
/// All gateways share a single HTTP client.
pub fn geocoding_registry(cfg: &config::Geocoding) -> Result<ProviderRegistry> {
    let client = http::client(cfg.timeout)?;
    let mut registry = ProviderRegistry::new();
    for gw in &cfg.gateways {
        let gw = gw.clone();
        let client = client.clone();
        match gw {
            GeocodingGateway::ArcGis { api_base_url } => {
                log::info!("Use ArcGIS geocoding gateway");
                let gw = match api_base_url {
                    Some(url) => ArcGis::with_api_base_url(client, url),
                    None => ArcGis::new(client),
                };
                registry.register(ProviderName::Arcgis, gw);
            }
            GeocodingGateway::Google {
                api_key,
                api_base_url,
            } => {
                log::info!("Use Google geocoding gateway");
                let gw = match api_base_url {
                    Some(url) => Google::with_api_base_url(client, api_key, url),
                    None => Google::new(client, api_key),
                };
                registry.register(ProviderName::Google, gw);
            }
            GeocodingGateway::Bing {
                api_key,
                api_base_url,
            } => {
                log::info!("Use Bing geocoding gateway");
                let gw = match api_base_url {
                    Some(url) => Bing::with_api_base_url(client, api_key, url),
                    None => Bing::new(client, api_key),
                };
                registry.register(ProviderName::Bing, gw);
            }
            GeocodingGateway::OpenCage {
                api_key,
                api_base_url,
            } => {
                log::info!("Use OpenCage geocoding gateway");
                let gw = match api_base_url {
                    Some(url) => OpenCage::with_api_base_url(client, api_key, url),
                    None => OpenCage::new(client, api_key),
                };
                registry.register(ProviderName::Opencage, gw);
            }
            GeocodingGateway::Nominatim { api_base_url } => {
                match &api_base_url {
                    Some(url) => log::info!("Use Nominatim geocoding gateway at {url}"),
                    None => log::info!("Use Nominatim geocoding gateway"),
                }
                let gw = match api_base_url {
                    Some(url) => Nominatim::with_api_base_url(client, url),
                    None => Nominatim::new(client),
                };
                registry.register(ProviderName::Osm, gw);
            }
        }
    }
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn register_all_configured_providers() {
        let providers = geoconsensus_core::entities::ProviderSet::new(vec![
            ProviderName::Osm,
            ProviderName::Bing,
        ])
        .unwrap();
        let cfg = config::Geocoding {
            providers: providers.clone(),
            metric: Default::default(),
            timeout: Duration::from_secs(1),
            gateways: vec![
                GeocodingGateway::Nominatim {
                    api_base_url: Some("http://localhost:1".into()),
                },
                GeocodingGateway::Bing {
                    api_key: "key".into(),
                    api_base_url: None,
                },
            ],
        };
        let registry = geocoding_registry(&cfg).unwrap();
        assert!(registry.is_registered(ProviderName::Osm));
        assert!(registry.is_registered(ProviderName::Bing));
        assert!(!registry.is_registered(ProviderName::Google));
        let aggregator = registry.into_aggregator(providers).unwrap();
        assert_eq!(2, aggregator.providers().len());
    }
}
