use anyhow::{anyhow, Context as _, Result};
use geoconsensus_core::{entities::*, metric::DisagreementMetric};
use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "geoconsensus.toml";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const ENV_API_KEYS: [(ProviderName, &str); 3] = [
    (ProviderName::Google, "GOOGLE_API_KEY"),
    (ProviderName::Bing, "BING_API_KEY"),
    (ProviderName::Opencage, "OPENCAGE_API_KEY"),
];

#[derive(Debug)]
pub struct Config {
    pub geocoding: Geocoding,
    pub address: AddressDefaults,
    pub output: Output,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let mut raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)
                .with_context(|| format!("Invalid configuration file {}", file_path.display()))?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        for (provider, var_name) in ENV_API_KEYS {
            if let Ok(api_key) = env::var(var_name) {
                log::debug!("Use {provider} API key from {var_name}");
                set_api_key(&mut raw_config, provider, api_key);
            }
        }
        Self::try_from(raw_config)
    }
}

#[derive(Debug)]
pub struct Geocoding {
    pub providers: ProviderSet,
    pub metric: DisagreementMetric,
    pub timeout: Duration,
    /// One gateway per configured provider, in configured order.
    pub gateways: Vec<GeocodingGateway>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeocodingGateway {
    ArcGis {
        api_base_url: Option<String>,
    },
    Google {
        api_key: String,
        api_base_url: Option<String>,
    },
    Bing {
        api_key: String,
        api_base_url: Option<String>,
    },
    OpenCage {
        api_key: String,
        api_base_url: Option<String>,
    },
    Nominatim {
        api_base_url: Option<String>,
    },
}

/// Completes the addresses before they are geocoded.
#[derive(Debug, Clone, Default)]
pub struct AddressDefaults {
    pub city: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug)]
pub struct Output {
    pub file: PathBuf,
}

fn set_api_key(cfg: &mut raw::Config, provider: ProviderName, api_key: String) {
    let gateway = cfg.gateway.get_or_insert_with(Default::default);
    let provider_cfg = match provider {
        ProviderName::Arcgis => &mut gateway.arcgis,
        ProviderName::Google => &mut gateway.google,
        ProviderName::Bing => &mut gateway.bing,
        ProviderName::Opencage => &mut gateway.opencage,
        ProviderName::Osm => &mut gateway.osm,
    };
    provider_cfg.get_or_insert_with(Default::default).api_key = Some(api_key);
}

fn parse_providers(names: Vec<String>) -> Result<ProviderSet> {
    let providers = names
        .iter()
        .map(|name| {
            name.parse::<ProviderName>().map_err(|_| {
                let supported = supported_provider_names().join(", ");
                anyhow!("Unsupported geocoding provider '{name}' (supported: {supported})")
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(ProviderSet::new(providers)?)
}

fn supported_provider_names() -> Vec<&'static str> {
    ProviderName::all().map(ProviderName::as_str).collect()
}

fn gateway_config(gateway: &raw::Gateway, provider: ProviderName) -> Result<GeocodingGateway> {
    let raw_provider = match provider {
        ProviderName::Arcgis => &gateway.arcgis,
        ProviderName::Google => &gateway.google,
        ProviderName::Bing => &gateway.bing,
        ProviderName::Opencage => &gateway.opencage,
        ProviderName::Osm => &gateway.osm,
    };
    let raw::Provider {
        api_key,
        api_base_url,
    } = raw_provider.clone().unwrap_or_default();
    let require_api_key = || {
        api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| anyhow!("Missing API key for geocoding provider '{provider}'"))
    };
    let gw = match provider {
        ProviderName::Arcgis => GeocodingGateway::ArcGis { api_base_url },
        ProviderName::Google => GeocodingGateway::Google {
            api_key: require_api_key()?,
            api_base_url,
        },
        ProviderName::Bing => GeocodingGateway::Bing {
            api_key: require_api_key()?,
            api_base_url,
        },
        ProviderName::Opencage => GeocodingGateway::OpenCage {
            api_key: require_api_key()?,
            api_base_url,
        },
        ProviderName::Osm => GeocodingGateway::Nominatim { api_base_url },
    };
    Ok(gw)
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            geocoding,
            address,
            output,
            gateway,
        } = from;

        let raw::Geocoding {
            providers,
            metric,
            timeout,
        } = geocoding.unwrap_or_default();

        let providers = providers
            .or_else(|| raw::Geocoding::default().providers)
            .unwrap_or_default();
        let providers = parse_providers(providers)?;
        let metric = match metric {
            Some(name) => name
                .parse::<DisagreementMetric>()
                .map_err(|_| anyhow!("Unsupported disagreement metric '{name}'"))?,
            None => DisagreementMetric::default(),
        };
        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(anyhow!("The timeout of the geocoding requests must not be zero"));
        }

        let gateway = gateway.unwrap_or_default();
        let gateways = providers
            .iter()
            .map(|p| gateway_config(&gateway, p))
            .collect::<Result<Vec<_>>>()?;

        log::info!("Use geocoding providers: {providers:?} ({metric})");

        let geocoding = Geocoding {
            providers,
            metric,
            timeout,
            gateways,
        };

        let raw::Address { city, country } = address.unwrap_or_default();
        let address = AddressDefaults { city, country };

        let raw::Output { file } = output.unwrap_or_default();
        let output = Output { file };

        Ok(Self {
            geocoding,
            address,
            output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> Result<Config> {
        let raw: raw::Config = toml::from_str(toml).unwrap();
        Config::try_from(raw)
    }

    #[test]
    fn load_default_config() {
        let cfg = Config::try_from(raw::Config::default()).unwrap();
        let providers: Vec<_> = cfg.geocoding.providers.iter().collect();
        assert_eq!(vec![ProviderName::Arcgis, ProviderName::Osm], providers);
        assert_eq!(DisagreementMetric::BoundingBox, cfg.geocoding.metric);
        assert_eq!(Duration::from_secs(10), cfg.geocoding.timeout);
        assert_eq!(Some("Bogota"), cfg.address.city.as_deref());
        assert_eq!(Some("Colombia"), cfg.address.country.as_deref());
        assert_eq!(Path::new("geoconsensus.csv"), cfg.output.file);
    }

    #[test]
    fn reject_unsupported_provider() {
        let err = parse(
            r#"
            [geocoding]
            providers = ["arcgis", "yahoo"]
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("'yahoo'"), "{err}");
    }

    #[test]
    fn reject_duplicate_and_empty_provider_lists() {
        assert!(parse(
            r#"
            [geocoding]
            providers = ["osm", "OSM"]
            "#
        )
        .is_err());
        assert!(parse(
            r#"
            [geocoding]
            providers = []
            "#
        )
        .is_err());
    }

    #[test]
    fn reject_missing_api_key() {
        let err = parse(
            r#"
            [geocoding]
            providers = ["arcgis", "google"]
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("'google'"), "{err}");

        let err = parse(
            r#"
            [geocoding]
            providers = ["bing"]

            [gateway.bing]
            api-key = "  "
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("'bing'"), "{err}");
    }

    #[test]
    fn default_providers_if_not_specified() {
        let cfg = parse(
            r#"
            [geocoding]
            metric = "closed-tour"
            "#,
        )
        .unwrap();
        assert_eq!(2, cfg.geocoding.providers.len());
        assert_eq!(DisagreementMetric::ClosedTour, cfg.geocoding.metric);
    }

    #[test]
    fn reject_unsupported_metric() {
        let err = parse(
            r#"
            [geocoding]
            providers = ["osm"]
            metric = "average"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("'average'"), "{err}");
    }

    #[test]
    fn gateways_in_configured_order() {
        let cfg = parse(
            r#"
            [geocoding]
            providers = ["opencage", "osm", "google"]
            metric = "closed-tour"
            timeout = "3s"

            [gateway.opencage]
            api-key = "oc-key"

            [gateway.google]
            api-key = "g-key"

            [gateway.osm]
            api-base-url = "http://localhost:8080"
            "#,
        )
        .unwrap();
        assert_eq!(DisagreementMetric::ClosedTour, cfg.geocoding.metric);
        assert_eq!(Duration::from_secs(3), cfg.geocoding.timeout);
        assert_eq!(
            vec![
                GeocodingGateway::OpenCage {
                    api_key: "oc-key".into(),
                    api_base_url: None
                },
                GeocodingGateway::Nominatim {
                    api_base_url: Some("http://localhost:8080".into())
                },
                GeocodingGateway::Google {
                    api_key: "g-key".into(),
                    api_base_url: None
                },
            ],
            cfg.geocoding.gateways
        );
        // Sections that are missing fall back to the defaults
        assert_eq!(Some("Bogota"), cfg.address.city.as_deref());
    }

    #[test]
    fn api_key_from_environment_overrides_file() {
        let mut raw: raw::Config = toml::from_str(
            r#"
            [geocoding]
            providers = ["bing"]

            [gateway.bing]
            api-key = "from-file"
            "#,
        )
        .unwrap();
        set_api_key(&mut raw, ProviderName::Bing, "from-env".into());
        let cfg = Config::try_from(raw).unwrap();
        assert_eq!(
            vec![GeocodingGateway::Bing {
                api_key: "from-env".into(),
                api_base_url: None
            }],
            cfg.geocoding.gateways
        );
    }
}
