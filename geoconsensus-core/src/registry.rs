use std::{collections::HashMap, fmt};

use crate::{
    entities::*,
    gateways::geocode::GeoCodingGateway,
    usecases::{Aggregator, Error},
};

type BoxedGateway = Box<dyn GeoCodingGateway>;

/// All geocoding backends that are available at runtime.
#[derive(Default)]
pub struct ProviderRegistry {
    gateways: HashMap<ProviderName, BoxedGateway>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a gateway and returns the previously registered one.
    pub fn register<G>(&mut self, name: ProviderName, gateway: G) -> Option<BoxedGateway>
    where
        G: GeoCodingGateway + 'static,
    {
        log::debug!("Register geocoding provider '{name}'");
        self.gateways.insert(name, Box::new(gateway))
    }

    pub fn is_registered(&self, name: ProviderName) -> bool {
        self.gateways.contains_key(&name)
    }

    /// Picks the gateways of the given providers.
    ///
    /// Fails if any of them has not been registered.
    pub fn into_aggregator(mut self, providers: ProviderSet) -> Result<Aggregator, Error> {
        let mut gateways = Vec::with_capacity(providers.len());
        for name in providers.iter() {
            let gw = self
                .gateways
                .remove(&name)
                .ok_or(Error::UnregisteredProvider(name))?;
            gateways.push(gw);
        }
        if !self.gateways.is_empty() {
            log::debug!(
                "{} registered provider(s) will not be used",
                self.gateways.len()
            );
        }
        Ok(Aggregator::new(providers, gateways))
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut names: Vec<_> = self.gateways.keys().collect();
        names.sort();
        f.debug_struct("ProviderRegistry")
            .field("providers", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Coordinate);

    impl GeoCodingGateway for Fixed {
        fn resolve_address_lat_lng(&self, _: &str) -> Coordinate {
            self.0
        }
    }

    #[test]
    fn reject_unregistered_provider() {
        let mut registry = ProviderRegistry::new();
        registry.register(ProviderName::Arcgis, Fixed(Coordinate::Missing));
        assert!(registry.is_registered(ProviderName::Arcgis));
        assert!(!registry.is_registered(ProviderName::Bing));
        let providers = ProviderSet::new(vec![ProviderName::Arcgis, ProviderName::Bing]).unwrap();
        let err = registry.into_aggregator(providers).unwrap_err();
        assert!(matches!(err, Error::UnregisteredProvider(ProviderName::Bing)));
    }

    #[test]
    fn register_replaces_previous_gateway() {
        let mut registry = ProviderRegistry::new();
        assert!(registry
            .register(ProviderName::Osm, Fixed(Coordinate::Missing))
            .is_none());
        let pt = Coordinate::from_lat_lng_deg(4.6, -74.1);
        assert!(registry.register(ProviderName::Osm, Fixed(pt)).is_some());
        let aggregator = registry
            .into_aggregator(ProviderSet::new(vec![ProviderName::Osm]).unwrap())
            .unwrap();
        assert_eq!(Some(pt), aggregator.geocode("x").get(ProviderName::Osm));
    }

    #[test]
    fn unused_providers_are_ignored() {
        let mut registry = ProviderRegistry::new();
        registry.register(ProviderName::Osm, Fixed(Coordinate::Missing));
        registry.register(ProviderName::Google, Fixed(Coordinate::Missing));
        let aggregator = registry
            .into_aggregator(ProviderSet::new(vec![ProviderName::Google]).unwrap())
            .unwrap();
        assert_eq!(1, aggregator.providers().len());
    }
}
