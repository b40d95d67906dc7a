use thiserror::Error;

use crate::{coordinate::*, geo::*, provider::*};

/// An ordered, non-empty list of distinct providers.
///
/// The order determines the order of the queries, of the output
/// columns and of the legs of a closed tour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSet(Vec<ProviderName>);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidProviderSet {
    #[error("No geocoding provider configured")]
    Empty,
    #[error("Geocoding provider '{0}' is configured more than once")]
    Duplicate(ProviderName),
}

impl ProviderSet {
    pub fn new(providers: Vec<ProviderName>) -> Result<Self, InvalidProviderSet> {
        if providers.is_empty() {
            return Err(InvalidProviderSet::Empty);
        }
        for (i, p) in providers.iter().enumerate() {
            if providers[..i].contains(p) {
                return Err(InvalidProviderSet::Duplicate(*p));
            }
        }
        Ok(Self(providers))
    }

    pub fn iter(&self) -> impl Iterator<Item = ProviderName> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl TryFrom<Vec<ProviderName>> for ProviderSet {
    type Error = InvalidProviderSet;
    fn try_from(from: Vec<ProviderName>) -> Result<Self, Self::Error> {
        Self::new(from)
    }
}

/// The answers of all configured providers for a single address.
///
/// Every provider of the [`ProviderSet`] it was collected for appears
/// exactly once, in configured order, even if it found nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    entries: Vec<(ProviderName, Coordinate)>,
}

impl GeocodeResult {
    pub fn collect<F>(providers: &ProviderSet, mut resolve: F) -> Self
    where
        F: FnMut(ProviderName) -> Coordinate,
    {
        let entries = providers.iter().map(|p| (p, resolve(p))).collect();
        Self { entries }
    }

    pub fn get(&self, provider: ProviderName) -> Option<Coordinate> {
        self.entries
            .iter()
            .find(|(p, _)| *p == provider)
            .map(|(_, c)| *c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProviderName, Coordinate)> + '_ {
        self.entries.iter().copied()
    }

    /// All non-missing coordinates in provider order.
    pub fn points(&self) -> impl Iterator<Item = MapPoint> + '_ {
        self.entries.iter().filter_map(|(_, c)| c.point())
    }

    pub fn resolved_count(&self) -> usize {
        self.points().count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A geocoded address together with the disagreement of the providers.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeRecord {
    /// The free-text query that was sent to the providers.
    pub address: String,
    pub result: GeocodeResult,
    pub max_error: Distance,
}
