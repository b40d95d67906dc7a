//! Measures how far apart the answers of the providers are.
//!
//! Missing coordinates are ignored. With less than two
//! coordinates there is nothing to compare and the
//! disagreement is zero.

use crate::entities::*;
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum DisagreementMetric {
    /// Diagonal of the smallest box enclosing all answers.
    #[default]
    BoundingBox,
    /// Length of the round trip that visits all answers
    /// in provider order.
    ClosedTour,
}

impl DisagreementMetric {
    pub fn evaluate(self, result: &GeocodeResult) -> Distance {
        match self {
            Self::BoundingBox => bounding_box_diagonal(result.points()),
            Self::ClosedTour => closed_tour_length(result.points()),
        }
    }
}

pub fn bounding_box_diagonal<I>(points: I) -> Distance
where
    I: IntoIterator<Item = MapPoint>,
{
    MapBbox::enclosing(points)
        .map(|bbox| bbox.diagonal())
        .unwrap_or_default()
}

pub fn closed_tour_length<I>(points: I) -> Distance
where
    I: IntoIterator<Item = MapPoint>,
{
    let points: Vec<_> = points.into_iter().collect();
    if points.len() < 2 {
        return Distance::zero();
    }
    let legs = points.iter().zip(points.iter().cycle().skip(1));
    legs.map(|(from, to)| MapPoint::distance(*from, *to)).sum()
}
