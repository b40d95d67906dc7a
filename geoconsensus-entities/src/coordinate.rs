use crate::geo::MapPoint;

/// The answer of a single geocoding provider.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Coordinate {
    Present(MapPoint),
    /// The provider found nothing or failed.
    #[default]
    Missing,
}

impl Coordinate {
    /// Out-of-range coordinates are treated as missing.
    pub fn from_lat_lng_deg<LAT: Into<f64>, LNG: Into<f64>>(lat: LAT, lng: LNG) -> Self {
        MapPoint::try_from_lat_lng_deg(lat, lng).into()
    }

    pub const fn point(self) -> Option<MapPoint> {
        match self {
            Self::Present(pt) => Some(pt),
            Self::Missing => None,
        }
    }

    pub const fn is_missing(self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl From<MapPoint> for Coordinate {
    fn from(from: MapPoint) -> Self {
        Self::Present(from)
    }
}

impl From<Option<MapPoint>> for Coordinate {
    fn from(from: Option<MapPoint>) -> Self {
        from.map(Self::Present).unwrap_or_default()
    }
}
