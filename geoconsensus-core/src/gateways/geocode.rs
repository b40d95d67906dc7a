use crate::entities::Coordinate;

/// A single geocoding backend.
///
/// Implementations never fail: transport errors, rejected credentials
/// and empty answers are logged and reported as [`Coordinate::Missing`].
pub trait GeoCodingGateway {
    fn resolve_address_lat_lng(&self, addr: &str) -> Coordinate;
}

impl<G> GeoCodingGateway for &G
where
    G: GeoCodingGateway + ?Sized,
{
    fn resolve_address_lat_lng(&self, addr: &str) -> Coordinate {
        (**self).resolve_address_lat_lng(addr)
    }
}

impl<G> GeoCodingGateway for Box<G>
where
    G: GeoCodingGateway + ?Sized,
{
    fn resolve_address_lat_lng(&self, addr: &str) -> Coordinate {
        (**self).resolve_address_lat_lng(addr)
    }
}
