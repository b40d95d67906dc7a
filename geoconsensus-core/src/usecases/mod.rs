mod error;
mod geocode_address;
mod geocode_addresses;


pub type Result<T> = std::result::Result<T, Error>;

pub use self::{error::Error, geocode_address::*, geocode_addresses::*};

pub(crate) mod prelude {
    pub use crate::{
        entities::*,
        gateways::{geocode::GeoCodingGateway, sink::ResultSink},
        metric::DisagreementMetric,
    };
}
