pub mod entities {
    pub use geoconsensus_entities::{address::*, coordinate::*, geo::*, provider::*, result::*};
}

pub mod gateways;
pub mod metric;
pub mod registry;
pub mod usecases;
