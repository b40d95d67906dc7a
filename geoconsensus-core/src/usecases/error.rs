use crate::{entities::*, gateways::sink};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("No gateway registered for geocoding provider '{0}'")]
    UnregisteredProvider(ProviderName),
    #[error("Could not write the result: {0}")]
    Sink(#[from] sink::Error),
}
