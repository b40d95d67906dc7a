use crate::entities::GeocodeRecord;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Persists geocoded addresses, one record at a time.
pub trait ResultSink {
    fn append(&mut self, record: &GeocodeRecord) -> Result<(), Error>;
}

impl<S> ResultSink for &mut S
where
    S: ResultSink + ?Sized,
{
    fn append(&mut self, record: &GeocodeRecord) -> Result<(), Error> {
        (**self).append(record)
    }
}
