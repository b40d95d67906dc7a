use std::time::Duration;

use anyhow::{anyhow, Result};
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("geoconsensus/", env!("CARGO_PKG_VERSION"));

/// Creates the HTTP client that is shared by all providers.
///
/// Nominatim refuses requests without a `User-Agent`.
pub fn client(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Sends the request and decodes a successful JSON response.
///
/// Error responses are reported with their status and body.
pub(crate) fn get_json<T>(request: RequestBuilder) -> Result<T>
where
    T: DeserializeOwned,
{
    let response = request.send()?;
    let status = response.status();
    if status.is_success() {
        Ok(response.json()?)
    } else {
        let body = response.text().unwrap_or_default();
        Err(anyhow!("HTTP {status}: {}", body.trim()))
    }
}
