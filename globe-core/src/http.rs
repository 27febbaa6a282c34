//! Shared HTTP plumbing: one client per component, one way to turn a response into JSON.

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::{config::Config, error::ProviderError};

pub const USER_AGENT: &str = concat!("globe-weather/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client used by every provider.
pub fn build_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(config.http_timeout())
        .user_agent(USER_AGENT)
        .build()
}

/// Send `request` and decode a successful body as `T`.
///
/// `what` names the call in errors and logs, e.g. `"onecall-3.0"`.
pub async fn get_json<T: DeserializeOwned>(
    request: RequestBuilder,
    what: &str,
) -> Result<T, ProviderError> {
    let res = request
        .send()
        .await
        .map_err(|e| ProviderError::network(what, e))?;

    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|e| ProviderError::network(what, e))?;

    if !status.is_success() {
        return Err(ProviderError::status(what, status, &body));
    }

    serde_json::from_str(&body).map_err(|e| ProviderError::Decode {
        what: what.to_string(),
        message: e.to_string(),
    })
}

/// Query pairs for a coordinate, in the `lat`/`lon` naming most providers use.
pub(crate) fn lat_lon(lat: f64, lon: f64) -> Vec<(&'static str, String)> {
    vec![("lat", lat.to_string()), ("lon", lon.to_string())]
}
