//! Utility functions for making HTTP requests with `reqwest` and handling
//! the responses.

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::Error;

pub fn new_reqwest_client() -> Client {
    // Disallowing idle pooled connections avoids a race where a connection
    // is picked from the pool while the server is closing it, see
    // https://github.com/hyperium/hyper/issues/2136#issuecomment-589345238
    Client::builder()
        .pool_max_idle_per_host(0)
        .build()
        .expect("Build reqwest client")
}

async fn handle_error<T>(resp: Response) -> anyhow::Result<T> {
    let status = resp.status();
    let error_text = resp.text().await?;
    tracing::error!("Error {}: {}", status, error_text);
    Err(Error::Api(status, error_text))?
}

/// Use this when you only care about whether the request succeeded and
/// don't need the response body.
pub async fn handle_response(resp: Response) -> anyhow::Result<()> {
    if resp.status().is_success() {
        Ok(())
    } else {
        handle_error(resp).await
    }
}

/// Turns the response into JSON and captures errors.
pub async fn handle_response_json<T>(resp: Response) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    if resp.status().is_success() {
        let json = resp.json().await?;
        Ok(json)
    } else {
        handle_error(resp).await
    }
}
