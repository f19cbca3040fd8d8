use std::time::Duration;

use async_trait::async_trait;
use common::clients::{handle_response, handle_response_json, new_reqwest_client};
use reqwest::Url;
use serde::{Deserialize, Serialize};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Identifier of a unit of work as tracked by the platform's work API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkId(pub String);

/// Brackets each due tick so the run shows up in the platform's work list.
///
/// Failures here are reported by the caller as warnings and never stop the
/// run itself.
#[async_trait]
pub trait WorkReporter {
    async fn initiate_work(
        &self,
        connector_id: &str,
        friendly_name: &str,
    ) -> anyhow::Result<WorkId>;

    async fn to_processed(&self, work_id: &WorkId, message: &str) -> anyhow::Result<()>;
}

#[derive(Serialize)]
struct InitiateWorkBody<'a> {
    connector_id: &'a str,
    friendly_name: &'a str,
}

#[derive(Deserialize)]
struct InitiateWorkResponse {
    id: String,
}

#[derive(Serialize)]
struct ToProcessedBody<'a> {
    message: &'a str,
}

/// A thin wrapper around [`reqwest::Client`] to make HTTP requests
/// to the intelligence platform's work API.
#[derive(Clone, Debug)]
pub struct WorkApiClient {
    inner: reqwest::Client,
    base_url: Url,
}

impl WorkApiClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            inner: new_reqwest_client(),
            base_url,
        }
    }

    pub async fn get_health_check(&self) -> anyhow::Result<()> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Failed to set path segments"))?
            .push("healthcheck");

        let resp = self.inner.get(url).timeout(REQUEST_TIMEOUT).send().await?;

        handle_response(resp).await
    }
}

#[async_trait]
impl WorkReporter for WorkApiClient {
    async fn initiate_work(
        &self,
        connector_id: &str,
        friendly_name: &str,
    ) -> anyhow::Result<WorkId> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Failed to set path segments"))?
            .push("works");

        let resp = self
            .inner
            .post(url)
            .json(&InitiateWorkBody {
                connector_id,
                friendly_name,
            })
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let InitiateWorkResponse { id } = handle_response_json(resp).await?;

        Ok(WorkId(id))
    }

    async fn to_processed(&self, work_id: &WorkId, message: &str) -> anyhow::Result<()> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Failed to set path segments"))?
            .push("works")
            .push(&work_id.0)
            .push("processed");

        let resp = self
            .inner
            .post(url)
            .json(&ToProcessedBody { message })
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        handle_response(resp).await
    }
}
