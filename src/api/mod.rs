//! HTTP client for the link service's collection endpoint.

use crate::config::Config;
use crate::data::{Link, LinkId, NewLink};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Shared HTTP client for all service requests to enable connection pooling
pub static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(5)
        .build()
        .expect("Failed to create HTTP client")
});

#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-success response; carries the service-provided message when the
    /// body had one, a status line otherwise.
    #[error("{0}")]
    Service(String),
    /// The request could not complete (connect failure, timeout, bad body).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Optional error payload the service attaches to failures.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Turn a failure status and raw body into a user-facing message.
fn service_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| format!("link service returned {}", status))
}

/// Client for the list/create/delete collection surface.
#[derive(Debug, Clone)]
pub struct LinkService {
    collection_url: String,
    timeout: Duration,
}

impl LinkService {
    pub fn new(config: &Config) -> Self {
        Self {
            collection_url: collection_url(&config.server.base_url),
            timeout: Duration::from_secs(config.server.request_timeout_secs),
        }
    }

    /// Fetch the full collection in service order.
    pub async fn list(&self) -> Result<Vec<Link>, ApiError> {
        let response = HTTP_CLIENT
            .get(&self.collection_url)
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(self.error_from(response).await);
        }

        Ok(response.json().await?)
    }

    /// Create a link; returns the service-assigned record.
    pub async fn create(&self, new_link: &NewLink) -> Result<Link, ApiError> {
        let response = HTTP_CLIENT
            .post(&self.collection_url)
            .timeout(self.timeout)
            .json(new_link)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(self.error_from(response).await);
        }

        Ok(response.json().await?)
    }

    /// Delete a link by id. The ack body is ignored.
    pub async fn delete(&self, id: &LinkId) -> Result<(), ApiError> {
        let url = format!("{}/{}", self.collection_url, urlencoding::encode(&id.0));
        let response = HTTP_CLIENT
            .delete(&url)
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(self.error_from(response).await);
        }

        Ok(())
    }

    async fn error_from(&self, response: reqwest::Response) -> ApiError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        tracing::warn!("link service error: {} ({})", status, body.trim());
        ApiError::Service(service_message(status, &body))
    }
}

fn collection_url(base_url: &str) -> String {
    format!("{}/api/links", base_url.trim_end_matches('/'))
}
