//! Shared HTTP plumbing: the error type, response checks and the
//! [`HeraldClient`] facade.

use std::time::Duration;

use async_trait::async_trait;
use herald_core::event::PhotoEvent;
use herald_core::press::PressRelease;
use herald_core::slider::SliderItem;
use herald_core::video::Video;

use crate::config::ClientConfig;
use crate::resource::ResourceClient;

/// Errors from the REST layer.
///
/// Every variant means the same thing to the user (the request failed);
/// the split only matters for logs.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("API error ({status}): {body}")]
    Status {
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response body did not match the expected shape.
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The request URL could not be built from the configured base.
    #[error("Invalid request URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Ensure the response has a success status code. Returns the response
/// unchanged on success, or [`ApiError::Status`] carrying the status and
/// body text on failure.
pub(crate) async fn ensure_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

/// Read a successful response body as JSON.
pub(crate) async fn parse_json(response: reqwest::Response) -> Result<serde_json::Value, ApiError> {
    let response = ensure_success(response).await?;
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Assert the response has a success status code, discarding the body.
pub(crate) async fn check_status(response: reqwest::Response) -> Result<(), ApiError> {
    ensure_success(response).await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// HeraldClient
// ---------------------------------------------------------------------------

/// Entry point holding the configuration and a pooled HTTP client.
#[derive(Debug, Clone)]
pub struct HeraldClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl HeraldClient {
    /// Build a client with the configured request timeout.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn events(&self) -> ResourceClient<PhotoEvent> {
        self.resource()
    }

    pub fn press(&self) -> ResourceClient<PressRelease> {
        self.resource()
    }

    pub fn sliders(&self) -> ResourceClient<SliderItem> {
        self.resource()
    }

    pub fn videos(&self) -> ResourceClient<Video> {
        self.resource()
    }

    fn resource<R: herald_core::Resource>(&self) -> ResourceClient<R> {
        ResourceClient::with_client(self.http.clone(), &self.config.api_url)
    }
}

/// Downloads raw assets such as generated QR-code images.
#[async_trait]
pub trait AssetFetcher: Send + Sync {
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ApiError>;
}

#[async_trait]
impl AssetFetcher for HeraldClient {
    /// Relative paths are resolved against the configured asset base.
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let url = self.config.asset_url(url);
        tracing::debug!(url = %url, "GET asset");
        let response = self.http.get(&url).send().await?;
        let response = ensure_success(response).await?;
        Ok(response.bytes().await?.to_vec())
    }
}
