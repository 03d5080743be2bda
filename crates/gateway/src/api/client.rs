//! Jikan API client with throttling.
//!
//! No retries: every failure is reported to the caller on the first attempt.

use super::rate_limiter::RateLimiter;
use super::types::*;
use crate::error::{GatewayError, Result};
use anyhow::Context;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use shared::config::UpstreamConfig;
use tracing::{debug, warn};

/// Jikan API v4 client
#[derive(Debug)]
pub struct JikanClient {
    /// HTTP client
    client: Client,
    /// Base URL for Jikan API
    base_url: Url,
    /// Throttle for detail and picture requests
    rate_limiter: RateLimiter,
}

impl JikanClient {
    /// Create a new Jikan client
    pub fn new(config: &UpstreamConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid upstream base URL: {}", config.base_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Upstream base URL cannot carry a path: {}", config.base_url);
        }

        let rate_limiter =
            RateLimiter::new(config.throttle).context("Invalid throttle configuration")?;

        Ok(Self {
            client,
            base_url,
            rate_limiter,
        })
    }

    /// Build an endpoint URL by appending percent-encoded path segments
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GatewayError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Make a single GET request and decode the JSON body
    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(url = %url, "Making API request");

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "Request error");
            GatewayError::UpstreamUnavailable(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<JikanError>(&error_text)
                .ok()
                .and_then(|e| e.message)
                .unwrap_or_else(|| "no error details".to_string());

            warn!(
                url = %url,
                status = %status,
                error = %message,
                "Request failed"
            );
            return Err(GatewayError::UpstreamStatus { status, message });
        }

        let body = response
            .bytes()
            .await
            .map_err(GatewayError::UpstreamUnavailable)?;

        serde_json::from_slice(&body).map_err(|e| {
            warn!(url = %url, error = %e, "Failed to parse response");
            GatewayError::MalformedResponse(e.to_string())
        })
    }

    async fn throttle(&self) {
        let waited = self.rate_limiter.acquire().await;
        if !waited.is_zero() {
            debug!(waited_ms = waited.as_millis(), "Throttled upstream call");
        }
    }

    /// Fetch a random anime
    pub async fn random_anime(&self) -> Result<AnimePayload> {
        let url = self.endpoint(&["random", "anime"])?;
        let response: DataResponse<AnimePayload> = self.get(url).await?;
        response
            .data
            .ok_or_else(|| GatewayError::MalformedResponse("missing data envelope".to_string()))
    }

    /// Fetch full anime details by id. The id is forwarded verbatim.
    pub async fn anime(&self, id: &str) -> Result<AnimePayload> {
        self.throttle().await;
        let url = self.endpoint(&["anime", id])?;
        let response: DataResponse<AnimePayload> = self.get(url).await?;
        response
            .data
            .ok_or_else(|| GatewayError::MalformedResponse("missing data envelope".to_string()))
    }

    /// Fetch the picture gallery of an anime
    pub async fn anime_pictures(&self, id: &str) -> Result<Vec<PicturePayload>> {
        self.throttle().await;
        let url = self.endpoint(&["anime", id, "pictures"])?;
        let response: ListResponse<PicturePayload> = self.get(url).await?;
        response
            .data
            .ok_or_else(|| GatewayError::MalformedResponse("missing data envelope".to_string()))
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Throttle policy in effect
    pub fn throttle_policy(&self) -> shared::ThrottlePolicy {
        self.rate_limiter.policy()
    }
}
