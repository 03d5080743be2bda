//! Client side of the gateway's HTTP contract.

use anyhow::Context;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use shared::config::ExplorerConfig;
use shared::{AnimeDetail, AnimeSummary, PictureRef};
use std::future::Future;
use thiserror::Error;
use tracing::debug;

pub const RANDOM_ANIME_FAILED: &str = "Failed to fetch random anime";
pub const ANIME_DETAILS_FAILED: &str = "Failed to fetch anime details";
pub const ANIME_PICTURES_FAILED: &str = "Failed to fetch anime pictures";

/// Errors from talking to the gateway.
///
/// Any non-success status collapses into [`ClientError::Status`], whose
/// message is just the operation label; the gateway's error body is not
/// inspected.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{label}")]
    Status { label: &'static str, status: u16 },

    #[error("{label}: {source}")]
    Transport {
        label: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid gateway URL: {0}")]
    InvalidUrl(String),
}

/// Operations the explorer needs from the gateway
pub trait GatewayApi: Send + Sync {
    fn random_anime(&self) -> impl Future<Output = Result<AnimeSummary, ClientError>> + Send;

    fn anime_detail(&self, id: u32)
        -> impl Future<Output = Result<AnimeDetail, ClientError>> + Send;

    fn anime_pictures(
        &self,
        id: u32,
    ) -> impl Future<Output = Result<Vec<PictureRef>, ClientError>> + Send;
}

/// [`GatewayApi`] over HTTP
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: Url,
}

impl HttpGateway {
    /// `gateway_url` includes the `/api` prefix, e.g. `http://localhost:3001/api`
    pub fn new(config: &ExplorerConfig) -> anyhow::Result<Self> {
        let base_url = Url::parse(&config.gateway_url)
            .with_context(|| format!("Invalid gateway URL: {}", config.gateway_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Gateway URL cannot carry a path: {}", base_url);
        }

        // The gateway itself throttles, so leave room for its waits
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        label: &'static str,
    ) -> Result<T, ClientError> {
        let url = self.endpoint(segments)?;
        debug!(url = %url, "Calling gateway");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ClientError::Transport { label, source })?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = %status, "Gateway returned an error");
            return Err(ClientError::Status {
                label,
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| ClientError::Transport { label, source })
    }
}

impl GatewayApi for HttpGateway {
    async fn random_anime(&self) -> Result<AnimeSummary, ClientError> {
        self.get(&["random-anime"], RANDOM_ANIME_FAILED).await
    }

    async fn anime_detail(&self, id: u32) -> Result<AnimeDetail, ClientError> {
        let id = id.to_string();
        self.get(&["anime", &id], ANIME_DETAILS_FAILED).await
    }

    async fn anime_pictures(&self, id: u32) -> Result<Vec<PictureRef>, ClientError> {
        let id = id.to_string();
        self.get(&["anime", &id, "pictures"], ANIME_PICTURES_FAILED)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Path, http::StatusCode, routing::get, Json, Router};
    use serde_json::json;

    fn explorer(gateway_url: &str) -> ExplorerConfig {
        ExplorerConfig {
            gateway_url: gateway_url.to_string(),
            ..Default::default()
        }
    }

    async fn spawn_gateway(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/api", addr)
    }

    #[test]
    fn test_endpoint_building() {
        let gateway = HttpGateway::new(&explorer("http://localhost:3001/api")).unwrap();
        let url = gateway.endpoint(&["anime", "21", "pictures"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3001/api/anime/21/pictures");

        assert!(HttpGateway::new(&explorer("localhost:3001")).is_err());
    }

    #[tokio::test]
    async fn test_fetches_decode_gateway_shapes() {
        let app = Router::new()
            .route(
                "/api/random-anime",
                get(|| async {
                    Json(json!({
                        "id": 21, "title": "One Piece", "titleJapanese": "ONE PIECE",
                        "image": "op.jpg", "type": "TV", "episodes": null, "score": 8.7
                    }))
                }),
            )
            .route(
                "/api/anime/{id}/pictures",
                get(|Path(id): Path<u32>| async move {
                    assert_eq!(id, 21);
                    Json(json!([{ "large": "l.jpg", "small": "s.jpg" }]))
                }),
            );
        let gateway = HttpGateway::new(&explorer(&spawn_gateway(app).await)).unwrap();

        let summary = gateway.random_anime().await.unwrap();
        assert_eq!(summary.id, 21);
        assert_eq!(summary.title, "One Piece");
        assert_eq!(summary.episodes, None);

        let pictures = gateway.anime_pictures(21).await.unwrap();
        assert_eq!(pictures.len(), 1);
        assert_eq!(pictures[0].best_url(), Some("l.jpg"));
    }

    #[tokio::test]
    async fn test_error_status_becomes_generic_label() {
        let app = Router::new().route(
            "/api/anime/{id}",
            get(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "Failed to fetch anime details",
                        "message": "upstream returned 429 Too Many Requests: slow down"
                    })),
                )
            }),
        );
        let gateway = HttpGateway::new(&explorer(&spawn_gateway(app).await)).unwrap();

        let err = gateway.anime_detail(21).await.unwrap_err();
        assert!(matches!(err, ClientError::Status { status: 500, .. }));
        assert_eq!(err.to_string(), ANIME_DETAILS_FAILED);
    }

    #[tokio::test]
    async fn test_undecodable_body_is_transport_error() {
        let app = Router::new().route("/api/random-anime", get(|| async { "not json" }));
        let gateway = HttpGateway::new(&explorer(&spawn_gateway(app).await)).unwrap();

        let err = gateway.random_anime().await.unwrap_err();
        assert!(matches!(err, ClientError::Transport { .. }));
        assert!(err.to_string().starts_with(RANDOM_ANIME_FAILED));
    }

    #[tokio::test]
    async fn test_configured_timeout_applies() {
        let app = Router::new().route(
            "/api/random-anime",
            get(|| async {
                tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                "too late"
            }),
        );
        let config = ExplorerConfig {
            gateway_url: spawn_gateway(app).await,
            timeout_seconds: 1,
        };
        let gateway = HttpGateway::new(&config).unwrap();

        let err = gateway.random_anime().await.unwrap_err();
        match err {
            ClientError::Transport { label, source } => {
                assert_eq!(label, RANDOM_ANIME_FAILED);
                assert!(source.is_timeout());
            }
            other => panic!("expected a transport error, got {:?}", other),
        }
    }
}
