//! HTTP surface of the gateway.
//!
//! Every upstream failure is reported as `500 {error, message}`, where
//! `error` names the failed operation.

use crate::error::GatewayError;
use crate::service::AnimeGateway;
use anyhow::Context;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use shared::{AnimeDetail, AnimeSummary, ErrorBody, HealthStatus, PictureRef};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub const RANDOM_ANIME_FAILED: &str = "Failed to fetch random anime";
pub const ANIME_DETAILS_FAILED: &str = "Failed to fetch anime details";
pub const ANIME_PICTURES_FAILED: &str = "Failed to fetch anime pictures";

type AppState = Arc<AnimeGateway>;

/// Upstream failure tagged with the operation that hit it
#[derive(Debug)]
pub struct ApiError {
    label: &'static str,
    source: GatewayError,
}

impl ApiError {
    fn new(label: &'static str, source: GatewayError) -> Self {
        Self { label, source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(
            operation = self.label,
            kind = self.source.kind(),
            error = %self.source,
            "Request failed"
        );

        let body = ErrorBody {
            error: self.label.to_string(),
            message: self.source.to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

async fn random_anime(State(gateway): State<AppState>) -> Result<Json<AnimeSummary>, ApiError> {
    gateway
        .random_anime()
        .await
        .map(Json)
        .map_err(|e| ApiError::new(RANDOM_ANIME_FAILED, e))
}

async fn anime_detail(
    State(gateway): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AnimeDetail>, ApiError> {
    gateway
        .anime_detail(&id)
        .await
        .map(Json)
        .map_err(|e| ApiError::new(ANIME_DETAILS_FAILED, e))
}

async fn anime_pictures(
    State(gateway): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<PictureRef>>, ApiError> {
    gateway
        .anime_pictures(&id)
        .await
        .map(Json)
        .map_err(|e| ApiError::new(ANIME_PICTURES_FAILED, e))
}

async fn health_check(State(gateway): State<AppState>) -> Json<HealthStatus> {
    Json(gateway.health())
}

/// Build the router with all gateway routes
pub fn router(gateway: AppState) -> Router {
    Router::new()
        .route("/api/random-anime", get(random_anime))
        .route("/api/anime/{id}", get(anime_detail))
        .route("/api/anime/{id}/pictures", get(anime_pictures))
        .route("/api/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(gateway)
}

/// Serve on an already bound listener until `shutdown` resolves
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    gateway: AppState,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(gateway))
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server error")
}

/// Bind `addr` and serve until Ctrl-C or SIGTERM
pub async fn serve(addr: SocketAddr, gateway: AppState) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    let local_addr = listener.local_addr().context("Failed to read local address")?;
    info!("===========================================");
    info!("Anime Explorer Backend Server Running");
    info!(port = local_addr.port(), "Listening");
    info!("Health Check: http://localhost:{}/api/health", local_addr.port());
    info!("===========================================");

    serve_with_shutdown(listener, gateway, shutdown_signal()).await?;

    info!("HTTP server closed");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Ctrl-C received: closing HTTP server"),
        _ = terminate => info!("SIGTERM signal received: closing HTTP server"),
    }
}
