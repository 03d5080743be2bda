//! Gateway operations: one upstream call each, then projection.

use crate::api::JikanClient;
use crate::error::Result;
use crate::health::HealthClock;
use crate::projection;
use shared::config::UpstreamConfig;
use shared::{AnimeDetail, AnimeSummary, HealthStatus, PictureRef};
use tracing::info;

/// Stateless reshaping layer between clients and Jikan
#[derive(Debug)]
pub struct AnimeGateway {
    client: JikanClient,
    clock: HealthClock,
}

impl AnimeGateway {
    pub fn new(client: JikanClient) -> Self {
        Self {
            client,
            clock: HealthClock::new(),
        }
    }

    /// Build the gateway and its upstream client from configuration
    pub fn from_config(config: &UpstreamConfig) -> anyhow::Result<Self> {
        Ok(Self::new(JikanClient::new(config)?))
    }

    /// Fetch and summarize a random anime
    pub async fn random_anime(&self) -> Result<AnimeSummary> {
        info!("Fetching random anime");
        let anime = self.client.random_anime().await?;
        let summary = projection::summarize(anime)?;

        info!(
            mal_id = summary.id,
            title = %summary.title,
            "Random anime fetched"
        );
        Ok(summary)
    }

    /// Fetch the detail record of one anime
    pub async fn anime_detail(&self, id: &str) -> Result<AnimeDetail> {
        info!(anime_id = %id, "Fetching anime details");
        let anime = self.client.anime(id).await?;
        let detail = projection::detail(anime)?;

        info!(mal_id = detail.id, title = %detail.title, "Details fetched");
        Ok(detail)
    }

    /// Fetch the picture gallery of one anime
    pub async fn anime_pictures(&self, id: &str) -> Result<Vec<PictureRef>> {
        info!(anime_id = %id, "Fetching anime pictures");
        let entries = self.client.anime_pictures(id).await?;
        let pictures = projection::pictures(entries);

        info!(anime_id = %id, count = pictures.len(), "Pictures fetched");
        Ok(pictures)
    }

    /// Liveness report; never touches upstream
    pub fn health(&self) -> HealthStatus {
        self.clock.check()
    }

    pub fn client(&self) -> &JikanClient {
        &self.client
    }
}
