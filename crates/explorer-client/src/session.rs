//! Two-step fetch state machine behind the explorer UI.
//!
//! ```text
//! Idle -> FetchingSummary -> SummaryReady -> FetchingDetail -> DetailReady
//! ```
//!
//! A failed fetch records its message and falls back to the last stable
//! phase (`Idle` or `SummaryReady`). The detail phase is all-or-nothing:
//! if the pictures call fails after the detail call succeeded, the detail is
//! discarded too.

use crate::backend::{ClientError, GatewayApi};
use shared::{AnimeDetail, AnimeSummary, PictureRef};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, warn};

/// Where the session is in the fetch sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    FetchingSummary,
    SummaryReady,
    FetchingDetail,
    DetailReady,
}

impl Phase {
    /// True while a request is in flight
    pub fn is_loading(&self) -> bool {
        matches!(self, Phase::FetchingSummary | Phase::FetchingDetail)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Phase::Idle => "idle",
            Phase::FetchingSummary => "fetching_summary",
            Phase::SummaryReady => "summary_ready",
            Phase::FetchingDetail => "fetching_detail",
            Phase::DetailReady => "detail_ready",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no anime selected; fetch a random anime first")]
    NoSummary,
}

/// Explorer state: the fetched records plus the current phase
pub struct ExplorerSession<G> {
    gateway: G,
    phase: watch::Sender<Phase>,
    summary: Option<AnimeSummary>,
    detail: Option<AnimeDetail>,
    pictures: Vec<PictureRef>,
    error: Option<String>,
}

impl<G: GatewayApi> ExplorerSession<G> {
    pub fn new(gateway: G) -> Self {
        let (phase, _) = watch::channel(Phase::Idle);
        Self {
            gateway,
            phase,
            summary: None,
            detail: None,
            pictures: Vec::new(),
            error: None,
        }
    }

    /// Receive every phase change, e.g. to drive a loading indicator
    pub fn subscribe(&self) -> watch::Receiver<Phase> {
        self.phase.subscribe()
    }

    pub fn phase(&self) -> Phase {
        *self.phase.borrow()
    }

    pub fn summary(&self) -> Option<&AnimeSummary> {
        self.summary.as_ref()
    }

    pub fn detail(&self) -> Option<&AnimeDetail> {
        self.detail.as_ref()
    }

    pub fn pictures(&self) -> &[PictureRef] {
        &self.pictures
    }

    /// Message of the last failed fetch, cleared when a new fetch starts
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    fn set_phase(&self, phase: Phase) {
        self.phase.send_replace(phase);
    }

    /// Discard everything and fetch a new random anime
    pub async fn trigger_random_fetch(&mut self) -> Phase {
        self.summary = None;
        self.detail = None;
        self.pictures.clear();
        self.error = None;
        self.set_phase(Phase::FetchingSummary);

        match self.gateway.random_anime().await {
            Ok(summary) => {
                info!(mal_id = summary.id, title = %summary.title, "Random anime loaded");
                self.summary = Some(summary);
                self.set_phase(Phase::SummaryReady);
            }
            Err(e) => {
                warn!(error = %e, "Random anime fetch failed");
                self.error = Some(e.to_string());
                self.set_phase(Phase::Idle);
            }
        }

        self.phase()
    }

    /// Fetch detail, then pictures, for the current summary
    pub async fn trigger_detail_fetch(&mut self) -> Result<Phase, SessionError> {
        let id = self
            .summary
            .as_ref()
            .map(|summary| summary.id)
            .ok_or(SessionError::NoSummary)?;

        self.detail = None;
        self.pictures.clear();
        self.error = None;
        self.set_phase(Phase::FetchingDetail);

        match self.fetch_detail_and_pictures(id).await {
            Ok((detail, pictures)) => {
                info!(mal_id = id, pictures = pictures.len(), "Details loaded");
                self.detail = Some(detail);
                self.pictures = pictures;
                self.set_phase(Phase::DetailReady);
            }
            Err(e) => {
                warn!(mal_id = id, error = %e, "Detail fetch failed");
                self.error = Some(e.to_string());
                self.set_phase(Phase::SummaryReady);
            }
        }

        Ok(self.phase())
    }

    async fn fetch_detail_and_pictures(
        &self,
        id: u32,
    ) -> Result<(AnimeDetail, Vec<PictureRef>), ClientError> {
        let detail = self.gateway.anime_detail(id).await?;
        let pictures = self.gateway.anime_pictures(id).await?;
        Ok((detail, pictures))
    }
}
