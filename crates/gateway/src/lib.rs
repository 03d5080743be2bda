//! Anime Explorer gateway.
//!
//! Proxies three Jikan API v4 endpoints (random anime, anime by id, pictures
//! by id), projects each response onto a small JSON shape, and serves them
//! over HTTP alongside a health check.

pub mod api;
pub mod error;
pub mod health;
pub mod projection;
pub mod server;
pub mod service;

pub use api::{JikanClient, RateLimiter};
pub use error::GatewayError;
pub use health::HealthClock;
pub use service::AnimeGateway;
