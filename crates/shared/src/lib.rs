//! Shared library for the Anime Explorer gateway and client.
//!
//! This crate provides common functionality used across all binary crates:
//! - Configuration management
//! - Logging infrastructure
//! - Wire models for the gateway's JSON contract

pub mod config;
pub mod logging;
pub mod models;

// Re-export commonly used types
pub use config::{Config, ThrottlePolicy};
pub use logging::LogConfig;
pub use models::*;

/// Common result type using anyhow::Error
pub type Result<T> = anyhow::Result<T>;
