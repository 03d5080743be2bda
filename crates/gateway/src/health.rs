//! Liveness reporting.

use chrono::{DateTime, SecondsFormat, Utc};
use shared::HealthStatus;
use std::sync::atomic::{AtomicI64, Ordering};

pub const HEALTH_MESSAGE: &str = "Anime Explorer Backend is running!";

/// Issues health timestamps that never go backwards, even if the wall clock does
#[derive(Debug, Default)]
pub struct HealthClock {
    high_water_ms: AtomicI64,
}

impl HealthClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a health response stamped with the current time
    pub fn check(&self) -> HealthStatus {
        let millis = self.stamp(Utc::now().timestamp_millis());
        let timestamp = DateTime::<Utc>::from_timestamp_millis(millis)
            .unwrap_or_else(Utc::now)
            .to_rfc3339_opts(SecondsFormat::Millis, true);

        HealthStatus {
            status: "OK".to_string(),
            message: HEALTH_MESSAGE.to_string(),
            timestamp,
        }
    }

    fn stamp(&self, wall_ms: i64) -> i64 {
        let previous = self.high_water_ms.fetch_max(wall_ms, Ordering::SeqCst);
        previous.max(wall_ms)
    }
}
