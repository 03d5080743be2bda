//! Upstream throttle.
//!
//! Applies the configured [`ThrottlePolicy`] before upstream calls. The
//! token bucket is shared by every request the gateway serves; waiters queue
//! on an async mutex so tokens are handed out in arrival order.

use anyhow::{bail, Result};
use shared::ThrottlePolicy;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};

/// Slowest accepted refill rate: one token roughly every 11.5 days
pub const MIN_REFILL_PER_SECOND: f64 = 1e-6;

/// Rate limiter driven by a [`ThrottlePolicy`]
#[derive(Debug)]
pub struct RateLimiter {
    policy: ThrottlePolicy,
    bucket: Mutex<Bucket>,
}

#[derive(Debug)]
struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

impl Bucket {
    fn refill(&mut self, capacity: u32, refill_per_second: f64) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_refill).as_secs_f64();
        self.tokens = (self.tokens + elapsed * refill_per_second).min(capacity as f64);
        self.last_refill = now;
    }
}

impl RateLimiter {
    /// Create a new rate limiter; a token bucket starts full
    pub fn new(policy: ThrottlePolicy) -> Result<Self> {
        let tokens = match policy {
            ThrottlePolicy::TokenBucket {
                capacity,
                refill_per_second,
            } => {
                if capacity == 0 {
                    bail!("Token bucket capacity must be at least 1");
                }
                if !(refill_per_second.is_finite() && refill_per_second >= MIN_REFILL_PER_SECOND) {
                    bail!(
                        "Token bucket refill rate must be a finite value of at least {}, got {}",
                        MIN_REFILL_PER_SECOND,
                        refill_per_second
                    );
                }
                capacity as f64
            }
            _ => 0.0,
        };

        Ok(Self {
            policy,
            bucket: Mutex::new(Bucket {
                tokens,
                last_refill: Instant::now(),
            }),
        })
    }

    /// The policy this limiter enforces
    pub fn policy(&self) -> ThrottlePolicy {
        self.policy
    }

    /// Wait until a request may be made. Returns the time spent waiting.
    pub async fn acquire(&self) -> Duration {
        match self.policy {
            ThrottlePolicy::Disabled => Duration::ZERO,
            ThrottlePolicy::FixedDelay { delay_ms } => {
                let delay = Duration::from_millis(delay_ms);
                sleep(delay).await;
                delay
            }
            ThrottlePolicy::TokenBucket {
                capacity,
                refill_per_second,
            } => self.take_token(capacity, refill_per_second).await,
        }
    }

    async fn take_token(&self, capacity: u32, refill_per_second: f64) -> Duration {
        let started = Instant::now();
        let mut bucket = self.bucket.lock().await;
        bucket.refill(capacity, refill_per_second);

        if bucket.tokens < 1.0 {
            let wait_time = Duration::from_secs_f64((1.0 - bucket.tokens) / refill_per_second);
            tracing::debug!(
                wait_ms = wait_time.as_millis(),
                "Rate limit: waiting for token"
            );
            sleep(wait_time).await;
            bucket.refill(capacity, refill_per_second);
        }

        bucket.tokens = (bucket.tokens - 1.0).max(0.0);
        started.elapsed()
    }

    /// Tokens currently available (token bucket only)
    pub async fn available_tokens(&self) -> Option<f64> {
        match self.policy {
            ThrottlePolicy::TokenBucket {
                capacity,
                refill_per_second,
            } => {
                let mut bucket = self.bucket.lock().await;
                bucket.refill(capacity, refill_per_second);
                Some(bucket.tokens)
            }
            _ => None,
        }
    }
}
