//! Bounded retries for Plugin Service requests
//!
//! Retries belong to the gateway: callers above it (pagination, snapshot
//! aggregation) see either a success or the final error.

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// How many times a failed request is repeated, and how long to wait between tries
///
/// The wait doubles after every failure, starting at `base_delay` and never
/// exceeding `max_delay`. A server-supplied `Retry-After` replaces the
/// computed wait for that attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Extra attempts after the first request
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl RetryConfig {
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(8),
        }
    }

    pub fn delays(mut self, base: Duration, max: Duration) -> Self {
        self.base_delay = base;
        self.max_delay = max.max(base);
        self
    }

    /// Wait before the retry that follows failed attempt `attempt` (0-indexed)
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.base_delay
            .checked_mul(factor)
            .map_or(self.max_delay, |delay| delay.min(self.max_delay))
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::new(3)
    }
}

/// What to do after a failed attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Permanent failure, return it
    Fail,
    /// Transient failure, wait the configured backoff
    Backoff,
    /// Transient failure with a server-mandated wait
    WaitFor(Duration),
}

/// Errors that know whether repeating the request can help
pub trait RetryableError {
    fn retry_decision(&self) -> RetryDecision;
}

/// Run `operation` until it succeeds, fails permanently, or exhausts `config.max_retries`
pub async fn with_retry<T, E, F, Fut>(config: &RetryConfig, request: &str, mut operation: F) -> Result<T, E>
where
    E: RetryableError + std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt: u32 = 0;
    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(e) => e,
        };

        let wait = match err.retry_decision() {
            RetryDecision::Fail => {
                debug!("{} failed permanently: {}", request, err);
                return Err(err);
            }
            _ if attempt >= config.max_retries => {
                warn!("{} failed after {} attempts: {}", request, attempt + 1, err);
                return Err(err);
            }
            RetryDecision::WaitFor(wait) => wait,
            RetryDecision::Backoff => config.backoff(attempt),
        };

        warn!("{} attempt {} failed ({}), retrying in {:?}", request, attempt + 1, err, wait);
        sleep(wait).await;
        attempt += 1;
    }
}
