//! Retry configuration and the rate-limit retry loop.
//!
//! Only [`ProviderError::RateLimited`] is retried. Every other provider
//! failure is returned on the first occurrence so that configuration
//! problems such as a bad key surface immediately.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::ProviderError;
use crate::telemetry;
use crate::{AnalysisError, Result};

/// Configuration for retry behaviour on rate-limit errors.
///
/// Uses exponential backoff:
///
/// ```rust
/// # use scamscope::RetryConfig;
/// # use std::time::Duration;
/// let config = RetryConfig::new()
///     .max_attempts(5)
///     .initial_delay(Duration::from_millis(200));
/// assert_eq!(config.delay_for_attempt(2), Duration::from_millis(800));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the initial request).
    /// 1 = no retry. Default: 3.
    pub max_attempts: u32,
    /// Delay before the first retry. Default: 2s.
    pub initial_delay: Duration,
    /// Maximum delay between retries (caps exponential growth). Default: 30s.
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config that disables retries (single attempt).
    pub fn disabled() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Set maximum attempts (including the initial request). Values below 1 are raised to 1.
    pub fn max_attempts(mut self, n: u32) -> Self {
        self.max_attempts = n.max(1);
        self
    }

    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Delay after the failed attempt `attempt` (0-indexed).
    ///
    /// `initial_delay * 2^attempt`, capped at `max_delay`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay = self
            .initial_delay
            .saturating_mul(2u32.saturating_pow(attempt));
        delay.min(self.max_delay)
    }

    /// Backoff delay, lengthened (never shortened) by a provider `retry_after` hint.
    ///
    /// The hint is also capped at `max_delay`.
    pub fn effective_delay(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        let backoff = self.delay_for_attempt(attempt);
        match retry_after {
            Some(hint) => backoff.max(hint.min(self.max_delay)),
            None => backoff,
        }
    }
}

/// Execute a provider call with rate-limit retries.
///
/// - Success on any attempt is returned as-is.
/// - A non-rate-limit error aborts with [`AnalysisError::Service`].
/// - Rate limiting on every attempt yields [`AnalysisError::RetriesExhausted`].
///
/// Each wait is at least as long as the one before it.
pub async fn with_retry<F, Fut, T>(config: &RetryConfig, provider_name: &str, f: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = std::result::Result<T, ProviderError>>,
{
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 0;
    // Waits never shrink, even when an earlier attempt carried a long hint.
    let mut previous_delay = Duration::ZERO;
    loop {
        match f().await {
            Ok(result) => {
                metrics::counter!(telemetry::PROVIDER_REQUESTS_TOTAL,
                    "provider" => provider_name.to_owned(),
                    "status" => "ok",
                )
                .increment(1);
                return Ok(result);
            }
            Err(e) => {
                metrics::counter!(telemetry::PROVIDER_REQUESTS_TOTAL,
                    "provider" => provider_name.to_owned(),
                    "status" => "error",
                )
                .increment(1);

                if !e.is_rate_limited() {
                    return Err(AnalysisError::Service(e));
                }
                if attempt + 1 >= max_attempts {
                    return Err(AnalysisError::RetriesExhausted {
                        attempts: max_attempts,
                        last: e,
                    });
                }

                let delay = config
                    .effective_delay(attempt, e.retry_after())
                    .max(previous_delay);
                previous_delay = delay;
                metrics::counter!(telemetry::RETRIES_TOTAL,
                    "provider" => provider_name.to_owned(),
                )
                .increment(1);
                warn!(
                    provider = provider_name,
                    attempt = attempt + 1,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "rate limited, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
