use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use scamscope::providers::retry::{RetryConfig, with_retry};
use scamscope::{AnalysisError, ProviderError};

/// Fails the first N calls with the given error, then succeeds.
struct FailThenSucceed {
    fail_count: AtomicU32,
    fail_with: fn() -> ProviderError,
    total_calls: AtomicU32,
}

impl FailThenSucceed {
    fn new(failures: u32, fail_with: fn() -> ProviderError) -> Self {
        Self {
            fail_count: AtomicU32::new(failures),
            fail_with,
            total_calls: AtomicU32::new(0),
        }
    }

    async fn call(&self) -> Result<&'static str, ProviderError> {
        self.total_calls.fetch_add(1, Ordering::Relaxed);
        let remaining = self.fail_count.load(Ordering::Relaxed);
        if remaining > 0 {
            self.fail_count.fetch_sub(1, Ordering::Relaxed);
            return Err((self.fail_with)());
        }
        Ok("ok")
    }

    fn call_count(&self) -> u32 {
        self.total_calls.load(Ordering::Relaxed)
    }
}

fn fast_config() -> RetryConfig {
    RetryConfig::new()
        .max_attempts(3)
        .initial_delay(Duration::from_millis(1))
}

#[tokio::test]
async fn retries_rate_limit_then_succeeds() {
    let op = FailThenSucceed::new(2, || ProviderError::RateLimited { retry_after: None });
    let result = with_retry(&fast_config(), "mock", || op.call()).await;

    assert_eq!(result.unwrap(), "ok");
    assert_eq!(op.call_count(), 3);
}

#[tokio::test]
async fn gives_up_after_max_attempts() {
    let op = FailThenSucceed::new(10, || ProviderError::RateLimited { retry_after: None });
    let result = with_retry(&fast_config(), "mock", || op.call()).await;

    assert!(matches!(
        result,
        Err(AnalysisError::RetriesExhausted { attempts: 3, .. })
    ));
    assert_eq!(op.call_count(), 3);
}

#[tokio::test]
async fn transport_errors_are_not_retried() {
    let op = FailThenSucceed::new(1, || ProviderError::Http("connection reset".into()));
    let result = with_retry(&fast_config(), "mock", || op.call()).await;

    assert!(matches!(
        result,
        Err(AnalysisError::Service(ProviderError::Http(_)))
    ));
    assert_eq!(op.call_count(), 1);
}

#[tokio::test]
async fn authentication_errors_are_not_retried() {
    let op = FailThenSucceed::new(1, || ProviderError::AuthenticationFailed);
    let result = with_retry(&fast_config().max_attempts(5), "mock", || op.call()).await;

    assert!(result.is_err());
    assert_eq!(op.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn respects_longer_retry_after_hint() {
    let op = FailThenSucceed::new(1, || ProviderError::RateLimited {
        retry_after: Some(Duration::from_secs(5)),
    });
    let config = RetryConfig::new()
        .max_attempts(2)
        .initial_delay(Duration::from_millis(10));

    let start = tokio::time::Instant::now();
    let result = with_retry(&config, "mock", || op.call()).await;

    assert!(result.is_ok());
    assert_eq!(start.elapsed(), Duration::from_secs(5));
}

#[tokio::test(start_paused = true)]
async fn long_hint_is_not_followed_by_a_shorter_wait() {
    let calls = AtomicU32::new(0);
    let waits = std::sync::Mutex::new(Vec::new());
    let last = std::sync::Mutex::new(tokio::time::Instant::now());
    let config = RetryConfig::new().max_attempts(3);

    let result = with_retry(&config, "mock", || {
        let n = calls.fetch_add(1, Ordering::Relaxed);
        let now = tokio::time::Instant::now();
        let mut last = last.lock().unwrap();
        if n > 0 {
            waits.lock().unwrap().push(now - *last);
        }
        *last = now;
        async move {
            match n {
                0 => Err(ProviderError::RateLimited {
                    retry_after: Some(Duration::from_secs(10)),
                }),
                1 => Err(ProviderError::RateLimited { retry_after: None }),
                _ => Ok("ok"),
            }
        }
    })
    .await;

    assert_eq!(result.unwrap(), "ok");
    assert_eq!(
        *waits.lock().unwrap(),
        vec![Duration::from_secs(10), Duration::from_secs(10)]
    );
}

#[tokio::test]
async fn disabled_config_makes_one_attempt() {
    let op = FailThenSucceed::new(1, || ProviderError::RateLimited { retry_after: None });
    let result = with_retry(&RetryConfig::disabled(), "mock", || op.call()).await;

    assert!(matches!(
        result,
        Err(AnalysisError::RetriesExhausted { attempts: 1, .. })
    ));
    assert_eq!(op.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn total_backoff_is_bounded_by_max_delay() {
    let op = FailThenSucceed::new(4, || ProviderError::RateLimited { retry_after: None });
    let config = RetryConfig::new()
        .max_attempts(5)
        .initial_delay(Duration::from_secs(1))
        .max_delay(Duration::from_secs(3));

    let start = tokio::time::Instant::now();
    let result = with_retry(&config, "mock", || op.call()).await;

    assert!(result.is_ok());
    // 1 + 2 + 3 + 3
    assert_eq!(start.elapsed(), Duration::from_secs(9));
}
