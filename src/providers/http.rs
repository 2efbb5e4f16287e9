//! HTTP status classification shared by the HTTP-backed providers.

use std::time::Duration;

use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client, Response, StatusCode};
use tracing::{error, warn};

use crate::error::ProviderError;
use crate::parse::excerpt;

/// Build the shared HTTP client with a transport timeout.
pub(crate) fn build_client(timeout: Duration) -> Result<Client, ProviderError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ProviderError::Http(format!("failed to build HTTP client: {e}")))
}

/// Map a non-success status (plus headers and body) to a [`ProviderError`].
///
/// Quota wording in the body is treated as rate limiting regardless of
/// status, since several providers report exhausted quotas as 400 or 403.
/// Likewise a rejected key is an authentication failure even when it comes
/// back as a 400 (Gemini answers `INVALID_ARGUMENT` / `API_KEY_INVALID`).
pub fn classify_status(status: StatusCode, headers: &HeaderMap, body: &str) -> ProviderError {
    match status.as_u16() {
        429 => ProviderError::RateLimited {
            retry_after: parse_retry_after(headers),
        },
        _ if mentions_quota(body) => ProviderError::RateLimited {
            retry_after: parse_retry_after(headers),
        },
        401 | 403 => ProviderError::AuthenticationFailed,
        402 => ProviderError::PaymentRequired,
        _ if mentions_api_key(body) => ProviderError::AuthenticationFailed,
        code => ProviderError::Api {
            status: code,
            message: excerpt(body),
        },
    }
}

/// Pass successful responses through; read and classify the rest.
pub(crate) async fn check_response(
    provider: &str,
    response: Response,
) -> Result<Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let headers = response.headers().clone();
    let body = response.text().await.unwrap_or_default();
    let err = classify_status(status, &headers, &body);
    if err.is_rate_limited() {
        warn!(provider, status = status.as_u16(), "provider rate limited");
    } else {
        error!(
            provider,
            status = status.as_u16(),
            body = %excerpt(&body),
            "provider returned error status"
        );
    }
    Err(err)
}

fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

fn mentions_quota(body: &str) -> bool {
    let lower = body.to_ascii_lowercase();
    lower.contains("quota") || lower.contains("rate limit") || lower.contains("rate_limit")
}

fn mentions_api_key(body: &str) -> bool {
    let lower = body.to_ascii_lowercase();
    lower.contains("api key") || lower.contains("api_key_invalid")
}
