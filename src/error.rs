//! Scamscope error types

use std::time::Duration;

/// Failure reported by a text-generation provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    #[error("authentication failed")]
    AuthenticationFailed,

    /// The provider account needs billing or setup before it will serve requests.
    #[error("payment required")]
    PaymentRequired,
}

impl ProviderError {
    /// Quota and rate-limit failures are the only ones worth retrying.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ProviderError::RateLimited { .. })
    }

    /// Provider-supplied wait hint, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            ProviderError::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }
}

/// Errors returned by [`ScamAnalyzer`](crate::ScamAnalyzer).
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("invalid input: {0}")]
    Validation(String),

    /// Upstream call failed for a reason other than rate limiting.
    #[error("provider error: {0}")]
    Service(ProviderError),

    #[error("rate limited on all {attempts} attempts: {last}")]
    RetriesExhausted { attempts: u32, last: ProviderError },

    #[error("empty response from model")]
    EmptyResponse,

    /// The model reply was not valid JSON. `raw` is truncated.
    #[error("failed to parse model reply: {reason}")]
    Parse { reason: String, raw: String },

    /// The model reply was JSON but not a usable verdict. `raw` is truncated.
    #[error("invalid verdict shape: {reason}")]
    Schema { reason: String, raw: String },

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl AnalysisError {
    /// HTTP status the error maps to on the inbound interface.
    pub fn status_code(&self) -> u16 {
        match self {
            AnalysisError::Validation(_) => 400,
            AnalysisError::Service(ProviderError::AuthenticationFailed) => 401,
            AnalysisError::Service(ProviderError::PaymentRequired) => 402,
            AnalysisError::RetriesExhausted { .. } => 429,
            _ => 500,
        }
    }

    /// Caller-facing message. Only validation errors carry their details;
    /// everything upstream-facing is reduced to a generic sentence.
    pub fn public_message(&self) -> String {
        match self {
            AnalysisError::Validation(msg) => msg.clone(),
            AnalysisError::Service(ProviderError::AuthenticationFailed) => {
                "The analysis provider rejected the configured API key. Update the API key and try again."
                    .to_string()
            }
            AnalysisError::Service(ProviderError::PaymentRequired) => {
                "The analysis provider requires billing setup before it can be used.".to_string()
            }
            AnalysisError::RetriesExhausted { .. } => {
                "Analysis provider rate limit exceeded. Please wait a few minutes before trying again."
                    .to_string()
            }
            AnalysisError::Parse { .. } => "Failed to parse AI response".to_string(),
            AnalysisError::Schema { .. } => "Invalid AI response format".to_string(),
            _ => "Failed to analyze message. Please try again.".to_string(),
        }
    }

    /// Errors caused by the caller rather than the service or its upstream.
    pub fn is_client_error(&self) -> bool {
        matches!(self, AnalysisError::Validation(_))
    }

    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::Validation(_) => "validation",
            AnalysisError::Service(_) => "service",
            AnalysisError::RetriesExhausted { .. } => "retries_exhausted",
            AnalysisError::EmptyResponse => "empty_response",
            AnalysisError::Parse { .. } => "parse",
            AnalysisError::Schema { .. } => "schema",
            AnalysisError::Configuration(_) => "configuration",
        }
    }
}

/// Result type alias for Scamscope operations
pub type Result<T> = std::result::Result<T, AnalysisError>;
