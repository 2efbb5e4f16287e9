//! The scam analysis pipeline.
//!
//! validate → build prompt → call provider with retry → extract text →
//! strip fences → parse → check schema → normalize.

mod builder;

pub use builder::ScamAnalyzerBuilder;

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::parse::{excerpt, parse_verdict};
use crate::prompt::PromptTemplate;
use crate::providers::{RetryConfig, TextProvider, with_retry};
use crate::telemetry;
use crate::types::{GenerateOptions, Verdict};
use crate::{AnalysisError, Result};

/// Stateless adapter between a caller's message and a [`TextProvider`].
///
/// Cheap to share behind an `Arc`; concurrent calls do not interact.
pub struct ScamAnalyzer {
    provider: Arc<dyn TextProvider>,
    prompt: PromptTemplate,
    retry: RetryConfig,
    options: GenerateOptions,
}

impl ScamAnalyzer {
    pub fn builder() -> ScamAnalyzerBuilder {
        ScamAnalyzerBuilder::new()
    }

    /// Name of the configured provider.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Analyze one message.
    pub async fn analyze(&self, message: &str) -> Result<Verdict> {
        let start = Instant::now();
        let result = self.run(message).await;

        let (status, kind) = match &result {
            Ok(_) => ("ok", "none"),
            Err(e) => ("error", e.kind()),
        };
        metrics::counter!(telemetry::ANALYSES_TOTAL, "status" => status, "error" => kind)
            .increment(1);
        metrics::histogram!(telemetry::ANALYSIS_DURATION_SECONDS)
            .record(start.elapsed().as_secs_f64());

        match &result {
            Ok(verdict) => info!(
                provider = self.provider.name(),
                is_scam = verdict.is_scam,
                risk_level = %verdict.risk_level,
                confidence = verdict.confidence,
                "analysis complete"
            ),
            Err(e) if e.is_client_error() => debug!(error = %e, "rejected analysis request"),
            Err(e) => log_upstream_failure(self.provider.name(), e),
        }
        result
    }

    /// Analyze a request body of the form `{"message": "..."}`.
    pub async fn analyze_payload(&self, payload: &Value) -> Result<Verdict> {
        let message = extract_message(payload)?;
        self.analyze(message).await
    }

    async fn run(&self, message: &str) -> Result<Verdict> {
        validate_message(message)?;

        let request = self.prompt.build(message, &self.options);
        let provider = self.provider.as_ref();
        let text = with_retry(&self.retry, provider.name(), || provider.generate(&request)).await?;

        if text.trim().is_empty() {
            return Err(AnalysisError::EmptyResponse);
        }
        debug!(reply = %excerpt(&text), "model reply received");

        parse_verdict(&text)
    }
}

/// Pull the `message` string out of a request body.
pub fn extract_message(payload: &Value) -> Result<&str> {
    match payload.get("message") {
        None | Some(Value::Null) => Err(AnalysisError::Validation(
            "Invalid message provided: `message` is required".to_string(),
        )),
        Some(Value::String(message)) => Ok(message),
        Some(_) => Err(AnalysisError::Validation(
            "Invalid message provided: `message` must be a string".to_string(),
        )),
    }
}

fn validate_message(message: &str) -> Result<()> {
    if message.trim().is_empty() {
        return Err(AnalysisError::Validation(
            "Invalid message provided: `message` must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn log_upstream_failure(provider: &str, err: &AnalysisError) {
    match err {
        AnalysisError::Service(source) => {
            error!(provider, status = err.status_code(), error = %source, "provider call failed")
        }
        AnalysisError::RetriesExhausted { attempts, last } => {
            warn!(provider, attempts, error = %last, "rate limited on every attempt")
        }
        AnalysisError::Parse { reason, raw } | AnalysisError::Schema { reason, raw } => {
            error!(provider, %reason, raw = %raw, "unusable model reply")
        }
        other => error!(provider, error = %other, "analysis failed"),
    }
}
