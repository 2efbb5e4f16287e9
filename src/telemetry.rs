//! Telemetry metric name constants.
//!
//! Consumers install their own `metrics` recorder (e.g. prometheus, statsd);
//! without a recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `scamscope_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `provider` — provider name (e.g. "openai_compat", "gemini")
//! - `status` — outcome: "ok" or "error"
//! - `error` — error kind for failed analyses (see `AnalysisError::kind`)

/// Total analyses attempted (one per `analyze` call).
///
/// Labels: `status` ("ok" | "error"), `error` (error kind, or "none").
pub const ANALYSES_TOTAL: &str = "scamscope_analyses_total";

/// End-to-end analysis duration in seconds, including retries.
pub const ANALYSIS_DURATION_SECONDS: &str = "scamscope_analysis_duration_seconds";

/// Total retry attempts (not counting the initial request).
///
/// Labels: `provider`.
pub const RETRIES_TOTAL: &str = "scamscope_retries_total";

/// Total provider calls.
///
/// Labels: `provider`, `status` ("ok" | "error").
pub const PROVIDER_REQUESTS_TOTAL: &str = "scamscope_provider_requests_total";
