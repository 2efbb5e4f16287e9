//! HTTP service implementation.
//!
//! Exposes the analyzer as `POST /api/analyze-scam`, mapping each
//! [`AnalysisError`] onto the status code the presentation layer expects.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::{AnalysisError, ProviderError, ScamAnalyzer, Verdict};

/// Shared handler state.
#[derive(Clone)]
pub struct ScamService {
    analyzer: Arc<ScamAnalyzer>,
    setup_url: Option<String>,
}

impl ScamService {
    pub fn new(analyzer: Arc<ScamAnalyzer>) -> Self {
        Self {
            analyzer,
            setup_url: None,
        }
    }

    /// Link returned alongside 402 responses.
    pub fn with_setup_url(mut self, url: impl Into<String>) -> Self {
        self.setup_url = Some(url.into());
        self
    }

    pub fn router(self) -> Router {
        Router::new()
            .route("/api/analyze-scam", post(analyze_scam))
            .route("/health", get(health))
            .with_state(self)
    }
}

/// Error body: `{"error": "...", "setupUrl": "..."}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setup_url: Option<String>,
}

/// An [`AnalysisError`] rendered as an HTTP response.
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    pub fn from_analysis(err: &AnalysisError, setup_url: Option<&str>) -> Self {
        let status = StatusCode::from_u16(err.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let setup_url = match err {
            AnalysisError::Service(ProviderError::PaymentRequired) => setup_url.map(str::to_string),
            _ => None,
        };
        Self {
            status,
            body: ErrorBody {
                error: err.public_message(),
                setup_url,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

async fn analyze_scam(
    State(service): State<ScamService>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Verdict>, ApiError> {
    let Json(payload) = payload.map_err(|rejection| {
        debug!(error = %rejection, "rejected request body");
        ApiError::from_analysis(
            &AnalysisError::Validation("Invalid message provided: body must be JSON".to_string()),
            None,
        )
    })?;

    service
        .analyzer
        .analyze_payload(&payload)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_analysis(&e, service.setup_url.as_deref()))
}

#[derive(Serialize)]
struct Health<'a> {
    status: &'static str,
    version: &'static str,
    provider: &'a str,
}

async fn health(State(service): State<ScamService>) -> Response {
    Json(Health {
        status: "ok",
        version: crate::PKG_VERSION,
        provider: service.analyzer.provider_name(),
    })
    .into_response()
}
