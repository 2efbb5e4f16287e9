//! HTTP server, configuration, and analyzer assembly.
//!
//! This module provides:
//! - Configuration types (`config`)
//! - The axum service (`service`)
//! - [`build_analyzer`], which turns configuration into a ready analyzer

pub mod config;
pub mod service;

pub use service::ScamService;

use std::sync::Arc;

use crate::prompt::PromptTemplate;
use crate::providers::{GeminiClient, OpenAiCompatClient, RetryConfig, TextProvider};
use crate::{AnalysisError, Result, ScamAnalyzer};
use self::config::{Config, ProviderKind, Secrets};

/// Build a [`ScamAnalyzer`] from configuration.
pub fn build_analyzer(config: &Config, secrets: &Secrets) -> Result<ScamAnalyzer> {
    let kind = config.provider.kind;
    let api_key = secrets.api_key(kind).ok_or_else(|| {
        AnalysisError::Configuration(format!(
            "no API key for provider {}; set SCAMSCOPE_API_KEY or add it to secrets.toml",
            kind.as_str()
        ))
    })?;

    let timeout = config.provider.timeout();
    let provider: Arc<dyn TextProvider> = match kind {
        ProviderKind::OpenaiCompat => {
            let base_url = config
                .provider
                .base_url
                .as_deref()
                .unwrap_or(crate::providers::openai_compat::DEFAULT_BASE_URL);
            Arc::new(
                OpenAiCompatClient::with_timeout(api_key, base_url, timeout)
                    .map_err(AnalysisError::Service)?,
            )
        }
        ProviderKind::Gemini => {
            let base_url = config
                .provider
                .base_url
                .as_deref()
                .unwrap_or(crate::providers::gemini::DEFAULT_BASE_URL);
            Arc::new(
                GeminiClient::with_timeout(api_key, base_url, timeout)
                    .map_err(AnalysisError::Service)?,
            )
        }
    };

    let prompt = match &config.analysis.system_prompt_file {
        Some(path) => PromptTemplate::from_file(path)?,
        None => PromptTemplate::default(),
    };

    ScamAnalyzer::builder()
        .provider(provider)
        .prompt(prompt)
        .retry(RetryConfig::from(&config.retry))
        .options(config.generate_options())
        .build()
}
