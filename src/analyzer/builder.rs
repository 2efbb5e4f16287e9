//! Builder for configuring analyzer instances

use std::sync::Arc;

use super::ScamAnalyzer;
use crate::prompt::PromptTemplate;
use crate::providers::{RetryConfig, TextProvider};
use crate::types::GenerateOptions;
use crate::{AnalysisError, Result};

/// Builder for [`ScamAnalyzer`].
#[derive(Default)]
pub struct ScamAnalyzerBuilder {
    provider: Option<Arc<dyn TextProvider>>,
    prompt: Option<PromptTemplate>,
    retry: Option<RetryConfig>,
    options: Option<GenerateOptions>,
}

impl ScamAnalyzerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider that answers the analysis prompt. Required.
    pub fn provider(mut self, provider: Arc<dyn TextProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn prompt(mut self, prompt: PromptTemplate) -> Self {
        self.prompt = Some(prompt);
        self
    }

    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.retry = Some(retry);
        self
    }

    /// Model and sampling options sent with every request.
    pub fn options(mut self, options: GenerateOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn build(self) -> Result<ScamAnalyzer> {
        let provider = self.provider.ok_or_else(|| {
            AnalysisError::Configuration("no text provider configured".to_string())
        })?;
        Ok(ScamAnalyzer {
            provider,
            prompt: self.prompt.unwrap_or_default(),
            retry: self.retry.unwrap_or_default(),
            options: self.options.unwrap_or_default(),
        })
    }
}
