//! Types for the outbound text-generation call.

use serde::{Deserialize, Serialize};

/// Default model, served by the OpenAI-compatible Typhoon endpoint.
pub const DEFAULT_MODEL: &str = "typhoon-v2.5-30b-a3b-instruct";

/// Output format hint passed to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    Text,
    #[default]
    JsonObject,
}

/// Options for text generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Model to use for generation.
    pub model: String,

    /// Maximum number of tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Sampling temperature (0.0 to 2.0).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    #[serde(default)]
    pub response_format: ResponseFormat,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: Some(2500),
            temperature: Some(0.3),
            response_format: ResponseFormat::JsonObject,
        }
    }
}

impl GenerateOptions {
    /// Create options with the specified model and default sampling settings.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = format;
        self
    }
}

/// A single prompt-in/text-out request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    /// System instruction.
    pub system: String,
    /// User prompt, with the analyzed message already embedded.
    pub prompt: String,
    pub options: GenerateOptions,
}
