//! Provider trait for the prompt-in/text-out capability.
//!
//! The analyzer depends only on [`TextProvider`]; which concrete service
//! answers is decided by configuration. Providers classify their own
//! failures into [`ProviderError`] so the retry loop can tell quota
//! exhaustion apart from everything else.
//!
//! # Example
//!
//! ```ignore
//! struct Canned;
//!
//! #[async_trait]
//! impl TextProvider for Canned {
//!     fn name(&self) -> &str { "canned" }
//!
//!     async fn generate(&self, _request: &GenerateRequest) -> Result<String, ProviderError> {
//!         Ok(r#"{"isScam": false}"#.to_string())
//!     }
//! }
//! ```

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::types::GenerateRequest;

/// External text-generation service.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Provider name for logging/metrics.
    fn name(&self) -> &str;

    /// Run one generation. Absent content is reported as an empty string.
    async fn generate(&self, request: &GenerateRequest) -> Result<String, ProviderError>;
}
