//! Scamscope - LLM-backed scam message analysis
//!
//! This crate forwards a user-supplied message to a text-generation provider
//! together with a fixed analyst prompt, and turns the model's JSON reply into
//! a normalized [`Verdict`]. Rate-limit failures are retried with exponential
//! backoff; every other failure is reported once, as a typed
//! [`AnalysisError`] that maps onto an HTTP status.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use scamscope::{OpenAiCompatClient, ScamAnalyzer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = OpenAiCompatClient::new("sk-your-key")?;
//!     let analyzer = ScamAnalyzer::builder()
//!         .provider(Arc::new(provider))
//!         .build()?;
//!
//!     let verdict = analyzer
//!         .analyze("Congratulations! You won a free drone, reply with your bank details.")
//!         .await?;
//!
//!     println!("scam: {} ({}%)", verdict.is_scam, verdict.confidence);
//!     Ok(())
//! }
//! ```

pub mod analyzer;
pub mod error;
pub mod parse;
pub mod prompt;
pub mod providers;
#[cfg(feature = "server")]
pub mod server;
pub mod telemetry;
pub mod types;

// Re-export main types at crate root
pub use analyzer::{ScamAnalyzer, ScamAnalyzerBuilder, extract_message};
pub use error::{AnalysisError, ProviderError, Result};
pub use prompt::PromptTemplate;
pub use providers::{GeminiClient, OpenAiCompatClient, RetryConfig, TextProvider};
pub use types::{GenerateOptions, GenerateRequest, ResponseFormat, RiskLevel, Verdict};

/// Package version from Cargo.toml.
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");
