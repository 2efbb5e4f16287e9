//! Text-generation providers and the retry loop around them.

pub mod gemini;
pub mod http;
pub mod openai_compat;
pub mod retry;
pub mod traits;

pub use gemini::GeminiClient;
pub use openai_compat::OpenAiCompatClient;
pub use retry::{RetryConfig, with_retry};
pub use traits::TextProvider;
