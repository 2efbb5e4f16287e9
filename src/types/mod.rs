//! Public types for the Scamscope API.

mod generate;
mod verdict;

pub use generate::{DEFAULT_MODEL, GenerateOptions, GenerateRequest, ResponseFormat};
pub use verdict::{DEFAULT_RECOMMENDATION, RiskLevel, Verdict};
