//! Analyst prompt construction.
//!
//! The instruction text is data: [`PromptTemplate`] carries it into request
//! construction so it can be replaced from configuration without touching
//! the analysis pipeline.

use std::fs;
use std::path::Path;

use crate::types::{GenerateOptions, GenerateRequest};
use crate::{AnalysisError, Result};

/// Placeholder replaced by the analyzed message in the user template.
pub const MESSAGE_PLACEHOLDER: &str = "{message}";

/// Default user prompt. The message sits in a triple-quoted block.
pub const DEFAULT_USER_TEMPLATE: &str = "Message to analyze:\n\"\"\"\n{message}\n\"\"\"";

/// Default analyst instruction.
pub const DEFAULT_SYSTEM_PROMPT: &str = r#"You are a cybersecurity analyst who specializes in detecting scams and phishing. Treat unsolicited messages with suspicion.

SCAM INDICATORS:

1. Suspicious sender addresses (high risk)
   - Random-looking local parts or throwaway free-mail domains used for business
   - Personal or ISP mailboxes claiming to represent a company
   - A company name in the address but a domain the company does not own

2. Impersonation (high risk)
   - Misspelled or accented brand names standing in for the real one
   - Claims to be from a major organization without its official domain

3. Unsolicited business outreach (medium to high risk)
   - Cold partnership, sponsorship or collaboration offers from strangers
   - Free products in exchange for promotion
   - Flattery followed immediately by a request
   - Generic marketing language without concrete details

4. Pressure and extraction
   - Urgency, threats of account closure, or deadlines
   - Requests for money, gift cards, credentials, or personal data
   - Links or attachments that do not match the claimed sender

LEGITIMATE INDICATORS:
- Sender domain matches the organization
- Expected notifications for services the recipient signed up for
- Proper institutional contact details
- No request for money, credentials, or immediate action

RULES:
- Personal or ISP address + business proposal = scam
- Misspelled company name = scam
- Free product offer from an unknown address = scam
- When in doubt, flag it.

Respond with a single JSON object and nothing else:
{
  "isScam": boolean,
  "confidence": number (0-100),
  "riskLevel": "low" | "medium" | "high",
  "indicators": [specific red flags found],
  "recommendation": "clear advice explaining the verdict"
}"#;

/// System instruction plus user template used to build each request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    system: String,
    user_template: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            system: DEFAULT_SYSTEM_PROMPT.to_string(),
            user_template: DEFAULT_USER_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplate {
    /// Template with a custom system instruction and the default user template.
    pub fn new(system: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            ..Self::default()
        }
    }

    /// Load the system instruction from a text file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let system = fs::read_to_string(path).map_err(|e| {
            AnalysisError::Configuration(format!("Failed to read prompt file {path:?}: {e}"))
        })?;
        if system.trim().is_empty() {
            return Err(AnalysisError::Configuration(format!(
                "Prompt file {path:?} is empty"
            )));
        }
        Ok(Self::new(system))
    }

    /// Replace the user template. It must contain [`MESSAGE_PLACEHOLDER`].
    pub fn with_user_template(mut self, template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        if !template.contains(MESSAGE_PLACEHOLDER) {
            return Err(AnalysisError::Configuration(format!(
                "user template must contain {MESSAGE_PLACEHOLDER}"
            )));
        }
        self.user_template = template;
        Ok(self)
    }

    pub fn system(&self) -> &str {
        &self.system
    }

    /// Build the provider request for `message`.
    pub fn build(&self, message: &str, options: &GenerateOptions) -> GenerateRequest {
        GenerateRequest {
            system: self.system.clone(),
            prompt: self.user_template.replace(MESSAGE_PLACEHOLDER, message),
            options: options.clone(),
        }
    }
}
