//! The structured assessment returned for each analyzed message.

use serde::{Deserialize, Serialize, Serializer};

/// Recommendation used when the model reply has none.
pub const DEFAULT_RECOMMENDATION: &str = "Unable to analyze message.";

/// Risk bucket assigned by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }

    /// Case-insensitive parse; unknown labels yield `None`.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "low" => Some(RiskLevel::Low),
            "medium" => Some(RiskLevel::Medium),
            "high" => Some(RiskLevel::High),
            _ => None,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scam assessment for one message. Always fully populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub is_scam: bool,
    /// 0-100, as the model reported it.
    #[serde(serialize_with = "serialize_confidence")]
    pub confidence: f64,
    pub risk_level: RiskLevel,
    /// Red flags in the order the model listed them.
    pub indicators: Vec<String>,
    pub recommendation: String,
}

// Whole numbers go out as JSON integers so `87` is not echoed back as `87.0`.
fn serialize_confidence<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 {
        serializer.serialize_u64(*value as u64)
    } else {
        serializer.serialize_f64(*value)
    }
}
