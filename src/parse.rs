//! Model reply parsing and verdict normalization.

use serde_json::{Map, Value};

use crate::types::{DEFAULT_RECOMMENDATION, RiskLevel, Verdict};
use crate::{AnalysisError, Result};

/// Raw payloads attached to errors are cut to this many characters.
pub const RAW_EXCERPT_CHARS: usize = 200;

/// Strip a surrounding ```` ```json ```` / ```` ``` ```` fence, if present.
///
/// Text without a leading fence is returned trimmed but otherwise untouched.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

/// First [`RAW_EXCERPT_CHARS`] characters of `raw`, for logs and errors.
pub fn excerpt(raw: &str) -> String {
    raw.chars().take(RAW_EXCERPT_CHARS).collect()
}

/// Parse a model reply into a normalized [`Verdict`].
///
/// Fails with `Parse` when the (unfenced) text is not JSON and with `Schema`
/// when it is not an object with a boolean `isScam`.
pub fn parse_verdict(text: &str) -> Result<Verdict> {
    let body = strip_code_fence(text);
    let value: Value = serde_json::from_str(body).map_err(|e| AnalysisError::Parse {
        reason: e.to_string(),
        raw: excerpt(text),
    })?;

    let Value::Object(fields) = value else {
        return Err(AnalysisError::Schema {
            reason: "reply is not a JSON object".to_string(),
            raw: excerpt(text),
        });
    };

    normalize(&fields).ok_or_else(|| AnalysisError::Schema {
        reason: "missing boolean field `isScam`".to_string(),
        raw: excerpt(text),
    })
}

/// Build a verdict from the reply object. `None` when `isScam` is unusable.
fn normalize(fields: &Map<String, Value>) -> Option<Verdict> {
    let is_scam = fields.get("isScam")?.as_bool()?;

    let confidence = fields
        .get("confidence")
        .and_then(confidence_value)
        .filter(|c| c.is_finite())
        .map(|c| c.clamp(0.0, 100.0))
        .unwrap_or(0.0);

    // Absent means low. A label we do not know follows the scam flag instead,
    // so a positive verdict is never reported as low risk.
    let risk_level = match fields.get("riskLevel") {
        None | Some(Value::Null) => RiskLevel::Low,
        Some(level) => level
            .as_str()
            .and_then(RiskLevel::parse)
            .unwrap_or(if is_scam { RiskLevel::High } else { RiskLevel::Low }),
    };

    // Anything other than an array becomes empty; non-string entries are dropped.
    let indicators = match fields.get("indicators") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };

    let recommendation = fields
        .get("recommendation")
        .and_then(Value::as_str)
        .filter(|r| !r.trim().is_empty())
        .unwrap_or(DEFAULT_RECOMMENDATION)
        .to_string();

    Some(Verdict {
        is_scam,
        confidence,
        risk_level,
        indicators,
        recommendation,
    })
}

/// Numbers as-is; numeric strings such as `"87"` are accepted too.
fn confidence_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_json_fence() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn strips_bare_fence_with_trailing_whitespace() {
        assert_eq!(strip_code_fence("  ```\n{\"a\":1}\n```  \n"), "{\"a\":1}");
    }

    #[test]
    fn unfenced_text_is_only_trimmed() {
        assert_eq!(strip_code_fence("  {\"a\":1}\n"), "{\"a\":1}");
    }

    #[test]
    fn fence_without_closing_marker_is_still_opened() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn excerpt_respects_char_boundaries() {
        let raw = "é".repeat(RAW_EXCERPT_CHARS + 10);
        assert_eq!(excerpt(&raw).chars().count(), RAW_EXCERPT_CHARS);
    }

    #[test]
    fn confidence_is_clamped() {
        let v = parse_verdict(r#"{"isScam": false, "confidence": 150}"#).unwrap();
        assert_eq!(v.confidence, 100.0);
        let v = parse_verdict(r#"{"isScam": false, "confidence": -3}"#).unwrap();
        assert_eq!(v.confidence, 0.0);
    }

    #[test]
    fn fractional_confidence_passes_through() {
        let v = parse_verdict(r#"{"isScam": true, "confidence": 72.6, "riskLevel": "high"}"#)
            .unwrap();
        assert_eq!(v.confidence, 72.6);
        assert_eq!(
            serde_json::to_value(&v).unwrap()["confidence"],
            serde_json::json!(72.6)
        );
    }

    #[test]
    fn numeric_string_confidence_is_read() {
        let v = parse_verdict(r#"{"isScam": true, "confidence": "87"}"#).unwrap();
        assert_eq!(v.confidence, 87.0);
        let v = parse_verdict(r#"{"isScam": true, "confidence": "very"}"#).unwrap();
        assert_eq!(v.confidence, 0.0);
    }

    #[test]
    fn unknown_risk_level_follows_scam_flag() {
        let v = parse_verdict(r#"{"isScam": true, "confidence": 95, "riskLevel": "critical"}"#)
            .unwrap();
        assert_eq!(v.risk_level, RiskLevel::High);
        let v = parse_verdict(r#"{"isScam": false, "riskLevel": "none"}"#).unwrap();
        assert_eq!(v.risk_level, RiskLevel::Low);
    }

    #[test]
    fn missing_optional_fields_get_defaults() {
        let v = parse_verdict(r#"{"isScam": true}"#).unwrap();
        assert_eq!(v.confidence, 0.0);
        assert_eq!(v.risk_level, RiskLevel::Low);
        assert!(v.indicators.is_empty());
        assert_eq!(v.recommendation, DEFAULT_RECOMMENDATION);
    }

    #[test]
    fn risk_level_is_case_insensitive() {
        let v = parse_verdict(r#"{"isScam": true, "riskLevel": "HIGH"}"#).unwrap();
        assert_eq!(v.risk_level, RiskLevel::High);
    }

    #[test]
    fn non_string_indicators_are_dropped() {
        let v = parse_verdict(r#"{"isScam": true, "indicators": ["a", 3, null, "b"]}"#).unwrap();
        assert_eq!(v.indicators, vec!["a", "b"]);
    }

    #[test]
    fn string_is_scam_is_a_schema_error() {
        let err = parse_verdict(r#"{"isScam": "yes"}"#).unwrap_err();
        assert!(matches!(err, AnalysisError::Schema { .. }));
    }

    #[test]
    fn array_reply_is_a_schema_error() {
        let err = parse_verdict("[true]").unwrap_err();
        assert!(matches!(err, AnalysisError::Schema { .. }));
    }

    #[test]
    fn prose_reply_is_a_parse_error() {
        let err = parse_verdict("This looks like a scam to me.").unwrap_err();
        match err {
            AnalysisError::Parse { raw, .. } => assert!(raw.starts_with("This looks")),
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
