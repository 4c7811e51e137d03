use serde::{Deserialize, Serialize};

/// Advisory prepended to the diagnosis when a safety classifier fires.
///
/// Injection checks `starts_with` against this exact constant, so any
/// wording change here is automatically picked up by both the injection
/// and the strip-on-preprocess paths.
pub const DISCLAIMER: &str =
    "This is AI-generated information, not a professional medical diagnosis.";

/// Fixed advice used when nothing usable remains after the cascade.
pub const ADVICE_FALLBACK: &str =
    "Please consult a healthcare professional for advice specific to your situation.";

/// Diagnosis text for empty or whitespace-only model output.
pub const EMPTY_RESPONSE_TEXT: &str =
    "No answer could be generated for this query.";

/// A field shorter than this (in characters, after trimming) is treated
/// as a failed extraction, which rejects bare labels and accidental matches.
pub const MIN_FIELD_CHARS: usize = 10;

/// Self-reported certainty attached to an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    /// Parse an explicit confidence label from model text.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The structured record returned to the HTTP layer.
///
/// Both text fields are guaranteed non-empty after trimming; the cascade
/// always falls back to fixed text rather than returning an empty field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedAnswer {
    pub diagnosis: String,
    pub advice: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
}

/// Policy knobs for the extractor.
///
/// Deployments diverge on both knobs (capped vs. uncapped fields, with or
/// without a confidence field), so neither is a hard-coded constant.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Per-field truncation cap in characters. `None` leaves fields uncapped.
    pub max_field_chars: Option<usize>,
    /// Whether the answer carries a `confidence` field.
    pub include_confidence: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_field_chars: None,
            include_confidence: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_parses_case_insensitive() {
        assert_eq!(Confidence::parse("LOW"), Some(Confidence::Low));
        assert_eq!(Confidence::parse(" medium "), Some(Confidence::Medium));
        assert_eq!(Confidence::parse("High"), Some(Confidence::High));
        assert_eq!(Confidence::parse("unknown"), None);
    }

    #[test]
    fn confidence_serializes_lowercase() {
        let json = serde_json::to_string(&Confidence::Low).unwrap();
        assert_eq!(json, "\"low\"");
    }

    #[test]
    fn answer_omits_absent_confidence() {
        let answer = ExtractedAnswer {
            diagnosis: "d".into(),
            advice: "a".into(),
            confidence: None,
        };
        let json = serde_json::to_string(&answer).unwrap();
        assert!(!json.contains("confidence"));
    }

    #[test]
    fn answer_serializes_confidence_when_present() {
        let answer = ExtractedAnswer {
            diagnosis: "d".into(),
            advice: "a".into(),
            confidence: Some(Confidence::High),
        };
        let json = serde_json::to_string(&answer).unwrap();
        assert!(json.contains("\"confidence\":\"high\""));
    }

    #[test]
    fn default_config_is_uncapped_with_confidence() {
        let cfg = ExtractorConfig::default();
        assert!(cfg.max_field_chars.is_none());
        assert!(cfg.include_confidence);
    }
}
