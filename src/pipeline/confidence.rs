use std::sync::LazyLock;

use regex::Regex;

use super::keywords::is_uncertain;
use super::types::Confidence;

/// Explicit `confidence: low|medium|high` label in the text.
static EXPLICIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bconfidence\s*[:=]?\s*(low|medium|high)\b").expect("valid regex")
});

/// Hedged-frequency vocabulary: statements about what typically happens.
static FREQUENCY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:typically|usually|often|common(?:ly)?)\b").expect("valid regex")
});

/// Absolute-certainty vocabulary.
static CERTAINTY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:clear(?:ly)?|definite(?:ly)?|certain(?:ly)?)\b").expect("valid regex")
});

/// Derive a confidence level from model text.
///
/// Order matters: an explicit label always wins; absent that, the
/// uncertainty classifier takes priority over the frequency/certainty
/// heuristics; the default is medium.
pub fn derive_confidence(text: &str) -> Confidence {
    if let Some(caps) = EXPLICIT_RE.captures(text) {
        if let Some(level) = Confidence::parse(&caps[1]) {
            return level;
        }
    }
    if is_uncertain(text) {
        return Confidence::Low;
    }
    if FREQUENCY_RE.is_match(text) {
        return Confidence::Medium;
    }
    if CERTAINTY_RE.is_match(text) {
        return Confidence::High;
    }
    Confidence::Medium
}
