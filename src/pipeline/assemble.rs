//! Response assembler — the single entry point the HTTP layer calls.
//!
//! Sequence: classify the original text, sanitize if dangerous, extract
//! fields from the (possibly sanitized) text, then apply the disclaimer
//! policy. Pure in-memory transformation; the only logging is structured
//! outcome metadata, never query or response content.

use std::borrow::Cow;

use super::extract::extract;
use super::keywords::{first_dangerous_match, is_uncertain};
use super::sanitize::sanitize_response;
use super::types::{DISCLAIMER, ExtractedAnswer, ExtractorConfig};

/// Turn raw model output into the finished structured record.
pub fn assemble(raw_text: &str, config: &ExtractorConfig) -> ExtractedAnswer {
    // Classifiers run on the original text; sanitization must not be able
    // to mask the signals that decide disclaimer injection.
    let dangerous = first_dangerous_match(raw_text);
    let uncertain = is_uncertain(raw_text);

    let text: Cow<'_, str> = if dangerous.is_some() {
        Cow::Owned(sanitize_response(raw_text))
    } else {
        Cow::Borrowed(raw_text)
    };

    let mut answer = extract(&text, config);

    if (dangerous.is_some() || uncertain) && !answer.diagnosis.starts_with(DISCLAIMER) {
        answer.diagnosis = format!("{DISCLAIMER} {}", answer.diagnosis);
    }

    match dangerous {
        Some(reason) => tracing::warn!(
            outcome = "sanitized",
            uncertain,
            reason,
            "response pipeline: dangerous content neutralized"
        ),
        None if uncertain => tracing::info!(
            outcome = "disclaimed",
            "response pipeline: uncertainty disclaimer attached"
        ),
        None => tracing::debug!(outcome = "passed", "response pipeline: clean pass"),
    }

    answer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::types::Confidence;

    fn assemble_default(text: &str) -> ExtractedAnswer {
        assemble(text, &ExtractorConfig::default())
    }

    // =================================================================
    // DISCLAIMER POLICY
    // =================================================================

    #[test]
    fn hedged_response_gets_disclaimer_and_low_confidence() {
        let answer = assemble_default(
            "Diagnosis: This might be seasonal allergies\nAdvice: Keep windows closed on windy days",
        );
        assert!(answer.diagnosis.starts_with(DISCLAIMER));
        assert_eq!(answer.confidence, Some(Confidence::Low));
    }

    #[test]
    fn dangerous_response_gets_disclaimer() {
        let answer = assemble_default(
            "Diagnosis: You definitely have a sinus infection\nAdvice: A dose 500 of antibiotics clears it",
        );
        assert!(answer.diagnosis.starts_with(DISCLAIMER));
    }

    #[test]
    fn clean_response_gets_no_disclaimer() {
        let answer = assemble_default(
            "Diagnosis: Tension headache from long screen sessions\nAdvice: Regular breaks and good posture help",
        );
        assert!(!answer.diagnosis.starts_with(DISCLAIMER));
        assert!(!answer.diagnosis.contains(DISCLAIMER));
    }

    #[test]
    fn disclaimer_never_duplicated() {
        let raw = format!(
            "{DISCLAIMER} Diagnosis: It might be a mild viral infection\nAdvice: Rest and fluids for several days"
        );
        let answer = assemble_default(&raw);
        assert!(answer.diagnosis.starts_with(DISCLAIMER));
        assert_eq!(answer.diagnosis.matches(DISCLAIMER).count(), 1);
    }

    #[test]
    fn disclaimer_roundtrip_uses_exact_constant() {
        let answer = assemble_default(
            "It might be a cold. Rest well, drink fluids and sleep enough.",
        );
        assert!(answer.diagnosis.starts_with(DISCLAIMER));
        let stripped = answer
            .diagnosis
            .strip_prefix(DISCLAIMER)
            .unwrap()
            .trim_start();
        assert!(!stripped.starts_with(DISCLAIMER));
    }

    // =================================================================
    // SANITIZATION WIRING
    // =================================================================

    #[test]
    fn dangerous_content_sanitized_in_output() {
        let answer = assemble_default(
            "Diagnosis: A bacterial throat infection is likely\nAdvice: I prescribe a dose 500 mg twice a day",
        );
        let combined = format!("{} {}", answer.diagnosis, answer.advice);
        assert!(!combined.contains("dose 500"), "got: {combined}");
        assert!(!combined.to_lowercase().contains("prescribe "));
    }

    #[test]
    fn uncertainty_language_survives_sanitization() {
        let answer = assemble_default(
            "Diagnosis: This could be strep throat perhaps\nAdvice: Take 2 tablets until you see a doctor",
        );
        // Dangerous (take 2) triggers sanitize; hedge words must survive
        let combined = format!("{} {}", answer.diagnosis, answer.advice);
        assert!(combined.contains("could") || combined.contains("perhaps"));
        assert!(!combined.contains("Take 2"));
    }

    #[test]
    fn clean_text_passes_through_untouched_fields() {
        let answer = assemble_default(
            "Diagnosis: Mild seasonal cold symptoms\nAdvice: Warm drinks and rest for a few days",
        );
        assert_eq!(answer.diagnosis, "Mild seasonal cold symptoms");
        assert_eq!(answer.advice, "Warm drinks and rest for a few days");
    }

    // =================================================================
    // GUARANTEES
    // =================================================================

    #[test]
    fn both_fields_always_populated() {
        let inputs = [
            "",
            "   ",
            "Diagnosis:",
            "short",
            "A single unstructured sentence describing cold symptoms in detail.",
        ];
        for input in inputs {
            let answer = assemble_default(input);
            assert!(
                !answer.diagnosis.trim().is_empty(),
                "empty diagnosis for {input:?}"
            );
            assert!(!answer.advice.trim().is_empty(), "empty advice for {input:?}");
        }
    }

    #[test]
    fn confidence_respects_config() {
        let config = ExtractorConfig {
            max_field_chars: None,
            include_confidence: false,
        };
        let answer = assemble(
            "Diagnosis: Likely a common cold\nAdvice: Rest and plenty of fluids",
            &config,
        );
        assert!(answer.confidence.is_none());
    }
}
