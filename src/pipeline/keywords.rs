use std::sync::LazyLock;

use regex::Regex;

/// A compiled pattern with a short description for the audit log.
struct LexicalPattern {
    regex: Regex,
    description: &'static str,
}

fn pattern(regex_str: &str, description: &'static str) -> LexicalPattern {
    LexicalPattern {
        regex: Regex::new(regex_str).expect("Invalid keyword regex pattern"),
        description,
    }
}

/// Dangerous-content patterns: unsafe, overly specific, or absolute
/// medical claims. Word-boundary matched, case-insensitive.
static DANGEROUS_PATTERNS: LazyLock<Vec<LexicalPattern>> = LazyLock::new(|| {
    vec![
        pattern(
            r"(?i)\bprescrib(?:e|es|ed|ing)\b|\bprescriptions?\b",
            "Prescribing language: 'prescribe'/'prescription'",
        ),
        pattern(
            r"(?i)\b(?:dose|dosage)\s*(?:of\s+)?\d",
            "Numeric dosage phrase: 'dose/dosage [number]'",
        ),
        pattern(
            r"(?i)\b(?:take|ingest)\s+\d",
            "Numeric ingestion instruction: 'take/ingest [number]'",
        ),
        pattern(
            r"(?i)\b(?:aspirin|ibuprofen|acetaminophen|paracetamol|amoxicillin|penicillin|metformin|insulin|warfarin|codeine)\b",
            "Specific medication mention",
        ),
        pattern(
            r"(?i)\bdefinitely\s+(?:have|diagnosed)\b",
            "Absolute diagnostic claim: 'definitely have/diagnosed'",
        ),
        pattern(
            r"(?i)\bguaranteed?\b",
            "Unconditional guarantee: 'guarantee(d)'",
        ),
    ]
});

/// Uncertainty-content patterns: hedging language used as a signal to
/// attach the disclaimer and lower confidence.
static UNCERTAINTY_PATTERNS: LazyLock<Vec<LexicalPattern>> = LazyLock::new(|| {
    vec![
        pattern(
            r"(?i)\b(?:maybe|perhaps|might|possibly|uncertain|unclear)\b",
            "Hedging adverb",
        ),
        pattern(
            r"(?i)\b(?:not\s+sure|don'?t\s+know|do\s+not\s+know|cannot\s+(?:say|tell|determine)|can'?t\s+(?:say|tell|determine)|hard\s+to\s+say)\b",
            "Admission of not knowing",
        ),
        pattern(
            r"(?i)\b(?:suggests|indicates|may|could)\b",
            "Hedging verb: 'suggests'/'indicates'/'may'/'could'",
        ),
    ]
});

fn first_match<'a>(patterns: &'a [LexicalPattern], text: &str) -> Option<&'a str> {
    patterns
        .iter()
        .find(|p| p.regex.is_match(text))
        .map(|p| p.description)
}

/// Description of the first dangerous pattern matching `text`, if any.
/// Used by the assembler for audit logging without echoing content.
pub fn first_dangerous_match(text: &str) -> Option<&'static str> {
    first_match(&DANGEROUS_PATTERNS, text)
}

/// Does the text contain unsafe or over-confident medical phrasing?
///
/// Lexical heuristic only: a match is a surface pattern hit, not a
/// judgment of clinical validity.
pub fn is_dangerous(text: &str) -> bool {
    first_dangerous_match(text).is_some()
}

/// Does the text hedge, explicitly or through hedging verbs?
pub fn is_uncertain(text: &str) -> bool {
    first_match(&UNCERTAINTY_PATTERNS, text).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    // =================================================================
    // DANGEROUS CONTENT
    // =================================================================

    #[test]
    fn prescribing_verb_is_dangerous() {
        assert!(is_dangerous("I would prescribe antibiotics for this."));
        assert!(is_dangerous("You need a prescription for that."));
    }

    #[test]
    fn numeric_dosage_is_dangerous() {
        assert!(is_dangerous("A typical dose 500 mg works for adults."));
        assert!(is_dangerous("The dosage of 250mg is standard."));
    }

    #[test]
    fn numeric_ingestion_is_dangerous() {
        assert!(is_dangerous("Take 2 tablets every four hours."));
        assert!(is_dangerous("Ingest 10 ml before sleeping."));
    }

    #[test]
    fn specific_medication_is_dangerous() {
        assert!(is_dangerous("Ibuprofen will fix that headache."));
        assert!(is_dangerous("Start metformin right away."));
    }

    #[test]
    fn absolute_diagnostic_claim_is_dangerous() {
        assert!(is_dangerous("You definitely have influenza."));
        assert!(is_dangerous("You are definitely diagnosed with it."));
    }

    #[test]
    fn guarantee_is_dangerous() {
        assert!(is_dangerous("This remedy is guaranteed to cure you."));
        assert!(is_dangerous("I guarantee a full recovery."));
    }

    #[test]
    fn dangerous_match_carries_description() {
        let desc = first_dangerous_match("I guarantee it.").unwrap();
        assert!(desc.contains("guarantee"));
    }

    #[test]
    fn dose_without_number_is_not_dangerous() {
        assert!(!is_dangerous("The right dose depends on many factors."));
    }

    #[test]
    fn take_without_number_is_not_dangerous() {
        assert!(!is_dangerous("Take plenty of rest and fluids."));
    }

    // =================================================================
    // UNCERTAINTY CONTENT
    // =================================================================

    #[test]
    fn hedging_adverbs_are_uncertain() {
        for text in [
            "It might be a viral infection.",
            "Perhaps this is seasonal.",
            "This is possibly allergic rhinitis.",
            "The cause is unclear from your description.",
        ] {
            assert!(is_uncertain(text), "should be uncertain: {text}");
        }
    }

    #[test]
    fn admission_of_not_knowing_is_uncertain() {
        assert!(is_uncertain("I'm not sure what is causing this."));
        assert!(is_uncertain("I don't know without more detail."));
        assert!(is_uncertain("It is hard to say from symptoms alone."));
    }

    #[test]
    fn hedging_verbs_are_uncertain() {
        assert!(is_uncertain("This suggests a mild infection."));
        assert!(is_uncertain("The pattern indicates dehydration."));
        assert!(is_uncertain("It could be stress related."));
    }

    #[test]
    fn confident_plain_text_is_not_uncertain() {
        assert!(!is_uncertain(
            "Rest, fluids, and sleep help the body recover from a cold."
        ));
    }

    // =================================================================
    // EDGE CASES
    // =================================================================

    #[test]
    fn case_insensitive_detection() {
        assert!(is_dangerous("PRESCRIBE bed rest and pills."));
        assert!(is_uncertain("MAYBE it will pass."));
    }

    #[test]
    fn clean_text_matches_neither() {
        let text = "Common colds usually resolve on their own within a week.";
        assert!(!is_dangerous(text));
        // "usually" is a frequency word, not a hedging pattern
        assert!(!is_uncertain(text));
    }

    #[test]
    fn empty_input_matches_neither() {
        assert!(!is_dangerous(""));
        assert!(!is_uncertain(""));
    }

    #[test]
    fn word_boundaries_respected() {
        // "undertake" must not trigger the take-a-number pattern,
        // "overdosed" must not trigger the dosage pattern
        assert!(!is_dangerous("They undertake 3 reviews per year or overdosed-looking text."));
    }
}
