use std::sync::LazyLock;

use regex::Regex;

/// A targeted substitution scoped to one dangerous phrasing.
struct RewriteRule {
    pattern: Regex,
    replacement: &'static str,
}

/// Rewrite rules applied in order; later rules see the output of earlier
/// ones. Each rule touches only its matched span; everything else in the
/// text (including uncertainty language and field labels) survives.
static REWRITE_RULES: LazyLock<Vec<RewriteRule>> = LazyLock::new(|| {
    vec![
        // Prescribing language → referral to a professional
        RewriteRule {
            pattern: Regex::new(r"(?i)\bprescrib(?:e|es|ed|ing)\b|\bprescriptions?\b")
                .expect("valid regex"),
            replacement: "consult a doctor about",
        },
        // Numeric dosage phrases → non-specific treatment
        RewriteRule {
            pattern: Regex::new(
                r"(?i)\b(?:dose|dosage)\s*(?:of\s+)?\d+(?:\.\d+)?\s*(?:mg|mcg|g|ml|milligrams?|units?)?\b",
            )
            .expect("valid regex"),
            replacement: "appropriate treatment",
        },
        // Numeric ingestion instructions → doctor-advised phrasing
        RewriteRule {
            pattern: Regex::new(
                r"(?i)\b(?:take|ingest)\s+\d+(?:\.\d+)?\s*(?:mg|mcg|g|ml|tablets?|pills?|capsules?|drops?)?\b",
            )
            .expect("valid regex"),
            replacement: "take the amount advised by your doctor",
        },
    ]
});

/// Neutralize dangerous phrasings in model output.
///
/// Redaction pass, not a rewrite of meaning. Callers apply it only when
/// `is_dangerous` returned true on the same text.
pub fn sanitize_response(text: &str) -> String {
    let mut result = text.to_string();
    for rule in REWRITE_RULES.iter() {
        result = rule.pattern.replace_all(&result, rule.replacement).into_owned();
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::keywords::is_dangerous;

    #[test]
    fn dosage_number_removed() {
        let out = sanitize_response("For adults a dose 500 mg is typical.");
        assert!(!out.contains("dose 500"), "got: {out}");
        assert!(out.contains("appropriate treatment"));
    }

    #[test]
    fn dosage_of_form_removed() {
        let out = sanitize_response("A dosage of 250mg twice daily.");
        assert!(!out.to_lowercase().contains("dosage of 250"));
    }

    #[test]
    fn prescribing_verb_replaced() {
        let out = sanitize_response("I would prescribe antibiotics.");
        assert!(!out.to_lowercase().contains("prescribe "));
        assert!(out.contains("consult a doctor about"));
    }

    #[test]
    fn ingestion_instruction_replaced() {
        let out = sanitize_response("Take 2 tablets with water.");
        assert!(!out.contains("Take 2"));
        assert!(out.to_lowercase().contains("advised by your doctor"));
    }

    #[test]
    fn sanitized_dangerous_text_passes_dosage_and_prescription_checks() {
        let inputs = [
            "You should get a prescription and a dose 500 of this.",
            "Prescribe yourself a dosage of 20 mg, ingest 3 pills.",
        ];
        let dose_re = Regex::new(r"(?i)\b(?:dose|dosage)\s*(?:of\s+)?\d").unwrap();
        let rx_re = Regex::new(r"(?i)\bprescrib(?:e|es|ed|ing)\b|\bprescriptions?\b").unwrap();
        for input in inputs {
            assert!(is_dangerous(input));
            let out = sanitize_response(input);
            assert!(!dose_re.is_match(&out), "dosage survived: {out}");
            assert!(!rx_re.is_match(&out), "prescription survived: {out}");
        }
    }

    #[test]
    fn untouched_text_outside_matched_spans() {
        let out = sanitize_response("Diagnosis: might be flu. Advice: dose 500 as needed.");
        // Labels and uncertainty language survive the redaction pass
        assert!(out.starts_with("Diagnosis: might be flu."));
        assert!(out.contains("Advice:"));
        assert!(out.contains("might"));
    }

    #[test]
    fn clean_text_unchanged() {
        let text = "Rest and fluids help most mild colds.";
        assert_eq!(sanitize_response(text), text);
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(sanitize_response(""), "");
    }
}
