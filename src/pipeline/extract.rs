//! Field extraction cascade — turns free-form model prose into the
//! `diagnosis`/`advice` record.
//!
//! Strategies are tried in a fixed order and the first acceptable result
//! per field wins: labeled-field regexes, then a label-stripped heuristic
//! split, then a proportional split near the midpoint, then a final
//! normalization pass that guarantees both fields are populated.

use std::sync::LazyLock;

use regex::Regex;

use super::confidence::derive_confidence;
use super::types::{
    ADVICE_FALLBACK, DISCLAIMER, EMPTY_RESPONSE_TEXT, ExtractedAnswer, ExtractorConfig,
    MIN_FIELD_CHARS,
};

/// Sentence-boundary search floor for the proportional split, as a
/// fraction of the block length.
const SENTENCE_SEARCH_FLOOR: f32 = 0.3;

const DIAGNOSIS_LABEL: &str = r"(?:diagnosis(?:\s*/\s*assessment)?|assessment)";
const ADVICE_LABEL: &str = r"(?:advice(?:\s*/\s*recommendations?)?|recommendations?)";

/// Diagnosis content bounded by the next advice label, a blank line, or
/// end of text, in that specificity order.
static DIAGNOSIS_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(&format!(
            r"(?is)\b{DIAGNOSIS_LABEL}\s*:\s*(.+?)\s*\b{ADVICE_LABEL}\s*:"
        ))
        .expect("valid regex"),
        Regex::new(&format!(r"(?is)\b{DIAGNOSIS_LABEL}\s*:\s*(.+?)\n\s*\n"))
            .expect("valid regex"),
        Regex::new(&format!(r"(?is)\b{DIAGNOSIS_LABEL}\s*:\s*(.+)\z")).expect("valid regex"),
    ]
});

/// Advice content bounded by end of text; the colon-less line-start form
/// is the less specific fallback.
static ADVICE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(&format!(r"(?is)\b{ADVICE_LABEL}\s*:\s*(.+)\z")).expect("valid regex"),
        Regex::new(r"(?ism)^\s*(?:advice|recommendations?)\b\s*(.+)\z").expect("valid regex"),
    ]
});

/// Any recognized field label, for stripping.
static LABEL_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b(?:{DIAGNOSIS_LABEL}|{ADVICE_LABEL})\s*:?\s*"
    ))
    .expect("valid regex")
});

/// Dash-like separator immediately before a recognized label.
static DASH_BEFORE_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\s*[—–-]+\s*({DIAGNOSIS_LABEL}|{ADVICE_LABEL})"
    ))
    .expect("valid regex")
});

/// Any run of dash-like characters used as an inline separator.
/// Single hyphens are left alone so hyphenated words survive.
static DASH_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*(?:—+|–+|-{2,})\s*").expect("valid regex"));

/// Split points for the label-stripped heuristic stage: blank-line runs
/// or inline advice/recommendation markers.
static HEURISTIC_SPLIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\n\s*\n|\badvice\b\s*:?|\brecommendations?\b\s*:?").expect("valid regex")
});

/// Spillover advice label inside a diagnosis capture.
static ADVICE_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b{ADVICE_LABEL}\s*:")).expect("valid regex")
});

/// Spillover diagnosis label inside an advice capture.
static DIAGNOSIS_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b{DIAGNOSIS_LABEL}\s*:")).expect("valid regex")
});

/// Trailing explicit confidence label inside an advice capture.
static TRAILING_CONFIDENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bconfidence\s*[:=]?\s*(?:low|medium|high)\s*\z").expect("valid regex")
});

static TRAILING_DASH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s—–-]+\z").expect("valid regex"));

static WHITESPACE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Extract the structured record from (possibly sanitized) model text.
///
/// Never fails: any non-empty input yields two populated fields, and
/// empty input short-circuits to fixed fallback text.
pub fn extract(text: &str, config: &ExtractorConfig) -> ExtractedAnswer {
    let cleaned = preprocess(text);

    if cleaned.trim().is_empty() {
        return ExtractedAnswer {
            diagnosis: EMPTY_RESPONSE_TEXT.to_string(),
            advice: ADVICE_FALLBACK.to_string(),
            confidence: config.include_confidence.then_some(derive_confidence("")),
        };
    }

    // Labeled fields first.
    let mut diagnosis = labeled_field(&cleaned, &DIAGNOSIS_PATTERNS).map(|c| clean_diagnosis(&c));
    let mut advice = labeled_field(&cleaned, &ADVICE_PATTERNS).map(|c| clean_advice(&c));

    // Heuristic splits fill whatever the labels left empty.
    if diagnosis.is_none() || advice.is_none() {
        let (split_diagnosis, split_advice) = heuristic_split(&cleaned);
        diagnosis = diagnosis.or(split_diagnosis);
        advice = advice.or(split_advice);
    }

    // Final normalization guarantees both fields.
    finalize(&cleaned, diagnosis, advice, config)
}

/// Strip an existing disclaimer and normalize inline separator idioms
/// into newlines so later stages see line-delimited blocks.
fn preprocess(text: &str) -> String {
    let mut t = text.trim().to_string();
    if let Some(rest) = t.strip_prefix(DISCLAIMER) {
        t = rest.trim_start().to_string();
    }
    if let Some(rest) = t.strip_suffix(DISCLAIMER) {
        t = rest.trim_end().to_string();
    }
    let t = DASH_BEFORE_LABEL_RE.replace_all(&t, "\n$1");
    DASH_RUN_RE.replace_all(&t, "\n").into_owned()
}

/// First pattern whose raw capture exceeds the minimum length wins;
/// later patterns for the field are not tried.
fn labeled_field(text: &str, patterns: &[Regex]) -> Option<String> {
    for pattern in patterns {
        if let Some(caps) = pattern.captures(text) {
            let content = caps[1].trim().to_string();
            if exceeds_min(&content) {
                return Some(content);
            }
        }
    }
    None
}

fn clean_diagnosis(capture: &str) -> String {
    // Cut trailing spillover into the advice field's label
    let cut = match ADVICE_LABEL_RE.find(capture) {
        Some(m) => &capture[..m.start()],
        None => capture,
    };
    collapse_ws(&TRAILING_DASH_RE.replace(cut, ""))
}

fn clean_advice(capture: &str) -> String {
    // Cut trailing spillover into the diagnosis field's label, then a
    // trailing explicit confidence label
    let cut = match DIAGNOSIS_LABEL_RE.find(capture) {
        Some(m) => &capture[..m.start()],
        None => capture,
    };
    let cut = match TRAILING_CONFIDENCE_RE.find(cut) {
        Some(m) => &cut[..m.start()],
        None => cut,
    };
    collapse_ws(&TRAILING_DASH_RE.replace(cut, ""))
}

/// Strip labels and split on blank lines or advice markers. A single
/// undivided block falls through to the proportional split.
fn heuristic_split(cleaned: &str) -> (Option<String>, Option<String>) {
    let parts: Vec<String> = HEURISTIC_SPLIT_RE
        .split(cleaned)
        .map(|p| collapse_ws(&LABEL_TOKEN_RE.replace_all(p, " ")))
        .filter(|p| !p.is_empty())
        .collect();

    match parts.len() {
        0 => (None, None),
        1 => proportional_split(&parts[0]),
        _ => (Some(parts[0].clone()), Some(parts[1..].join(" "))),
    }
}

/// Split near the midpoint, preferring the nearest preceding sentence
/// boundary when it lies beyond 30% of the block.
fn proportional_split(block: &str) -> (Option<String>, Option<String>) {
    let chars: Vec<char> = block.chars().collect();
    if chars.is_empty() {
        return (None, None);
    }

    let mid = chars.len() / 2;
    let floor = (chars.len() as f32 * SENTENCE_SEARCH_FLOOR) as usize;
    let mut split = mid;
    for i in (0..=mid.min(chars.len() - 1)).rev() {
        if matches!(chars[i], '.' | '!' | '?') {
            if i > floor {
                split = i + 1;
            }
            break;
        }
    }

    let diagnosis: String = chars[..split].iter().collect();
    let advice: String = chars[split..].iter().collect();
    (non_empty(diagnosis), non_empty(advice))
}

/// Strip leading labels, guarantee both fields, collapse whitespace,
/// apply the configured cap.
fn finalize(
    cleaned: &str,
    diagnosis: Option<String>,
    advice: Option<String>,
    config: &ExtractorConfig,
) -> ExtractedAnswer {
    let full = collapse_ws(&LABEL_TOKEN_RE.replace_all(cleaned, " "));

    let mut diagnosis = strip_leading_labels(&diagnosis.unwrap_or_default());
    let mut advice = strip_leading_labels(&advice.unwrap_or_default());

    if !exceeds_min(&diagnosis) {
        diagnosis = if full.is_empty() {
            // Nothing but labels in the input
            EMPTY_RESPONSE_TEXT.to_string()
        } else {
            full.clone()
        };
    }
    if !exceeds_min(&advice) {
        // Whatever follows the accepted diagnosis span, if anything
        advice = full
            .find(&diagnosis)
            .map(|i| clean_advice(&full[i + diagnosis.len()..]))
            .unwrap_or_default();
        if !exceeds_min(&advice) {
            advice = ADVICE_FALLBACK.to_string();
        }
    }

    diagnosis = collapse_ws(&diagnosis);
    advice = collapse_ws(&advice);
    if let Some(cap) = config.max_field_chars {
        diagnosis = truncate_chars(&diagnosis, cap);
        advice = truncate_chars(&advice, cap);
    }

    ExtractedAnswer {
        diagnosis,
        advice,
        confidence: config
            .include_confidence
            .then(|| derive_confidence(cleaned)),
    }
}

fn strip_leading_labels(s: &str) -> String {
    let mut out = s.trim_start();
    while let Some(m) = LABEL_TOKEN_RE.find(out) {
        if m.start() != 0 {
            break;
        }
        out = out[m.end()..].trim_start();
    }
    out.trim().to_string()
}

fn exceeds_min(s: &str) -> bool {
    s.trim().chars().count() > MIN_FIELD_CHARS
}

fn collapse_ws(s: &str) -> String {
    WHITESPACE_RUN_RE.replace_all(s.trim(), " ").into_owned()
}

/// Character-count truncation over Unicode scalar values, so a
/// multi-byte sequence is never split.
fn truncate_chars(s: &str, cap: usize) -> String {
    if s.chars().count() <= cap {
        s.to_string()
    } else {
        s.chars().take(cap).collect::<String>().trim_end().to_string()
    }
}

fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
