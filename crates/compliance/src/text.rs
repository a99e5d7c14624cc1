//! Linter for alert and report text.
//!
//! Text may describe the team and the practice as a system. It may not
//! address or describe a person: no titled names, no colleague references,
//! no diagnoses, and no personally addressed use of sensitive terms.

use crate::error::{ComplianceError, Result};

/// Tokens that turn the following capitalized word into a name reference.
///
/// German capitalizes every noun, so "Herr Doktor" or "Frau Praxisinhaberin"
/// are rejected too. These false positives are accepted: the linter fails
/// closed and generated text never needs a title.
const TITLE_TOKENS: &[&str] = &["frau", "herr", "herrn", "dr", "prof"];

/// Word prefixes that always refer to individuals.
const PERSONAL_REFERENCE_PREFIXES: &[&str] = &["kollege", "kollegin"];

/// Word prefixes naming clinical diagnoses or health states.
const DIAGNOSIS_PREFIXES: &[&str] = &[
    "depression",
    "depressiv",
    "angststoerung",
    "diagnose",
    "schwanger",
    "krebs",
    "tumor",
    "bandscheib",
    "migraene",
    "psychiatr",
    "suchterkrank",
    "alkoholkrank",
];

/// Sensitive terms and the personally addressed phrasings that make them illegal.
/// Systemic phrasing such as "Stresspraevention" stays allowed.
const CONTEXT_RULES: &[(&str, &[&str])] = &[
    (
        "stress",
        &["hat stress", "ist gestresst", "gestresst", "stress bei", "stress von"],
    ),
    (
        "burnout",
        &[
            "burnout bei",
            "hat burnout",
            "hat einen burnout",
            "hat ein burnout",
            "im burnout",
            "burnout von",
        ],
    ),
    (
        "krank",
        &["ist krank", "war krank", "ist erkrankt", "war erkrankt"],
    ),
];

fn transliterate(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    for ch in word.chars().flat_map(char::to_lowercase) {
        match ch {
            'ä' => out.push_str("ae"),
            'ö' => out.push_str("oe"),
            'ü' => out.push_str("ue"),
            'ß' => out.push_str("ss"),
            c if c.is_alphanumeric() => out.push(c),
            _ => {}
        }
    }
    out
}

fn reject(reason: &str, excerpt: impl Into<String>) -> ComplianceError {
    ComplianceError::NonCompliantText {
        reason: reason.to_string(),
        excerpt: excerpt.into(),
    }
}

/// Fail if `text` refers to an individual.
pub fn assert_text_compliance(text: &str) -> Result<()> {
    let raw: Vec<&str> = text.split_whitespace().collect();
    let words: Vec<String> = raw.iter().map(|w| transliterate(w)).collect();

    for (i, word) in words.iter().enumerate() {
        if TITLE_TOKENS.contains(&word.as_str()) {
            let next = raw
                .get(i + 1)
                .and_then(|w| w.trim_start_matches(|c: char| !c.is_alphanumeric()).chars().next());
            if next.is_some_and(char::is_uppercase) {
                return Err(reject("Anrede mit Namen", format!("{} {}", raw[i], raw[i + 1])));
            }
        }
        if PERSONAL_REFERENCE_PREFIXES.iter().any(|p| word.starts_with(p)) {
            return Err(reject("Bezug auf einzelne Person", raw[i]));
        }
        if DIAGNOSIS_PREFIXES.iter().any(|p| word.starts_with(p)) {
            return Err(reject("Gesundheitsdaten", raw[i]));
        }
    }

    // Pad so that patterns only match on word boundaries.
    let joined = format!(" {} ", words.join(" "));
    for (term, patterns) in CONTEXT_RULES {
        if !joined.contains(term) {
            continue;
        }
        if let Some(p) = patterns.iter().find(|p| joined.contains(&format!(" {p} "))) {
            return Err(reject("persoenliche Zuschreibung", *p));
        }
    }
    Ok(())
}

/// Lint every string in order, stopping at the first violation.
pub fn assert_all_text_compliance<'a, I>(texts: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    texts.into_iter().try_for_each(assert_text_compliance)
}
