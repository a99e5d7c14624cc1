//! Group-key sanitization against a closed whitelist.
//!
//! Free-text role labels are mapped by exact match first, then through the
//! alias table. Anything else lands in [`CATCH_ALL_GROUP_KEY`] so that a rare
//! role name cannot single out the one person holding it.

use praxis_core::PRACTICE_GROUP_KEY;

pub const CATCH_ALL_GROUP_KEY: &str = "SONSTIGE";

pub const ALLOWED_GROUP_KEYS: &[&str] = &[
    PRACTICE_GROUP_KEY,
    "ZAHNARZT",
    "ZFA",
    "ZMP",
    "DH",
    "ZMV",
    "STERI",
    "REZEPTION",
    "PRAXISMANAGEMENT",
    "AZUBI",
    CATCH_ALL_GROUP_KEY,
];

/// Normalized alias → whitelisted key.
const GROUP_KEY_ALIASES: &[(&str, &str)] = &[
    ("praxis", PRACTICE_GROUP_KEY),
    ("gesamt", PRACTICE_GROUP_KEY),
    ("gesamtpraxis", PRACTICE_GROUP_KEY),
    ("zahnarzt", "ZAHNARZT"),
    ("zahnaerztin", "ZAHNARZT"),
    ("zahnaerzte", "ZAHNARZT"),
    ("dentist", "ZAHNARZT"),
    ("behandler", "ZAHNARZT"),
    ("zahnmedizinische fachangestellte", "ZFA"),
    ("stuhlassistenz", "ZFA"),
    ("assistenz", "ZFA"),
    ("chairside", "ZFA"),
    ("dental assistant", "ZFA"),
    ("zmf", "ZFA"),
    ("prophylaxe", "ZMP"),
    ("prophy", "ZMP"),
    ("prophylaxeassistenz", "ZMP"),
    ("zahnmedizinische prophylaxeassistentin", "ZMP"),
    ("dentalhygienikerin", "DH"),
    ("dentalhygieniker", "DH"),
    ("dental hygienist", "DH"),
    ("verwaltung", "ZMV"),
    ("abrechnung", "ZMV"),
    ("admin", "ZMV"),
    ("zahnmedizinische verwaltungsassistentin", "ZMV"),
    ("steri", "STERI"),
    ("sterilisation", "STERI"),
    ("aufbereitung", "STERI"),
    ("empfang", "REZEPTION"),
    ("anmeldung", "REZEPTION"),
    ("frontdesk", "REZEPTION"),
    ("front desk", "REZEPTION"),
    ("pm", "PRAXISMANAGEMENT"),
    ("praxismanager", "PRAXISMANAGEMENT"),
    ("praxismanagerin", "PRAXISMANAGEMENT"),
    ("praxisleitung", "PRAXISMANAGEMENT"),
    ("azubi", "AZUBI"),
    ("auszubildende", "AZUBI"),
    ("auszubildender", "AZUBI"),
    ("trainee", "AZUBI"),
];

/// Lowercase, transliterate umlauts, collapse separators to single spaces.
fn normalize_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut pending_space = false;
    for ch in label.chars().flat_map(char::to_lowercase) {
        let piece: &str = match ch {
            'ä' => "ae",
            'ö' => "oe",
            'ü' => "ue",
            'ß' => "ss",
            c if c.is_ascii_alphanumeric() => {
                if pending_space && !out.is_empty() {
                    out.push(' ');
                }
                pending_space = false;
                out.push(c);
                continue;
            }
            _ => {
                pending_space = true;
                continue;
            }
        };
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push_str(piece);
    }
    out
}

/// Whether `key` is already a whitelisted key (after trim + uppercase).
pub fn is_whitelisted(key: &str) -> bool {
    let upper = key.trim().to_uppercase();
    ALLOWED_GROUP_KEYS.contains(&upper.as_str())
}

/// Map a free-text label to a whitelisted key.
pub fn sanitize_group_key(key: &str) -> &'static str {
    let upper = key.trim().to_uppercase();
    if let Some(k) = ALLOWED_GROUP_KEYS.iter().find(|k| **k == upper) {
        return k;
    }
    let normalized = normalize_label(key);
    GROUP_KEY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == normalized)
        .map(|(_, k)| *k)
        .unwrap_or(CATCH_ALL_GROUP_KEY)
}
