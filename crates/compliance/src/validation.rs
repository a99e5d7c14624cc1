//! Pre-flight validation reports for aggregated HR input and thresholds.
//!
//! Validators never mutate their input. They return a [`ValidationResult`]
//! with errors (block computation) and warnings (advisory).

use serde::{Deserialize, Serialize};

use praxis_core::{HrAggregatedGroupInput, HrThresholds, ThresholdBand};

use crate::error::{ComplianceError, Result};
use crate::fuzzy::fuzzy_match;
use crate::group_key::{is_whitelisted, sanitize_group_key, ALLOWED_GROUP_KEYS, CATCH_ALL_GROUP_KEY};
use crate::guard::assert_serializable_no_person_level;
use crate::kanon::validate_k_min;

/// Tolerance between `totalAbsenceDays` and the sum of `absenceByType`.
const ABSENCE_SPLIT_TOLERANCE_DAYS: f64 = 0.5;

// ── Result types ────────────────────────────────────────────────────

/// Overall validation outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

/// A blocking validation error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Path-like location, e.g. `"groups[2].totalFte"`.
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// A non-blocking advisory warning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationResult {
    pub(crate) fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub(crate) fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(ValidationError {
            path: path.into(),
            message: message.into(),
            suggestion: None,
        });
    }

    pub(crate) fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ValidationWarning {
            path: path.into(),
            message: message.into(),
        });
    }

    /// Warning texts as `path: message`.
    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(|w| format!("{}: {}", w.path, w.message)).collect()
    }

    /// Fail closed: any error becomes [`ComplianceError::InvalidAggregate`].
    /// On success, the warning texts are returned.
    pub fn into_result(self) -> Result<Vec<String>> {
        if self.valid {
            Ok(self.warning_messages())
        } else {
            Err(ComplianceError::InvalidAggregate {
                errors: self
                    .errors
                    .iter()
                    .map(|e| format!("{}: {}", e.path, e.message))
                    .collect(),
            })
        }
    }
}

// ── Public API ──────────────────────────────────────────────────────

/// Compose the guard, k-anonymity and sanity checks into one report.
pub fn validate_aggregated_input(groups: &[HrAggregatedGroupInput], k_min: u32) -> ValidationResult {
    let mut result = ValidationResult::new();

    match validate_k_min(k_min) {
        Ok(Some(w)) => result.warn("kMin", w),
        Ok(None) => {}
        Err(e) => result.error("kMin", e.to_string()),
    }

    if groups.is_empty() {
        result.error("groups", "Keine aggregierten Gruppen uebergeben.");
        return result;
    }

    let mut seen: Vec<&'static str> = Vec::new();
    for (i, group) in groups.iter().enumerate() {
        let path = format!("groups[{i}]");

        if let Err(e) = assert_serializable_no_person_level(group, &path) {
            result.error(&path, e.to_string());
        }

        check_group_key(group, &path, &mut result);
        check_group_numbers(group, &path, &mut result);

        if group.headcount > 0 && group.headcount < k_min {
            result.warn(
                &path,
                format!("Gruppe unterschreitet k={k_min} und wird zusammengefasst oder ausgeblendet."),
            );
        }

        let key = sanitize_group_key(&group.group_key);
        if seen.contains(&key) {
            result.warn(
                format!("{path}.groupKey"),
                format!("Mehrere Gruppen ergeben den Schluessel {key}; sie werden summiert."),
            );
        } else {
            seen.push(key);
        }
    }

    result
}

/// Check that bands are ordered, finite and that `kMin` clears the floor.
pub fn validate_thresholds(thresholds: &HrThresholds) -> ValidationResult {
    let mut result = ValidationResult::new();

    match validate_k_min(thresholds.k_min) {
        Ok(Some(w)) => result.warn("kMin", w),
        Ok(None) => {}
        Err(e) => result.error("kMin", e.to_string()),
    }

    check_band(&mut result, "fteQuote", &thresholds.fte_quote, false);
    check_band(&mut result, "absenceRatePercent", &thresholds.absence_rate_percent, true);
    check_band(&mut result, "overtimeRatePercent", &thresholds.overtime_rate_percent, true);
    check_band(
        &mut result,
        "laborCostRatioPercent",
        &thresholds.labor_cost_ratio_percent,
        true,
    );

    let over = thresholds.fte_quote_overcapacity;
    if !over.is_finite() || over < 0.0 {
        result.error("fteQuoteOvercapacity", "Wert muss endlich und nicht negativ sein.");
    } else if over <= thresholds.fte_quote.warn {
        result.error(
            "fteQuoteOvercapacity",
            format!(
                "Ueberkapazitaet ({over}) muss ueber der Warnschwelle ({}) liegen.",
                thresholds.fte_quote.warn
            ),
        );
    }

    result
}

// ── Checks ──────────────────────────────────────────────────────────

fn check_group_key(group: &HrAggregatedGroupInput, path: &str, result: &mut ValidationResult) {
    let key_path = format!("{path}.groupKey");
    let raw = group.group_key.trim();
    if raw.is_empty() {
        result.error(key_path, "groupKey darf nicht leer sein.");
        return;
    }
    if is_whitelisted(raw) {
        return;
    }

    let mapped = sanitize_group_key(raw);
    if mapped != CATCH_ALL_GROUP_KEY {
        result.warn(key_path, format!("'{raw}' wird als {mapped} gefuehrt."));
        return;
    }

    let message = match fuzzy_match(raw, ALLOWED_GROUP_KEYS) {
        Some(s) => format!("Unbekannte Rolle wird unter {CATCH_ALL_GROUP_KEY} gefuehrt. Meinten Sie {s}?"),
        None => format!("Unbekannte Rolle wird unter {CATCH_ALL_GROUP_KEY} gefuehrt."),
    };
    result.warn(key_path, message);
}

fn check_group_numbers(group: &HrAggregatedGroupInput, path: &str, result: &mut ValidationResult) {
    let fields = [
        ("totalFte", group.total_fte),
        ("totalContractedHoursPerWeek", group.total_contracted_hours_per_week),
        ("totalOvertimeMinutes", group.total_overtime_minutes),
        ("totalAbsenceDays", group.total_absence_days),
        ("absenceByType.sick", group.absence_by_type.sick),
        ("absenceByType.vacation", group.absence_by_type.vacation),
        ("absenceByType.training", group.absence_by_type.training),
        ("absenceByType.other", group.absence_by_type.other),
    ];
    for (name, value) in fields {
        if !value.is_finite() || value < 0.0 {
            result.error(format!("{path}.{name}"), "Wert muss endlich und nicht negativ sein.");
        }
    }

    if group.headcount == 0 && (group.total_fte > 0.0 || group.total_contracted_hours_per_week > 0.0) {
        result.error(
            format!("{path}.headcount"),
            "VZAE oder Vertragsstunden ohne Kopfzahl.",
        );
    }

    if group.headcount > 0 && group.total_fte > f64::from(group.headcount) {
        result.warn(
            format!("{path}.totalFte"),
            "Mehr VZAE als Koepfe in der Gruppe.",
        );
    }

    let split = group.absence_by_type.total();
    if split > 0.0 && (split - group.total_absence_days).abs() > ABSENCE_SPLIT_TOLERANCE_DAYS {
        result.warn(
            format!("{path}.absenceByType"),
            format!(
                "Summe der Abwesenheitsarten ({split}) weicht von totalAbsenceDays ({}) ab.",
                group.total_absence_days
            ),
        );
    }
}

fn check_band(result: &mut ValidationResult, name: &str, band: &ThresholdBand, high_is_bad: bool) {
    if !band.warn.is_finite() || !band.critical.is_finite() || band.warn < 0.0 || band.critical < 0.0 {
        result.error(name, "Schwellen muessen endlich und nicht negativ sein.");
        return;
    }
    let ordered = if high_is_bad {
        band.critical > band.warn
    } else {
        band.critical < band.warn
    };
    if !ordered {
        let direction = if high_is_bad { "ueber" } else { "unter" };
        result.error(
            name,
            format!(
                "Kritische Schwelle ({}) muss {direction} der Warnschwelle ({}) liegen.",
                band.critical, band.warn
            ),
        );
    }
}
