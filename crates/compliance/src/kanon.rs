//! k-anonymity: verdicts, floor validation and small-group merging.

use serde::{Deserialize, Serialize};

use praxis_core::{AggregationLevel, HrAggregatedGroupInput, K_MIN_ABSOLUTE_FLOOR, K_MIN_DEFAULT};

use crate::error::{ComplianceError, Result};
use crate::group_key::{sanitize_group_key, CATCH_ALL_GROUP_KEY};

/// Outcome of a single k-anonymity check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KAnonymityVerdict {
    pub allowed: bool,
    pub group_count: u32,
    pub k_min: u32,
    /// Level to collapse to when denied.
    pub fallback: Option<AggregationLevel>,
    pub reason: Option<String>,
}

/// Allow a release of `group_count` individuals only if it reaches `k_min`.
pub fn enforce_k_anonymity(group_count: u32, k_min: u32) -> KAnonymityVerdict {
    if group_count >= k_min {
        KAnonymityVerdict {
            allowed: true,
            group_count,
            k_min,
            fallback: None,
            reason: None,
        }
    } else {
        KAnonymityVerdict {
            allowed: false,
            group_count,
            k_min,
            fallback: Some(AggregationLevel::Practice),
            reason: Some(format!(
                "Gruppengroesse unterschreitet k={k_min}; Auswertung nur auf Praxisebene moeglich."
            )),
        }
    }
}

/// Reject `k_min` below the absolute floor; warn below the recommended floor.
pub fn validate_k_min(k_min: u32) -> Result<Option<String>> {
    if k_min < K_MIN_ABSOLUTE_FLOOR {
        return Err(ComplianceError::KMinBelowFloor {
            k_min,
            floor: K_MIN_ABSOLUTE_FLOOR,
        });
    }
    if k_min < K_MIN_DEFAULT {
        return Ok(Some(format!(
            "kMin={k_min} liegt unter dem empfohlenen Wert {K_MIN_DEFAULT}; Re-Identifikation kleiner Gruppen wird leichter."
        )));
    }
    Ok(None)
}

/// Result of [`filter_and_aggregate_by_k_anonymity`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KFilterOutcome {
    /// Releasable groups, sanitized keys, `extra` stripped.
    pub groups: Vec<HrAggregatedGroupInput>,
    /// Number of below-k groups that went into the catch-all bucket.
    pub merged_group_count: usize,
    pub merged_headcount: u32,
    /// Headcount withheld because even the merged bucket stayed below k.
    pub dropped_headcount: u32,
    pub warnings: Vec<String>,
}

/// Sanitize keys, fold duplicates, and merge every group below `k_min`.
///
/// Groups that reach `k_min` pass through. The rest are summed into one
/// [`CATCH_ALL_GROUP_KEY`] bucket. That bucket joins an existing releasable
/// catch-all group, is released on its own if it reaches `k_min`, or is
/// dropped entirely.
pub fn filter_and_aggregate_by_k_anonymity(
    groups: &[HrAggregatedGroupInput],
    k_min: u32,
) -> Result<KFilterOutcome> {
    let mut warnings = Vec::new();
    if let Some(w) = validate_k_min(k_min)? {
        warnings.push(w);
    }

    let folded = fold_by_sanitized_key(groups);
    let (mut passing, small): (Vec<_>, Vec<_>) =
        folded.into_iter().partition(|g| g.headcount >= k_min);

    let mut outcome = KFilterOutcome {
        groups: Vec::new(),
        merged_group_count: small.len(),
        merged_headcount: 0,
        dropped_headcount: 0,
        warnings,
    };

    if !small.is_empty() {
        let bucket = HrAggregatedGroupInput::sum(CATCH_ALL_GROUP_KEY, small.iter());
        let names: Vec<&str> = small.iter().map(|g| g.group_key.as_str()).collect();

        if let Some(existing) = passing.iter_mut().find(|g| g.group_key == CATCH_ALL_GROUP_KEY) {
            existing.absorb(&bucket);
            outcome.merged_headcount = bucket.headcount;
            outcome.warnings.push(format!(
                "Gruppen unter k={k_min} ({}) wurden in {CATCH_ALL_GROUP_KEY} zusammengefasst.",
                names.join(", ")
            ));
        } else if bucket.headcount >= k_min {
            outcome.merged_headcount = bucket.headcount;
            outcome.warnings.push(format!(
                "Gruppen unter k={k_min} ({}) wurden in {CATCH_ALL_GROUP_KEY} zusammengefasst.",
                names.join(", ")
            ));
            passing.push(bucket);
        } else {
            outcome.dropped_headcount = bucket.headcount;
            outcome.warnings.push(format!(
                "Gruppen unter k={k_min} ({}) erreichen auch zusammen k nicht und werden nicht ausgewiesen.",
                names.join(", ")
            ));
        }
    }

    outcome.groups = passing;
    Ok(outcome)
}

/// Sum groups whose keys sanitize to the same whitelist entry, keeping first-seen order.
pub fn fold_by_sanitized_key(groups: &[HrAggregatedGroupInput]) -> Vec<HrAggregatedGroupInput> {
    let mut folded: Vec<HrAggregatedGroupInput> = Vec::with_capacity(groups.len());
    for g in groups {
        let key = sanitize_group_key(&g.group_key);
        match folded.iter_mut().find(|f| f.group_key == key) {
            Some(existing) => existing.absorb(g),
            None => {
                let mut fresh = HrAggregatedGroupInput::empty(key);
                fresh.absorb(g);
                folded.push(fresh);
            }
        }
    }
    folded
}
