//! Practice and role snapshots.
//!
//! Both entry points run the compliance gate before any number is computed.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use praxis_compliance::{
    assert_serializable_no_person_level, enforce_k_anonymity, filter_and_aggregate_by_k_anonymity,
    validate_aggregated_input, COMPLIANCE_VERSION, LEGAL_BASIS,
};
use praxis_core::numeric::safe_number;
use praxis_core::{
    AggregationLevel, HrAggregatedGroupInput, HrAudit, HrKpiSnapshot, HrPeriod, HrPracticeInput,
    HrThresholds, PRACTICE_GROUP_KEY,
};

use crate::error::{KpiError, Result};
use crate::metrics::compute_metrics;
use crate::period::PeriodFrame;

/// Namespace for deterministic snapshot ids.
const SNAPSHOT_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2a4e_8d3b_5c70_9e21_47ab_d0c3_19f5);

/// Role-level result. Carries the soft-degrade to practice level explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleSnapshots {
    pub snapshots: Vec<HrKpiSnapshot>,
    /// Validation and k-anonymity warnings for the caller to surface.
    pub warnings: Vec<String>,
    /// True when no role cleared k and a single practice snapshot was returned instead.
    pub fell_back_to_practice: bool,
}

/// Practice-wide snapshot stamped with the current time.
pub fn compute_practice_snapshot(
    input: &HrPracticeInput,
    thresholds: &HrThresholds,
) -> Result<HrKpiSnapshot> {
    compute_practice_snapshot_at(input, thresholds, Utc::now())
}

/// Practice-wide snapshot with an explicit creation time.
pub fn compute_practice_snapshot_at(
    input: &HrPracticeInput,
    thresholds: &HrThresholds,
    created_at: DateTime<Utc>,
) -> Result<HrKpiSnapshot> {
    let (period, _) = preflight(input, thresholds)?;
    Ok(practice_snapshot(input, thresholds, &period, created_at))
}

/// One snapshot per k-anonymous role, stamped with the current time.
pub fn compute_role_snapshots(
    input: &HrPracticeInput,
    thresholds: &HrThresholds,
) -> Result<RoleSnapshots> {
    compute_role_snapshots_at(input, thresholds, Utc::now())
}

/// One snapshot per k-anonymous role.
///
/// Groups below `kMin` are merged or dropped first. If no group remains,
/// a single practice snapshot is returned and the fallback is reported.
/// Each role's target FTE is the practice target apportioned by the role's
/// share of total headcount.
pub fn compute_role_snapshots_at(
    input: &HrPracticeInput,
    thresholds: &HrThresholds,
    created_at: DateTime<Utc>,
) -> Result<RoleSnapshots> {
    let (period, mut warnings) = preflight(input, thresholds)?;
    let filtered = filter_and_aggregate_by_k_anonymity(&input.groups, thresholds.k_min)?;
    warnings.extend(filtered.warnings);

    if filtered.groups.is_empty() {
        warnings.push(format!(
            "Keine Rolle erreicht k={}; Auswertung nur auf Praxisebene.",
            thresholds.k_min
        ));
        let practice = practice_snapshot(input, thresholds, &period, created_at);
        if !enforce_k_anonymity(practice.group_size, thresholds.k_min).allowed {
            warnings.push(format!(
                "Auch die Praxis insgesamt liegt unter k={}; Kennzahlen nur intern verwenden.",
                thresholds.k_min
            ));
        }
        return Ok(RoleSnapshots {
            snapshots: vec![practice],
            warnings,
            fell_back_to_practice: true,
        });
    }

    let total_headcount: u64 = input.groups.iter().map(|g| u64::from(g.headcount)).sum();
    let practice_target = safe_number(input.target_fte);
    let snapshots = filtered
        .groups
        .iter()
        .map(|group| {
            let share = if total_headcount > 0 {
                f64::from(group.headcount) / total_headcount as f64
            } else {
                0.0
            };
            build_snapshot(
                AggregationLevel::Role,
                group,
                practice_target * share,
                input,
                thresholds,
                &period,
                created_at,
            )
        })
        .collect();

    Ok(RoleSnapshots {
        snapshots,
        warnings,
        fell_back_to_practice: false,
    })
}

/// Guard scan, pre-flight validation and period checks. Fails closed.
fn preflight(input: &HrPracticeInput, thresholds: &HrThresholds) -> Result<(PeriodFrame, Vec<String>)> {
    assert_serializable_no_person_level(input, "root")?;
    let warnings = validate_aggregated_input(&input.groups, thresholds.k_min).into_result()?;

    if !input.target_fte.is_finite() || input.target_fte < 0.0 {
        return Err(KpiError::InvalidInput(format!(
            "targetFte must be a non-negative number, got {}",
            input.target_fte
        )));
    }
    if let Some(rev) = input.monthly_revenue {
        if !rev.is_finite() || rev < 0.0 {
            return Err(KpiError::InvalidInput(format!(
                "monthlyRevenue must be a non-negative number, got {rev}"
            )));
        }
    }

    let period = PeriodFrame::new(input.period_start, input.period_end, input.workdays_per_week)?;
    Ok((period, warnings))
}

fn practice_snapshot(
    input: &HrPracticeInput,
    thresholds: &HrThresholds,
    period: &PeriodFrame,
    created_at: DateTime<Utc>,
) -> HrKpiSnapshot {
    let total = HrAggregatedGroupInput::sum(PRACTICE_GROUP_KEY, input.groups.iter());
    build_snapshot(
        AggregationLevel::Practice,
        &total,
        input.target_fte,
        input,
        thresholds,
        period,
        created_at,
    )
}

fn build_snapshot(
    level: AggregationLevel,
    group: &HrAggregatedGroupInput,
    target_fte: f64,
    input: &HrPracticeInput,
    thresholds: &HrThresholds,
    period: &PeriodFrame,
    created_at: DateTime<Utc>,
) -> HrKpiSnapshot {
    let metrics = compute_metrics(group, target_fte, period, input.monthly_revenue, thresholds);
    HrKpiSnapshot {
        id: snapshot_id(level, &group.group_key, period, created_at),
        period: HrPeriod {
            start: period.start,
            end: period.end,
        },
        aggregation_level: level,
        group_key: group.group_key.clone(),
        group_size: group.headcount,
        metrics,
        audit: HrAudit {
            aggregation_level: level,
            k_used: thresholds.k_min,
            legal_basis: LEGAL_BASIS.to_string(),
            created_at,
            compliance_version: COMPLIANCE_VERSION.to_string(),
        },
    }
}

fn snapshot_id(
    level: AggregationLevel,
    group_key: &str,
    period: &PeriodFrame,
    created_at: DateTime<Utc>,
) -> Uuid {
    let name = format!(
        "{level}|{group_key}|{}|{}|{}",
        period.start,
        period.end,
        created_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    );
    Uuid::new_v5(&SNAPSHOT_NAMESPACE, name.as_bytes())
}
