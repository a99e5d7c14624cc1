//! End-to-end HR report: validation, snapshots and alerts in one call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use praxis_core::{HrAlert, HrKpiSnapshot, HrPracticeInput, HrThresholds};
use praxis_kpi::{compute_practice_snapshot_at, compute_role_snapshots_at};

use crate::engine::{check_thresholds, generate_hr_alerts};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HrReport {
    pub practice: HrKpiSnapshot,
    /// Empty when no role cleared k-anonymity.
    pub roles: Vec<HrKpiSnapshot>,
    /// Practice alerts first, then each role's alerts in role order.
    pub alerts: Vec<HrAlert>,
    pub warnings: Vec<String>,
}

pub fn build_hr_report(input: &HrPracticeInput, thresholds: &HrThresholds) -> Result<HrReport> {
    build_hr_report_at(input, thresholds, Utc::now())
}

pub fn build_hr_report_at(
    input: &HrPracticeInput,
    thresholds: &HrThresholds,
    created_at: DateTime<Utc>,
) -> Result<HrReport> {
    let mut warnings = check_thresholds(thresholds)?;

    let practice = compute_practice_snapshot_at(input, thresholds, created_at)?;
    let role_result = compute_role_snapshots_at(input, thresholds, created_at)?;
    for w in role_result.warnings {
        if !warnings.contains(&w) {
            warnings.push(w);
        }
    }
    let roles = if role_result.fell_back_to_practice {
        Vec::new()
    } else {
        role_result.snapshots
    };

    let mut alerts = generate_hr_alerts(&practice, thresholds)?;
    for role in &roles {
        alerts.extend(generate_hr_alerts(role, thresholds)?);
    }

    Ok(HrReport {
        practice,
        roles,
        alerts,
        warnings,
    })
}
