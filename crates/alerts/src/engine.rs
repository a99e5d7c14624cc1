use praxis_compliance::validate_thresholds;
use praxis_core::{HrAlert, HrKpiSnapshot, HrThresholds};

use crate::error::{AlertError, Result};
use crate::rules::{HR_ALL_HEALTHY, RULE_REGISTRY};

/// Reject unordered or overlapping bands. Returns the validation warnings.
///
/// Overlapping bands would let two severities fire for one metric.
pub fn check_thresholds(thresholds: &HrThresholds) -> Result<Vec<String>> {
    let checked = validate_thresholds(thresholds);
    if !checked.valid {
        return Err(AlertError::InvalidThresholds(
            checked
                .errors
                .iter()
                .map(|e| format!("{}: {}", e.path, e.message))
                .collect(),
        ));
    }
    Ok(checked.warning_messages())
}

/// Evaluate every registered rule against one snapshot.
///
/// Thresholds are checked first. The result is sorted critical, warn, info
/// with registry order kept inside a severity. The all-healthy notice is
/// removed whenever anything else fired.
pub fn generate_hr_alerts(snapshot: &HrKpiSnapshot, thresholds: &HrThresholds) -> Result<Vec<HrAlert>> {
    check_thresholds(thresholds)?;

    let mut alerts = Vec::new();
    for rule in RULE_REGISTRY {
        if let Some(alert) = rule.evaluate(snapshot, thresholds)? {
            alerts.push(alert);
        }
    }

    alerts.sort_by_key(|a| a.severity.rank());
    if alerts.len() > 1 {
        alerts.retain(|a| a.code != HR_ALL_HEALTHY);
    }
    Ok(alerts)
}
