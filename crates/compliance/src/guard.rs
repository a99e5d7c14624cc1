//! Recursive structural scan for person-level data.
//!
//! The scan walks JSON objects and arrays and inspects keys only; primitive
//! leaves are never re-scanned. It stops at the first violation.

use serde::Serialize;
use serde_json::Value;

use praxis_core::HrPracticeInput;

use crate::error::{ComplianceError, Result};
use crate::fields::{classify_key, ForbiddenKind};

/// Which forbidden lists apply during a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanContext {
    /// Any structure: only per-person identifiers are rejected.
    General,
    /// HR analytics structures: identifiers and personal data are rejected.
    HrAnalytics,
}

/// Reject any per-person identifier or personal-data key in an HR analytics tree.
pub fn assert_no_person_level(value: &Value, path: &str) -> Result<()> {
    scan(value, path, ScanContext::HrAnalytics)
}

/// Reject per-person identifiers anywhere in an arbitrary tree.
pub fn assert_no_identifiers(value: &Value, path: &str) -> Result<()> {
    scan(value, path, ScanContext::General)
}

/// Serialize a typed value and scan it as an HR analytics tree.
///
/// Typed inputs keep unknown keys in flattened `extra` maps, so this still
/// catches identifiers that rode along on an otherwise valid record.
pub fn assert_serializable_no_person_level<T: Serialize>(value: &T, path: &str) -> Result<()> {
    let tree =
        serde_json::to_value(value).map_err(|e| ComplianceError::Serialization(e.to_string()))?;
    assert_no_person_level(&tree, path)
}

/// Scan raw JSON first, then decode into [`HrPracticeInput`].
///
/// Personal data is rejected before a typed value exists.
pub fn decode_practice_input(value: &Value) -> Result<HrPracticeInput> {
    assert_no_person_level(value, "root")?;
    serde_json::from_value(value.clone()).map_err(|e| ComplianceError::Malformed(e.to_string()))
}

pub fn scan(value: &Value, path: &str, context: ScanContext) -> Result<()> {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let child_path = format!("{path}.{key}");
                match (classify_key(key), context) {
                    (Some(ForbiddenKind::Identifier), _) => {
                        return Err(ComplianceError::ForbiddenIdentifier {
                            path: child_path,
                            field: key.clone(),
                        });
                    }
                    (Some(ForbiddenKind::PersonalData), ScanContext::HrAnalytics) => {
                        return Err(ComplianceError::PersonalDataField {
                            path: child_path,
                            field: key.clone(),
                        });
                    }
                    _ => {}
                }
                if is_container(child) {
                    scan(child, &child_path, context)?;
                }
            }
            Ok(())
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                if is_container(item) {
                    scan(item, &format!("{path}[{i}]"), context)?;
                }
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

fn is_container(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn finds_identifier_deep_in_arrays() {
        let v = json!({
            "groups": [
                { "groupKey": "ZFA", "headcount": 6 },
                { "groupKey": "ZMP", "details": [[{ "staffId": "A-1" }]] }
            ]
        });
        let err = assert_no_person_level(&v, "root").unwrap_err();
        assert_eq!(
            err,
            ComplianceError::ForbiddenIdentifier {
                path: "root.groups[1].details[0][0].staffId".into(),
                field: "staffId".into(),
            }
        );
    }

    #[test]
    fn identifiers_are_rejected_in_general_context() {
        let v = json!({ "meta": { "employee_id": 4 } });
        assert!(matches!(
            assert_no_identifiers(&v, "root"),
            Err(ComplianceError::ForbiddenIdentifier { .. })
        ));
    }

    #[test]
    fn personal_data_depends_on_context() {
        let v = json!({ "owner": { "email": "x@example.org" } });
        assert!(assert_no_identifiers(&v, "root").is_ok());
        assert!(matches!(
            assert_no_person_level(&v, "root"),
            Err(ComplianceError::PersonalDataField { .. })
        ));
    }

    #[test]
    fn primitive_leaves_are_not_inspected() {
        // Values that look like field names are just data.
        let v = json!({ "note": "staffId", "tags": ["email", "name"] });
        assert!(assert_no_person_level(&v, "root").is_ok());
    }

    #[test]
    fn decode_rejects_before_typing() {
        let v = json!({
            "periodStart": "2026-01-01",
            "periodEnd": "2026-01-31",
            "targetFte": 8.0,
            "workdaysPerWeek": 5,
            "groups": [{
                "groupKey": "ZFA",
                "headcount": 6,
                "totalFte": 5.0,
                "totalContractedHoursPerWeek": 200,
                "firstName": "Anna"
            }]
        });
        assert!(matches!(
            decode_practice_input(&v),
            Err(ComplianceError::PersonalDataField { .. })
        ));
    }

    #[test]
    fn decode_reports_malformed_input() {
        let v = json!({ "periodStart": "not a date" });
        assert!(matches!(decode_practice_input(&v), Err(ComplianceError::Malformed(_))));
    }

    #[test]
    fn typed_values_are_scanned_through_extra() {
        let mut group = praxis_core::HrAggregatedGroupInput::empty("ZFA");
        group.extra.insert("personId".into(), json!(12));
        assert!(matches!(
            assert_serializable_no_person_level(&group, "group"),
            Err(ComplianceError::ForbiddenIdentifier { .. })
        ));
    }
}
