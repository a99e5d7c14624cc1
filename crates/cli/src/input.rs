use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use praxis_staffing::{CurrentStaffing, StaffingInput};

/// Read a JSON or YAML document (by extension) into an untyped tree.
///
/// HR input stays untyped until the compliance scan has run on it.
pub fn read_document(path: &Path) -> Result<Value> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    if is_yaml {
        serde_yaml::from_str(&raw).with_context(|| format!("failed to parse YAML: {}", path.display()))
    } else {
        serde_json::from_str(&raw).with_context(|| format!("failed to parse JSON: {}", path.display()))
    }
}

/// Split a staffing document into input and optional current staffing.
///
/// Accepts `{ "input": {...}, "current": {...} }` or a bare input object.
pub fn staffing_request(doc: &Value) -> Result<(StaffingInput, Option<CurrentStaffing>)> {
    let Some(input) = doc.get("input") else {
        let input = serde_json::from_value(doc.clone()).context("invalid staffing input")?;
        return Ok((input, None));
    };
    let input = serde_json::from_value(input.clone()).context("invalid staffing input")?;
    let current = match doc.get("current") {
        Some(Value::Null) | None => None,
        Some(c) => Some(serde_json::from_value(c.clone()).context("invalid current staffing")?),
    };
    Ok((input, current))
}
