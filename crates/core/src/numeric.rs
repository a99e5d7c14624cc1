//! Numeric primitives shared by the staffing and KPI engines.
//!
//! Every helper here is total: non-finite input never propagates into a
//! result. Callers rely on this to keep the staffing calculator free of
//! error paths.

use serde::{Deserialize, Deserializer};

/// Decimal places kept after ceil-to-step rounding. Removes the float noise
/// left by `steps * step` (e.g. `33.0 * 0.1 == 3.3000000000000003`).
pub const STEP_PRECISION: i32 = 6;

/// Tolerance subtracted before taking the ceiling so that values which are
/// already a multiple of the step (up to float error) are not bumped.
const STEP_EPSILON: f64 = 1e-9;

/// Coerce to a finite, non-negative number. NaN, infinities and negatives become 0.
pub fn safe_number(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Like [`safe_number`], but a missing value takes `default` instead of 0.
pub fn safe_number_or(value: Option<f64>, default: f64) -> f64 {
    match value {
        Some(v) => safe_number(v),
        None => safe_number(default),
    }
}

/// Clamp into `[lo, hi]`. NaN maps to `lo`.
pub fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_nan() {
        return lo;
    }
    value.max(lo).min(hi)
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Round `value` up to the next multiple of `step`.
///
/// Never rounds down: a demand estimate must not under-provision. A
/// non-positive or non-finite `step` disables stepping and only trims float
/// noise. Non-positive values yield 0.
pub fn ceil_to_step(value: f64, step: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return 0.0;
    }
    if !step.is_finite() || step <= 0.0 {
        return round_to(value, STEP_PRECISION);
    }
    let steps = (value / step - STEP_EPSILON).ceil();
    round_to(steps * step, STEP_PRECISION)
}

/// `numerator / denominator`, or 0 when the denominator is not positive.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 && denominator.is_finite() && numerator.is_finite() {
        numerator / denominator
    } else {
        0.0
    }
}

/// Serde helper for optional numeric fields arriving from loosely typed JSON.
///
/// Accepts numbers, numeric strings and `null`. Anything else (objects,
/// booleans, garbage strings) decodes to `None` rather than failing the whole
/// document.
///
/// ```ignore
/// #[serde(default, deserialize_with = "praxis_core::numeric::lenient_f64")]
/// pub patients_per_day: Option<f64>,
/// ```
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(match raw {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_number_rejects_non_finite_and_negative() {
        assert_eq!(safe_number(f64::NAN), 0.0);
        assert_eq!(safe_number(f64::INFINITY), 0.0);
        assert_eq!(safe_number(-3.0), 0.0);
        assert_eq!(safe_number(2.5), 2.5);
    }

    #[test]
    fn safe_number_or_uses_default_only_when_missing() {
        assert_eq!(safe_number_or(None, 0.12), 0.12);
        assert_eq!(safe_number_or(Some(-1.0), 0.12), 0.0);
        assert_eq!(safe_number_or(Some(0.2), 0.12), 0.2);
    }

    #[test]
    fn clamp_handles_nan() {
        assert_eq!(clamp(f64::NAN, 0.0, 1.0), 0.0);
        assert_eq!(clamp(1.7, 0.0, 1.0), 1.0);
        assert_eq!(clamp(-0.2, 0.0, 1.0), 0.0);
        assert_eq!(clamp(0.5, 0.0, 1.0), 0.5);
    }

    #[test]
    fn ceil_to_step_never_rounds_down() {
        assert_eq!(ceil_to_step(3.24576, 0.1), 3.3);
        assert_eq!(ceil_to_step(0.9555, 0.1), 1.0);
        assert_eq!(ceil_to_step(2.01, 0.5), 2.5);
        assert_eq!(ceil_to_step(0.0001, 0.25), 0.25);
    }

    #[test]
    fn ceil_to_step_keeps_exact_multiples() {
        // 1.1 / 0.1 == 11.000000000000002 in binary floating point
        assert_eq!(ceil_to_step(1.1, 0.1), 1.1);
        assert_eq!(ceil_to_step(3.0, 0.5), 3.0);
        assert_eq!(ceil_to_step(0.7, 0.1), 0.7);
    }

    #[test]
    fn ceil_to_step_degenerate_inputs() {
        assert_eq!(ceil_to_step(-1.0, 0.1), 0.0);
        assert_eq!(ceil_to_step(f64::NAN, 0.1), 0.0);
        assert_eq!(ceil_to_step(1.23456789, 0.0), 1.234568);
    }

    #[test]
    fn ratio_guards_zero_denominator() {
        assert_eq!(ratio(5.0, 0.0), 0.0);
        assert_eq!(ratio(5.0, -1.0), 0.0);
        assert_eq!(ratio(1.0, 4.0), 0.25);
    }

    #[test]
    fn lenient_f64_accepts_loose_json() {
        #[derive(serde::Deserialize)]
        struct Loose {
            #[serde(default, deserialize_with = "lenient_f64")]
            v: Option<f64>,
        }

        let parse = |json: &str| serde_json::from_str::<Loose>(json).unwrap().v;
        assert_eq!(parse(r#"{"v": 2.5}"#), Some(2.5));
        assert_eq!(parse(r#"{"v": "3,5"}"#), Some(3.5));
        assert_eq!(parse(r#"{"v": null}"#), None);
        assert_eq!(parse(r#"{"v": "abc"}"#), None);
        assert_eq!(parse(r#"{"v": {"x": 1}}"#), None);
        assert_eq!(parse(r#"{}"#), None);
    }
}
