//! Calculator inputs and the safe-number resolution step.

use serde::{Deserialize, Serialize};

use praxis_core::numeric::{lenient_f64, safe_number, safe_number_or};
use praxis_core::StaffingDefaults;

/// Structural practice description as supplied by the caller.
///
/// Every field is optional and decoded leniently; [`StaffingInput::resolve`]
/// turns it into a fully sanitized [`ResolvedInput`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffingInput {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub dentists_fte: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub chairs_simultaneous: Option<f64>,
    /// Fallback for `chairs_simultaneous`, only used when dentists are present.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub treatment_rooms: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub prophylaxis_chairs: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub patients_per_day: Option<f64>,
    /// -1 (simple) .. 2 (highly specialised).
    #[serde(default, deserialize_with = "lenient_f64")]
    pub complexity_level: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub clinical_buffer: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub admin_buffer: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub rounding_step_fte: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub default_patients_per_chair: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub avg_contract_fraction: Option<f64>,
}

/// Sanitized input. All values are finite; all but `complexity_level` are >= 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedInput {
    pub dentists_fte: f64,
    /// `None` when not supplied or not positive.
    pub chairs_simultaneous: Option<f64>,
    pub treatment_rooms: f64,
    pub prophylaxis_chairs: f64,
    pub patients_per_day: Option<f64>,
    pub complexity_level: i8,
    pub clinical_buffer: f64,
    pub admin_buffer: f64,
    pub rounding_step_fte: f64,
    pub default_patients_per_chair: f64,
    /// In (0, 1]. Non-positive input means full-time contracts.
    pub avg_contract_fraction: f64,
}

impl StaffingInput {
    pub fn resolve(&self, defaults: &StaffingDefaults) -> ResolvedInput {
        ResolvedInput {
            dentists_fte: safe_number_or(self.dentists_fte, 0.0),
            chairs_simultaneous: self.chairs_simultaneous.map(safe_number).filter(|c| *c > 0.0),
            treatment_rooms: safe_number_or(self.treatment_rooms, 0.0),
            prophylaxis_chairs: safe_number_or(self.prophylaxis_chairs, 0.0),
            patients_per_day: self.patients_per_day.map(safe_number),
            complexity_level: clamp_complexity(self.complexity_level),
            clinical_buffer: safe_number_or(self.clinical_buffer, defaults.clinical_buffer),
            admin_buffer: safe_number_or(self.admin_buffer, defaults.admin_buffer),
            rounding_step_fte: safe_number_or(self.rounding_step_fte, defaults.rounding_step_fte),
            default_patients_per_chair: safe_number_or(
                self.default_patients_per_chair,
                defaults.patients_per_chair,
            ),
            avg_contract_fraction: contract_fraction(
                safe_number_or(self.avg_contract_fraction, defaults.avg_contract_fraction),
            ),
        }
    }
}

/// Round to the nearest level and clamp into {-1, 0, 1, 2}.
fn clamp_complexity(level: Option<f64>) -> i8 {
    match level {
        Some(v) if v.is_finite() => v.round().clamp(-1.0, 2.0) as i8,
        _ => 0,
    }
}

fn contract_fraction(f: f64) -> f64 {
    if f > 0.0 {
        f.min(1.0)
    } else {
        1.0
    }
}

/// Currently employed (ist) FTE per role, for coverage figures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentStaffing {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub chairside_fte: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub steri_fte: Option<f64>,
    /// When absent, derived from chairside + steri if both are given.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub zfa_total_fte: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub prophy_fte: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub frontdesk_fte: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub pm_fte: Option<f64>,
}
