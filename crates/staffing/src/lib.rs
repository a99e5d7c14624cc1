//! Structural staffing demand for a dental practice.
//!
//! [`compute_staffing`] maps chairs, patient volume, prophylaxis capacity and
//! complexity onto full-time-equivalent demand per role:
//!
//! 1. derive chairs (C), patients/day (N) and the turnover/support factors
//! 2. base FTE per role
//! 3. clinical/admin buffers
//! 4. ceil-to-step rounding
//! 5. ratios and traffic-light flags
//! 6. headcount hint
//! 7. optional ist/soll coverage
//!
//! The calculator is total: malformed numbers are sanitized, never rejected.

pub mod coverage;
pub mod derived;
pub mod flags;
pub mod fte;
pub mod input;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use praxis_core::StaffingDefaults;

pub use coverage::{Coverage, CoverageEntry};
pub use derived::{ChairSource, DerivedValues};
pub use flags::{FlagReport, StaffingFlag, StaffingRatios, TrafficLight};
pub use fte::FteByRole;
pub use input::{CurrentStaffing, ResolvedInput, StaffingInput};

pub const ENGINE_VERSION: &str = concat!("praxis-staffing/", env!("CARGO_PKG_VERSION"));

/// Describes how the role fields relate, so a UI can render them without
/// re-deriving totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleComposition {
    pub atomic: Vec<String>,
    pub aggregated: BTreeMap<String, Vec<String>>,
    /// Field the UI should display as the grand total.
    pub preferred_total: String,
}

impl RoleComposition {
    fn current() -> Self {
        let names = |xs: &[&str]| xs.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let mut aggregated = BTreeMap::new();
        aggregated.insert("zfaTotal".to_string(), names(&["chairside", "steri"]));
        aggregated.insert(
            "totalFromRoundedParts".to_string(),
            names(&["zfaTotal", "prophy", "frontdesk", "pm"]),
        );
        Self {
            atomic: names(&["chairside", "steri", "prophy", "frontdesk", "pm"]),
            aggregated,
            preferred_total: "totalFromRoundedParts".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffingMeta {
    pub engine_version: String,
    pub role_composition: RoleComposition,
    /// `zfaTotal + prophy + frontdesk + pm` of the rounded values.
    pub total_from_rounded_parts: f64,
    pub is_practice_active: bool,
}

/// Estimated heads per role: `ceil(rounded FTE / average contract fraction)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadcountHint {
    pub chairside: u32,
    pub steri: u32,
    pub zfa_total: u32,
    pub prophy: u32,
    pub frontdesk: u32,
    pub pm: u32,
    pub total: u32,
}

impl HeadcountHint {
    fn from_rounded(rounded: &FteByRole, contract_fraction: f64) -> Self {
        let heads = |fte: f64| -> u32 {
            if fte <= 0.0 {
                0
            } else {
                (fte / contract_fraction - 1e-9).ceil() as u32
            }
        };
        Self {
            chairside: heads(rounded.chairside),
            steri: heads(rounded.steri),
            zfa_total: heads(rounded.zfa_total),
            prophy: heads(rounded.prophy),
            frontdesk: heads(rounded.frontdesk),
            pm: heads(rounded.pm),
            total: heads(rounded.total),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffingResult {
    /// The sanitized input actually used.
    pub input: ResolvedInput,
    pub derived: DerivedValues,
    pub base_fte: FteByRole,
    pub final_fte: FteByRole,
    pub rounded_fte: FteByRole,
    pub ratios: StaffingRatios,
    pub traffic_light: Option<TrafficLight>,
    pub flags: Vec<StaffingFlag>,
    pub headcount_hint: HeadcountHint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<Coverage>,
    pub meta: StaffingMeta,
}

/// Compute role-by-role FTE demand. Deterministic and total.
pub fn compute_staffing(
    input: &StaffingInput,
    current: Option<&CurrentStaffing>,
    defaults: &StaffingDefaults,
) -> StaffingResult {
    let resolved = input.resolve(defaults);
    let derived = derived::derive_values(&resolved);

    let base = fte::base_fte(&resolved, &derived);
    let final_fte = fte::buffered(&base, &resolved);
    let rounded_fte = fte::rounded(&final_fte, resolved.rounding_step_fte);

    let FlagReport {
        ratios,
        traffic_light,
        flags,
    } = flags::evaluate_flags(&rounded_fte, &derived);

    let headcount_hint = HeadcountHint::from_rounded(&rounded_fte, resolved.avg_contract_fraction);
    let coverage = current.map(|c| coverage::compute_coverage(c, &rounded_fte));

    let meta = StaffingMeta {
        engine_version: ENGINE_VERSION.to_string(),
        role_composition: RoleComposition::current(),
        total_from_rounded_parts: fte::sum_stepped(
            rounded_fte.zfa_total,
            rounded_fte.prophy,
            rounded_fte.frontdesk,
            rounded_fte.pm,
        ),
        is_practice_active: fte::is_practice_active(&resolved, &derived),
    };

    StaffingResult {
        input: resolved,
        derived,
        base_fte: base,
        final_fte,
        rounded_fte,
        ratios,
        traffic_light,
        flags,
        headcount_hint,
        coverage,
        meta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headcount_hint_rounds_up_heads() {
        let rounded = FteByRole::from_parts(2.9, 0.4, 0.0, 1.0, 0.0);
        let hint = HeadcountHint::from_rounded(&rounded, 0.8);
        assert_eq!(hint.chairside, 4); // 3.625
        assert_eq!(hint.steri, 1);
        assert_eq!(hint.zfa_total, 5); // 4.125
        assert_eq!(hint.prophy, 0);
        assert_eq!(hint.frontdesk, 2); // 1.25
        assert_eq!(hint.total, 6); // 4.3 / 0.8 = 5.375
    }

    #[test]
    fn exact_multiples_do_not_gain_a_head() {
        let rounded = FteByRole::from_parts(2.4, 0.0, 1.6, 0.0, 0.0);
        let hint = HeadcountHint::from_rounded(&rounded, 0.8);
        assert_eq!(hint.chairside, 3);
        assert_eq!(hint.prophy, 2);
    }

    #[test]
    fn composition_names_preferred_total() {
        let comp = RoleComposition::current();
        assert_eq!(comp.preferred_total, "totalFromRoundedParts");
        assert_eq!(comp.aggregated["zfaTotal"], vec!["chairside", "steri"]);
        assert_eq!(comp.atomic.len(), 5);
    }
}
