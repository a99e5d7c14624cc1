//! Stages 2-4: base FTE per role, buffering, ceil-to-step rounding.
//!
//! `zfa_total` and `total` are never computed independently. At every
//! fidelity they are summed from the atomic roles of that same fidelity, so
//! `zfa_total == chairside + steri` holds exactly. At rounded fidelity the
//! sums get the same [`STEP_PRECISION`] trim as the stepped parts.
//!
//! Because of that, rounded `zfa_total` can sit one step above
//! `ceil_to_step(final.zfa_total)`: two ceilings add up to at most one step
//! more than the ceiling of their sum.

use serde::{Deserialize, Serialize};

use praxis_core::numeric::{ceil_to_step, round_to, STEP_PRECISION};

use crate::derived::DerivedValues;
use crate::input::ResolvedInput;

/// Practice-management steps on the clinical+frontdesk FTE sum.
const PM_HALF_AT: f64 = 10.0;
const PM_FULL_AT: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FteByRole {
    pub chairside: f64,
    pub steri: f64,
    pub zfa_total: f64,
    pub prophy: f64,
    pub frontdesk: f64,
    pub pm: f64,
    pub total: f64,
}

impl FteByRole {
    /// Assemble from atomic roles; aggregates are summed here and nowhere else.
    pub fn from_parts(chairside: f64, steri: f64, prophy: f64, frontdesk: f64, pm: f64) -> Self {
        let zfa_total = chairside + steri;
        Self {
            chairside,
            steri,
            zfa_total,
            prophy,
            frontdesk,
            pm,
            total: zfa_total + prophy + frontdesk + pm,
        }
    }

    /// Assemble from step multiples. The sums are trimmed like the parts.
    fn from_stepped_parts(chairside: f64, steri: f64, prophy: f64, frontdesk: f64, pm: f64) -> Self {
        let zfa_total = round_to(chairside + steri, STEP_PRECISION);
        Self {
            chairside,
            steri,
            zfa_total,
            prophy,
            frontdesk,
            pm,
            total: sum_stepped(zfa_total, prophy, frontdesk, pm),
        }
    }

    pub fn zero() -> Self {
        Self::from_parts(0.0, 0.0, 0.0, 0.0, 0.0)
    }

    /// Apply `f` to every atomic role and re-derive the aggregates.
    fn map_atomic(&self, clinical: impl Fn(f64) -> f64, admin: impl Fn(f64) -> f64) -> Self {
        Self::from_parts(
            clinical(self.chairside),
            clinical(self.steri),
            clinical(self.prophy),
            admin(self.frontdesk),
            admin(self.pm),
        )
    }
}

/// Sum of stepped values, trimmed to [`STEP_PRECISION`].
pub fn sum_stepped(zfa_total: f64, prophy: f64, frontdesk: f64, pm: f64) -> f64 {
    round_to(zfa_total + prophy + frontdesk + pm, STEP_PRECISION)
}

/// Whether anything at all is configured: dentists, chairs, patients or prophylaxis.
pub fn is_practice_active(input: &ResolvedInput, derived: &DerivedValues) -> bool {
    input.dentists_fte > 0.0 || derived.c > 0 || derived.n > 0.0 || input.prophylaxis_chairs > 0.0
}

/// Stage 2: structural demand before any buffer.
pub fn base_fte(input: &ResolvedInput, derived: &DerivedValues) -> FteByRole {
    let c = f64::from(derived.c);
    let n = derived.n;
    let complexity = f64::from(input.complexity_level);

    let chairside = c * (1.0 + derived.sf + derived.cb);
    let steri = 0.12 * c + 0.003 * n + 0.05 * input.prophylaxis_chairs;
    let prophy = input.prophylaxis_chairs * (0.90 + 0.05 * complexity);

    let frontdesk = if is_practice_active(input, derived) {
        0.50 + 0.25 * (input.dentists_fte - 1.0).max(0.0) + 0.01 * (n - 20.0).max(0.0)
    } else {
        0.0
    };

    let pm = practice_management_fte(chairside + steri + prophy + frontdesk);

    FteByRole::from_parts(chairside, steri, prophy, frontdesk, pm)
}

fn practice_management_fte(team_fte: f64) -> f64 {
    if team_fte >= PM_FULL_AT {
        1.0
    } else if team_fte >= PM_HALF_AT {
        0.5
    } else {
        0.0
    }
}

/// Stage 3: clinical roles get the clinical buffer, admin roles the admin buffer.
pub fn buffered(base: &FteByRole, input: &ResolvedInput) -> FteByRole {
    let clinical = 1.0 + input.clinical_buffer;
    let admin = 1.0 + input.admin_buffer;
    base.map_atomic(|v| v * clinical, |v| v * admin)
}

/// Stage 4: ceil every atomic role to the rounding step.
pub fn rounded(final_fte: &FteByRole, step: f64) -> FteByRole {
    let up = |v: f64| ceil_to_step(v, step);
    FteByRole::from_stepped_parts(
        up(final_fte.chairside),
        up(final_fte.steri),
        up(final_fte.prophy),
        up(final_fte.frontdesk),
        up(final_fte.pm),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derived::derive_values;
    use crate::input::StaffingInput;
    use praxis_core::StaffingDefaults;

    fn pipeline(input: StaffingInput) -> (FteByRole, FteByRole, FteByRole) {
        let r = input.resolve(&StaffingDefaults::default());
        let d = derive_values(&r);
        let base = base_fte(&r, &d);
        let fin = buffered(&base, &r);
        let rnd = rounded(&fin, r.rounding_step_fte);
        (base, fin, rnd)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn two_chair_practice_base_values() {
        let (base, _, _) = pipeline(StaffingInput {
            dentists_fte: Some(2.0),
            chairs_simultaneous: Some(2.0),
            patients_per_day: Some(36.0),
            complexity_level: Some(0.0),
            ..Default::default()
        });
        assert!(approx(base.chairside, 2.55));
        assert!(approx(base.steri, 0.348));
        assert!(approx(base.frontdesk, 0.91));
        assert_eq!(base.pm, 0.0);
    }

    #[test]
    fn aggregates_hold_at_every_fidelity() {
        let (base, fin, rnd) = pipeline(StaffingInput {
            dentists_fte: Some(3.5),
            chairs_simultaneous: Some(4.0),
            prophylaxis_chairs: Some(2.0),
            patients_per_day: Some(77.0),
            complexity_level: Some(2.0),
            ..Default::default()
        });
        for f in [base, fin] {
            assert_eq!(f.zfa_total, f.chairside + f.steri);
            assert_eq!(f.total, f.zfa_total + f.prophy + f.frontdesk + f.pm);
        }
        assert_eq!(rnd.zfa_total, round_to(rnd.chairside + rnd.steri, STEP_PRECISION));
        assert_eq!(rnd.total, sum_stepped(rnd.zfa_total, rnd.prophy, rnd.frontdesk, rnd.pm));
    }

    #[test]
    fn rounded_aggregates_carry_no_float_noise() {
        // 1.6 + 0.3 is 1.9000000000000001 in f64
        let (_, fin, rnd) = pipeline(StaffingInput {
            dentists_fte: Some(0.5),
            chairs_simultaneous: Some(1.0),
            patients_per_day: Some(25.0),
            ..Default::default()
        });
        assert_eq!(rnd.chairside, 1.6);
        assert_eq!(rnd.steri, 0.3);
        assert_eq!(rnd.zfa_total, 1.9);
        assert_eq!(rnd.frontdesk, 0.6);
        assert_eq!(rnd.total, 2.5);

        // Sum of ceilings, one step above the ceiling of the sum.
        assert!(approx(fin.zfa_total, 1.7864));
        assert_eq!(ceil_to_step(fin.zfa_total, 0.1), 1.8);
    }

    #[test]
    fn practice_management_steps() {
        assert_eq!(practice_management_fte(9.99), 0.0);
        assert_eq!(practice_management_fte(10.0), 0.5);
        assert_eq!(practice_management_fte(14.9), 0.5);
        assert_eq!(practice_management_fte(15.0), 1.0);
    }

    #[test]
    fn prophylaxis_only_practice_keeps_frontdesk() {
        let (base, _, rnd) = pipeline(StaffingInput {
            prophylaxis_chairs: Some(1.0),
            ..Default::default()
        });
        assert_eq!(base.chairside, 0.0);
        assert!(approx(base.prophy, 0.9));
        assert!(approx(base.frontdesk, 0.5));
        assert!(approx(rnd.frontdesk, 0.6));
    }

    #[test]
    fn inactive_practice_is_all_zero() {
        let (base, fin, rnd) = pipeline(StaffingInput::default());
        assert_eq!(base, FteByRole::zero());
        assert_eq!(fin, FteByRole::zero());
        assert_eq!(rnd, FteByRole::zero());
    }
}
