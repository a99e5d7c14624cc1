//! End-to-end checks of `compute_staffing` against reference practices.

use praxis_core::numeric::{ceil_to_step, round_to, STEP_PRECISION};
use praxis_core::StaffingDefaults;
use praxis_staffing::{compute_staffing, CurrentStaffing, FteByRole, StaffingInput, TrafficLight};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn two_dentist_practice() -> StaffingInput {
    StaffingInput {
        dentists_fte: Some(2.0),
        chairs_simultaneous: Some(2.0),
        patients_per_day: Some(36.0),
        complexity_level: Some(0.0),
        ..Default::default()
    }
}

/// A spread of practice shapes, including degenerate ones.
fn sample_inputs() -> Vec<StaffingInput> {
    let mut inputs = vec![StaffingInput::default(), two_dentist_practice()];
    for dentists in [0.0, 0.5, 1.0, 2.5, 4.0] {
        for rooms in [None, Some(0.0), Some(3.0), Some(6.0)] {
            for prophy in [0.0, 1.0, 2.0] {
                for complexity in [-1.0, 0.0, 2.0] {
                    inputs.push(StaffingInput {
                        dentists_fte: Some(dentists),
                        treatment_rooms: rooms,
                        prophylaxis_chairs: Some(prophy),
                        complexity_level: Some(complexity),
                        ..Default::default()
                    });
                }
            }
        }
    }
    inputs.push(StaffingInput {
        dentists_fte: Some(6.0),
        chairs_simultaneous: Some(7.0),
        prophylaxis_chairs: Some(3.0),
        patients_per_day: Some(160.0),
        complexity_level: Some(2.0),
        rounding_step_fte: Some(0.25),
        ..Default::default()
    });
    inputs.push(StaffingInput {
        dentists_fte: Some(f64::NAN),
        chairs_simultaneous: Some(-3.0),
        patients_per_day: Some(f64::INFINITY),
        clinical_buffer: Some(-1.0),
        ..Default::default()
    });
    inputs
}

#[test]
fn reference_two_chair_practice() {
    let r = compute_staffing(&two_dentist_practice(), None, &StaffingDefaults::default());

    assert_eq!(r.derived.c, 2);
    assert!(approx(r.derived.n, 36.0));
    assert!(approx(r.derived.ppc, 18.0));
    assert!(approx(r.derived.ti, 0.5));
    assert!(approx(r.derived.sf, 0.275));
    assert!(approx(r.rounded_fte.zfa_total, 3.3));
    assert!(approx(r.rounded_fte.frontdesk, 1.0));
    assert_eq!(r.traffic_light, Some(TrafficLight::Green));
    assert!(r.flags.is_empty());
    assert!(r.meta.is_practice_active);
    assert!(r.coverage.is_none());
}

#[test]
fn coverage_against_rounded_demand() {
    let current = CurrentStaffing {
        zfa_total_fte: Some(1.0),
        ..Default::default()
    };
    let r = compute_staffing(&two_dentist_practice(), Some(&current), &StaffingDefaults::default());

    let coverage = r.coverage.expect("coverage requested");
    let zfa = coverage.zfa_total.expect("zfa soll > 0");
    assert!((zfa.coverage - 0.303).abs() < 1e-3);
    assert!(coverage.frontdesk.is_none());
}

#[test]
fn all_zero_practice_is_inactive() {
    let r = compute_staffing(&StaffingInput::default(), None, &StaffingDefaults::default());

    assert!(!r.meta.is_practice_active);
    assert_eq!(r.rounded_fte.frontdesk, 0.0);
    assert_eq!(r.rounded_fte, FteByRole::zero());
    assert_eq!(r.meta.total_from_rounded_parts, 0.0);
    assert_eq!(r.ratios.chairside_per_chair, None);
    assert!(r.traffic_light.is_none());
    assert!(r.flags.is_empty());
}

#[test]
fn zfa_total_is_sum_of_parts_at_every_fidelity() {
    for input in sample_inputs() {
        let r = compute_staffing(&input, None, &StaffingDefaults::default());
        for f in [r.base_fte, r.final_fte] {
            assert_eq!(f.zfa_total, f.chairside + f.steri, "input: {:?}", input);
        }
        let f = r.rounded_fte;
        assert_eq!(
            f.zfa_total,
            round_to(f.chairside + f.steri, STEP_PRECISION),
            "input: {:?}",
            input
        );
    }
}

#[test]
fn atomic_roles_are_ceiled_to_step() {
    for input in sample_inputs() {
        let r = compute_staffing(&input, None, &StaffingDefaults::default());
        let step = r.input.rounding_step_fte;
        let pairs = [
            (r.rounded_fte.chairside, r.final_fte.chairside),
            (r.rounded_fte.steri, r.final_fte.steri),
            (r.rounded_fte.prophy, r.final_fte.prophy),
            (r.rounded_fte.frontdesk, r.final_fte.frontdesk),
            (r.rounded_fte.pm, r.final_fte.pm),
        ];
        for (rounded, fin) in pairs {
            assert_eq!(rounded, ceil_to_step(fin, step));
            assert!(rounded + 1e-9 >= fin, "never rounds down");
        }
    }
}

fn is_step_multiple(value: f64, step: f64) -> bool {
    round_to((value / step).round() * step, STEP_PRECISION) == value
}

#[test]
fn rounded_aggregates_are_clean_step_multiples() {
    for input in sample_inputs() {
        let r = compute_staffing(&input, None, &StaffingDefaults::default());
        let step = r.input.rounding_step_fte;
        for v in [r.rounded_fte.zfa_total, r.rounded_fte.total, r.meta.total_from_rounded_parts] {
            assert!(is_step_multiple(v, step), "{v} is not a multiple of {step}");
        }
    }
}

#[test]
fn rounded_zfa_total_is_at_most_one_step_above_its_own_ceiling() {
    let mut above = 0;
    for input in sample_inputs() {
        let r = compute_staffing(&input, None, &StaffingDefaults::default());
        let step = r.input.rounding_step_fte;
        let ceiled = ceil_to_step(r.final_fte.zfa_total, step);
        let rounded = r.rounded_fte.zfa_total;
        if rounded != ceiled {
            assert_eq!(rounded, round_to(ceiled + step, STEP_PRECISION), "input: {:?}", input);
            above += 1;
        }
    }
    assert!(above > 0, "grid should contain a sum-of-ceilings case");
}

#[test]
fn total_from_rounded_parts_matches_displayed_parts() {
    for input in sample_inputs() {
        let r = compute_staffing(&input, None, &StaffingDefaults::default());
        let f = r.rounded_fte;
        assert_eq!(
            r.meta.total_from_rounded_parts,
            round_to(f.zfa_total + f.prophy + f.frontdesk + f.pm, STEP_PRECISION)
        );
        assert_eq!(r.meta.total_from_rounded_parts, f.total);
    }
}

#[test]
fn no_dentists_means_no_chairs_from_rooms() {
    for rooms in [1.0, 4.0, 12.0] {
        let input = StaffingInput {
            dentists_fte: Some(0.0),
            treatment_rooms: Some(rooms),
            ..Default::default()
        };
        let r = compute_staffing(&input, None, &StaffingDefaults::default());
        assert_eq!(r.derived.c, 0);
        assert!(!r.meta.is_practice_active);
    }
}

#[test]
fn prophylaxis_only_practice_is_active() {
    let input = StaffingInput {
        prophylaxis_chairs: Some(1.0),
        ..Default::default()
    };
    let r = compute_staffing(&input, None, &StaffingDefaults::default());
    assert!(r.meta.is_practice_active);
    assert!(r.rounded_fte.frontdesk > 0.0);
}

#[test]
fn repeated_calls_are_identical() {
    for input in sample_inputs() {
        let a = compute_staffing(&input, None, &StaffingDefaults::default());
        let b = compute_staffing(&input, None, &StaffingDefaults::default());
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}

#[test]
fn malformed_numbers_degrade_to_zero() {
    let input = StaffingInput {
        dentists_fte: Some(f64::NAN),
        chairs_simultaneous: Some(-3.0),
        treatment_rooms: Some(f64::NEG_INFINITY),
        prophylaxis_chairs: Some(-1.0),
        ..Default::default()
    };
    let r = compute_staffing(&input, None, &StaffingDefaults::default());
    assert_eq!(r.derived.c, 0);
    assert_eq!(r.rounded_fte, FteByRole::zero());
    assert!(!r.meta.is_practice_active);
}

#[test]
fn fixture_decodes_and_computes() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../data/examples/staffing-input.json");
    let raw = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();

    let input: StaffingInput = serde_json::from_value(doc["input"].clone()).unwrap();
    let current: CurrentStaffing = serde_json::from_value(doc["current"].clone()).unwrap();
    let r = compute_staffing(&input, Some(&current), &StaffingDefaults::default());

    assert_eq!(r.derived.c, 2);
    assert!(approx(r.rounded_fte.zfa_total, 3.3));
    assert!(r.coverage.unwrap().zfa_total.is_some());
}
