//! Stage 5: ratios and traffic-light flags over the rounded demand.

use serde::{Deserialize, Serialize};

use praxis_core::numeric::{ratio, round_to};

use crate::derived::DerivedValues;
use crate::fte::FteByRole;

/// ZFA-per-chair bands: red < 1.20 <= yellow < 1.45 <= green <= 1.80 < yellow <= 2.00 < red.
const ZFA_RED_LOW: f64 = 1.20;
const ZFA_GREEN_LOW: f64 = 1.45;
const ZFA_GREEN_HIGH: f64 = 1.80;
const ZFA_YELLOW_HIGH: f64 = 2.00;

const CHAIRSIDE_MIN_PER_CHAIR: f64 = 1.0;

const FRONTDESK_PATIENTS_RED: f64 = 60.0;
const FRONTDESK_PATIENTS_YELLOW: f64 = 45.0;
const FRONTDESK_THIN_PATIENTS: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficLight {
    Green,
    Yellow,
    Red,
}

/// Five-band classification of a ZFA-per-chair ratio.
pub fn zfa_per_chair_light(r: f64) -> TrafficLight {
    if r < ZFA_RED_LOW {
        TrafficLight::Red
    } else if r < ZFA_GREEN_LOW {
        TrafficLight::Yellow
    } else if r <= ZFA_GREEN_HIGH {
        TrafficLight::Green
    } else if r <= ZFA_YELLOW_HIGH {
        TrafficLight::Yellow
    } else {
        TrafficLight::Red
    }
}

/// Ratios are `None` when their denominator is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffingRatios {
    pub chairside_per_chair: Option<f64>,
    pub zfa_total_per_chair: Option<f64>,
    pub patients_per_frontdesk_fte: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffingFlag {
    pub code: String,
    pub level: TrafficLight,
    pub message: String,
}

impl StaffingFlag {
    fn new(code: &str, level: TrafficLight, message: String) -> Self {
        Self {
            code: code.to_string(),
            level,
            message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagReport {
    pub ratios: StaffingRatios,
    /// Light for the ZFA-per-chair ratio; `None` without chairs.
    pub traffic_light: Option<TrafficLight>,
    pub flags: Vec<StaffingFlag>,
}

pub fn evaluate_flags(rounded: &FteByRole, derived: &DerivedValues) -> FlagReport {
    let chairs = f64::from(derived.c);
    let mut flags = Vec::new();

    let ratios = StaffingRatios {
        chairside_per_chair: (derived.c > 0).then(|| round_to(ratio(rounded.chairside, chairs), 3)),
        zfa_total_per_chair: (derived.c > 0).then(|| round_to(ratio(rounded.zfa_total, chairs), 3)),
        patients_per_frontdesk_fte: (rounded.frontdesk > 0.0 && derived.n > 0.0)
            .then(|| round_to(ratio(derived.n, rounded.frontdesk), 1)),
    };

    let traffic_light = ratios.zfa_total_per_chair.map(zfa_per_chair_light);
    if let (Some(light), Some(r)) = (traffic_light, ratios.zfa_total_per_chair) {
        if light != TrafficLight::Green {
            let (code, text) = if r < ZFA_GREEN_LOW {
                ("ZFA_PER_CHAIR_LOW", "unter")
            } else {
                ("ZFA_PER_CHAIR_HIGH", "ueber")
            };
            flags.push(StaffingFlag::new(
                code,
                light,
                format!(
                    "{:.2} ZFA-VZAE pro Stuhl liegt {} dem Zielkorridor {:.2}-{:.2}.",
                    r, text, ZFA_GREEN_LOW, ZFA_GREEN_HIGH
                ),
            ));
        }
    }

    if let Some(r) = ratios.chairside_per_chair {
        if r < CHAIRSIDE_MIN_PER_CHAIR {
            flags.push(StaffingFlag::new(
                "CHAIRSIDE_BELOW_ONE_PER_CHAIR",
                TrafficLight::Red,
                format!("Weniger als eine Stuhlassistenz pro Stuhl ({:.2}).", r),
            ));
        }
    }

    if let Some(ppf) = ratios.patients_per_frontdesk_fte {
        if ppf > FRONTDESK_PATIENTS_RED {
            flags.push(StaffingFlag::new(
                "FRONTDESK_OVERLOADED",
                TrafficLight::Red,
                format!("{:.0} Patienten pro Empfangs-VZAE und Tag.", ppf),
            ));
        } else if ppf > FRONTDESK_PATIENTS_YELLOW {
            flags.push(StaffingFlag::new(
                "FRONTDESK_OVERLOADED",
                TrafficLight::Yellow,
                format!("{:.0} Patienten pro Empfangs-VZAE und Tag.", ppf),
            ));
        }
    }

    if rounded.frontdesk > 0.0 && rounded.frontdesk < 1.0 && derived.n > FRONTDESK_THIN_PATIENTS {
        flags.push(StaffingFlag::new(
            "FRONTDESK_THIN",
            TrafficLight::Yellow,
            format!(
                "Nur {:.1} Empfangs-VZAE bei {:.0} Patienten pro Tag.",
                rounded.frontdesk, derived.n
            ),
        ));
    }

    FlagReport {
        ratios,
        traffic_light,
        flags,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derived::ChairSource;

    fn derived(c: u32, n: f64) -> DerivedValues {
        DerivedValues {
            c,
            chair_source: ChairSource::Explicit,
            n,
            ppc: ratio(n, f64::from(c)),
            ti: 0.0,
            cb: 0.0,
            sf: 0.15,
            warnings: Vec::new(),
        }
    }

    #[test]
    fn five_band_light() {
        assert_eq!(zfa_per_chair_light(1.19), TrafficLight::Red);
        assert_eq!(zfa_per_chair_light(1.20), TrafficLight::Yellow);
        assert_eq!(zfa_per_chair_light(1.45), TrafficLight::Green);
        assert_eq!(zfa_per_chair_light(1.80), TrafficLight::Green);
        assert_eq!(zfa_per_chair_light(2.00), TrafficLight::Yellow);
        assert_eq!(zfa_per_chair_light(2.01), TrafficLight::Red);
    }

    #[test]
    fn no_chair_flags_without_chairs() {
        let report = evaluate_flags(&FteByRole::zero(), &derived(0, 0.0));
        assert_eq!(report.ratios, StaffingRatios::default());
        assert_eq!(report.traffic_light, None);
        assert!(report.flags.is_empty());
    }

    #[test]
    fn thin_zfa_cover_is_flagged_low() {
        let rounded = FteByRole::from_parts(1.8, 0.3, 0.0, 1.0, 0.0);
        let report = evaluate_flags(&rounded, &derived(2, 36.0));
        assert_eq!(report.ratios.zfa_total_per_chair, Some(1.05));
        assert_eq!(report.traffic_light, Some(TrafficLight::Red));
        assert_eq!(report.flags[0].code, "ZFA_PER_CHAIR_LOW");
        assert!(report.flags.iter().any(|f| f.code == "CHAIRSIDE_BELOW_ONE_PER_CHAIR"));
    }

    #[test]
    fn frontdesk_bands() {
        let rounded = FteByRole::from_parts(3.0, 0.5, 0.0, 0.8, 0.0);
        let report = evaluate_flags(&rounded, &derived(2, 50.0));
        let codes: Vec<(&str, TrafficLight)> =
            report.flags.iter().map(|f| (f.code.as_str(), f.level)).collect();
        // 50 / 0.8 = 62.5 patients per frontdesk FTE
        assert!(codes.contains(&("FRONTDESK_OVERLOADED", TrafficLight::Red)));
        assert!(codes.contains(&("FRONTDESK_THIN", TrafficLight::Yellow)));
    }
}
