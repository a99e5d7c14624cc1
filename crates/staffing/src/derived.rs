//! Stage 1: derive chairs, patient volume and the turnover/complexity factors.

use serde::{Deserialize, Serialize};

use praxis_core::numeric::{clamp, ratio};

use crate::input::ResolvedInput;

/// Lower edge of the turnover band (patients per chair per day).
const TURNOVER_LOW_PPC: f64 = 14.0;
/// Width of the turnover band; TI reaches 1 at 22 patients per chair.
const TURNOVER_BAND_WIDTH: f64 = 8.0;

const COMPLEXITY_BONUS_PER_LEVEL: f64 = 0.05;
const SUPPORT_FACTOR_BASE: f64 = 0.15;
const SUPPORT_FACTOR_TURNOVER: f64 = 0.25;

/// Outside this PPC range an estimation warning is attached.
const PLAUSIBLE_PPC: (f64, f64) = (8.0, 30.0);

/// Where the effective chair count came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChairSource {
    Explicit,
    TreatmentRooms,
    DentistsFte,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedValues {
    /// Effective simultaneous chairs.
    pub c: u32,
    pub chair_source: ChairSource,
    /// Patients per day.
    pub n: f64,
    /// Patients per chair per day.
    pub ppc: f64,
    /// Turnover index, 0..1.
    pub ti: f64,
    /// Complexity bonus.
    pub cb: f64,
    /// Support factor.
    pub sf: f64,
    pub warnings: Vec<String>,
}

pub fn derive_values(input: &ResolvedInput) -> DerivedValues {
    let mut warnings = Vec::new();
    let has_dentists = input.dentists_fte > 0.0;

    let (c, chair_source) = if let Some(chairs) = input.chairs_simultaneous {
        (chairs.round() as u32, ChairSource::Explicit)
    } else if input.treatment_rooms > 0.0 && has_dentists {
        warnings.push(format!(
            "Gleichzeitig besetzte Stuehle aus Behandlungsraeumen geschaetzt ({}).",
            input.treatment_rooms.round()
        ));
        (input.treatment_rooms.round() as u32, ChairSource::TreatmentRooms)
    } else if has_dentists {
        warnings.push(format!(
            "Gleichzeitig besetzte Stuehle aus Zahnarzt-VZAE geschaetzt ({}).",
            input.dentists_fte.round()
        ));
        (input.dentists_fte.round() as u32, ChairSource::DentistsFte)
    } else {
        if input.treatment_rooms > 0.0 {
            warnings.push(
                "Behandlungsraeume ignoriert: ohne Zahnarzt-VZAE werden keine Stuehle geschaetzt."
                    .to_string(),
            );
        }
        (0, ChairSource::None)
    };

    let n = match input.patients_per_day {
        Some(n) => n,
        None => {
            let estimated = f64::from(c) * input.default_patients_per_chair;
            if c > 0 {
                warnings.push(format!(
                    "Patienten pro Tag geschaetzt: {} Stuehle x {} Patienten.",
                    c, input.default_patients_per_chair
                ));
            }
            estimated
        }
    };

    let ppc = ratio(n, f64::from(c));
    if c > 0 && (ppc < PLAUSIBLE_PPC.0 || ppc > PLAUSIBLE_PPC.1) {
        warnings.push(format!(
            "Ungewoehnliche Auslastung: {:.1} Patienten pro Stuhl und Tag.",
            ppc
        ));
    }

    let ti = clamp((ppc - TURNOVER_LOW_PPC) / TURNOVER_BAND_WIDTH, 0.0, 1.0);
    let cb = COMPLEXITY_BONUS_PER_LEVEL * f64::from(input.complexity_level);
    let sf = SUPPORT_FACTOR_BASE + SUPPORT_FACTOR_TURNOVER * ti;

    DerivedValues {
        c,
        chair_source,
        n,
        ppc,
        ti,
        cb,
        sf,
        warnings,
    }
}
