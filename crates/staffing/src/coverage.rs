//! Stage 7: ist/soll coverage against the rounded demand.

use serde::{Deserialize, Serialize};

use praxis_core::numeric::{ratio, safe_number};

use crate::fte::FteByRole;
use crate::input::CurrentStaffing;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageEntry {
    pub ist: f64,
    pub soll: f64,
    /// ist / soll.
    pub coverage: f64,
    /// soll - ist; negative means more staff than required.
    pub gap_fte: f64,
}

/// Coverage per role. A role is present only if ist was supplied and soll > 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coverage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chairside: Option<CoverageEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steri: Option<CoverageEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zfa_total: Option<CoverageEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prophy: Option<CoverageEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frontdesk: Option<CoverageEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pm: Option<CoverageEntry>,
}

fn entry(ist: Option<f64>, soll: f64) -> Option<CoverageEntry> {
    let ist = safe_number(ist?);
    (soll > 0.0).then(|| CoverageEntry {
        ist,
        soll,
        coverage: ratio(ist, soll),
        gap_fte: soll - ist,
    })
}

pub fn compute_coverage(current: &CurrentStaffing, soll: &FteByRole) -> Coverage {
    let zfa_ist = current.zfa_total_fte.or_else(|| {
        match (current.chairside_fte, current.steri_fte) {
            (Some(c), Some(s)) => Some(safe_number(c) + safe_number(s)),
            _ => None,
        }
    });

    Coverage {
        chairside: entry(current.chairside_fte, soll.chairside),
        steri: entry(current.steri_fte, soll.steri),
        zfa_total: entry(zfa_ist, soll.zfa_total),
        prophy: entry(current.prophy_fte, soll.prophy),
        frontdesk: entry(current.frontdesk_fte, soll.frontdesk),
        pm: entry(current.pm_fte, soll.pm),
    }
}
