//! Warn/critical bands for HR KPIs and the k-anonymity floor.
//!
//! Thresholds are plain values threaded through every entry point. There is
//! no process-wide default lookup; [`HrThresholds::default`] is only the
//! documented baseline callers start from.

use serde::{Deserialize, Serialize};

use crate::hr::OverallStatus;

/// Recommended k-anonymity floor.
pub const K_MIN_DEFAULT: u32 = 5;

/// Absolute k-anonymity floor. Anything lower is rejected outright.
pub const K_MIN_ABSOLUTE_FLOOR: u32 = 3;

/// A warn/critical pair.
///
/// Whether a metric is bad when high or when low is decided by the caller
/// through [`ThresholdBand::classify_high`] or [`ThresholdBand::classify_low`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdBand {
    pub warn: f64,
    pub critical: f64,
}

impl ThresholdBand {
    pub const fn new(warn: f64, critical: f64) -> Self {
        Self { warn, critical }
    }

    /// Status for a metric where higher is worse (`value >= threshold` crosses).
    pub fn classify_high(&self, value: f64) -> OverallStatus {
        if value >= self.critical {
            OverallStatus::Critical
        } else if value >= self.warn {
            OverallStatus::Warning
        } else {
            OverallStatus::Ok
        }
    }

    /// Status for a metric where lower is worse (`value < threshold` crosses).
    pub fn classify_low(&self, value: f64) -> OverallStatus {
        if value < self.critical {
            OverallStatus::Critical
        } else if value < self.warn {
            OverallStatus::Warning
        } else {
            OverallStatus::Ok
        }
    }
}

/// Threshold configuration for KPI status and alert rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HrThresholds {
    /// current/target FTE; low is bad.
    pub fte_quote: ThresholdBand,
    /// fteQuote above this raises an informational over-capacity alert.
    pub fte_quote_overcapacity: f64,
    pub absence_rate_percent: ThresholdBand,
    pub overtime_rate_percent: ThresholdBand,
    pub labor_cost_ratio_percent: ThresholdBand,
    pub k_min: u32,
}

impl Default for HrThresholds {
    fn default() -> Self {
        Self {
            fte_quote: ThresholdBand::new(0.90, 0.80),
            fte_quote_overcapacity: 1.15,
            absence_rate_percent: ThresholdBand::new(6.0, 10.0),
            overtime_rate_percent: ThresholdBand::new(10.0, 20.0),
            labor_cost_ratio_percent: ThresholdBand::new(30.0, 35.0),
            k_min: K_MIN_DEFAULT,
        }
    }
}

impl HrThresholds {
    /// Copy with a different `k_min`.
    pub fn with_k_min(mut self, k_min: u32) -> Self {
        self.k_min = k_min;
        self
    }
}
