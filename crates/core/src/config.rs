use std::env;

use serde::{Deserialize, Serialize};

use crate::thresholds::{HrThresholds, ThresholdBand};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_f64(profile: &str, key: &str, default: f64) -> f64 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

fn profiled_env_u32(profile: &str, key: &str, default: u32) -> u32 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn profiled_band(profile: &str, prefix: &str, default: ThresholdBand) -> ThresholdBand {
    ThresholdBand {
        warn: profiled_env_f64(profile, &format!("{prefix}_WARN"), default.warn),
        critical: profiled_env_f64(profile, &format!("{prefix}_CRITICAL"), default.critical),
    }
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Active profile name (empty = default).
    pub profile: String,
    pub thresholds: HrThresholds,
    pub staffing: StaffingDefaults,
}

impl EngineConfig {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `PRAXIS_PROFILE`. When set (e.g. `DEMO`), every
    /// key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("PRAXIS_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            thresholds: thresholds_from_env_profiled(p),
            staffing: StaffingDefaults::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        let t = &self.thresholds;
        let s = &self.staffing;
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!("  privacy:     k_min={}", t.k_min);
        tracing::info!(
            "  fte quote:   warn<{} critical<{} overcapacity>{}",
            t.fte_quote.warn, t.fte_quote.critical, t.fte_quote_overcapacity
        );
        tracing::info!(
            "  absence:     warn>={}% critical>={}%",
            t.absence_rate_percent.warn, t.absence_rate_percent.critical
        );
        tracing::info!(
            "  overtime:    warn>={}% critical>={}%",
            t.overtime_rate_percent.warn, t.overtime_rate_percent.critical
        );
        tracing::info!(
            "  labor cost:  warn>={}% critical>={}%",
            t.labor_cost_ratio_percent.warn, t.labor_cost_ratio_percent.critical
        );
        tracing::info!(
            "  staffing:    clinical_buffer={} admin_buffer={} step={} ppc={} contract={}",
            s.clinical_buffer,
            s.admin_buffer,
            s.rounding_step_fte,
            s.patients_per_chair,
            s.avg_contract_fraction
        );
    }

    /// Return a JSON view for API responses and `praxis config`.
    pub fn redacted_summary(&self) -> serde_json::Value {
        serde_json::json!({
            "profile": self.profile_label(),
            "thresholds": self.thresholds,
            "staffing": self.staffing,
        })
    }
}

// ── HR thresholds ─────────────────────────────────────────────

fn thresholds_from_env_profiled(p: &str) -> HrThresholds {
    let d = HrThresholds::default();
    HrThresholds {
        fte_quote: profiled_band(p, "PRAXIS_FTE_QUOTE", d.fte_quote),
        fte_quote_overcapacity: profiled_env_f64(
            p,
            "PRAXIS_FTE_QUOTE_OVERCAPACITY",
            d.fte_quote_overcapacity,
        ),
        absence_rate_percent: profiled_band(p, "PRAXIS_ABSENCE", d.absence_rate_percent),
        overtime_rate_percent: profiled_band(p, "PRAXIS_OVERTIME", d.overtime_rate_percent),
        labor_cost_ratio_percent: profiled_band(p, "PRAXIS_LABOR_COST", d.labor_cost_ratio_percent),
        k_min: profiled_env_u32(p, "PRAXIS_K_MIN", d.k_min),
    }
}

// ── Staffing ──────────────────────────────────────────────────

/// Fallbacks for optional staffing-calculator inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffingDefaults {
    /// Buffer fraction for chairside, steri and prophylaxis.
    pub clinical_buffer: f64,
    /// Buffer fraction for frontdesk and practice management.
    pub admin_buffer: f64,
    pub rounding_step_fte: f64,
    /// Patients per chair per day used when patients/day is not given.
    pub patients_per_chair: f64,
    /// Typical contract size used for the headcount hint.
    pub avg_contract_fraction: f64,
}

impl Default for StaffingDefaults {
    fn default() -> Self {
        Self {
            clinical_buffer: 0.12,
            admin_buffer: 0.05,
            rounding_step_fte: 0.1,
            patients_per_chair: 18.0,
            avg_contract_fraction: 0.8,
        }
    }
}

impl StaffingDefaults {
    fn from_env_profiled(p: &str) -> Self {
        let d = Self::default();
        Self {
            clinical_buffer: profiled_env_f64(p, "PRAXIS_CLINICAL_BUFFER", d.clinical_buffer),
            admin_buffer: profiled_env_f64(p, "PRAXIS_ADMIN_BUFFER", d.admin_buffer),
            rounding_step_fte: profiled_env_f64(p, "PRAXIS_ROUNDING_STEP", d.rounding_step_fte),
            patients_per_chair: profiled_env_f64(p, "PRAXIS_PATIENTS_PER_CHAIR", d.patients_per_chair),
            avg_contract_fraction: profiled_env_f64(
                p,
                "PRAXIS_AVG_CONTRACT_FRACTION",
                d.avg_contract_fraction,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env vars are process-global; each test uses its own profile prefix.

    #[test]
    fn profiled_key_wins_over_plain_key() {
        env::set_var("CFGTEST_A_PRAXIS_K_MIN", "8");
        let cfg = EngineConfig::for_profile("cfgtest_a");
        assert_eq!(cfg.profile, "CFGTEST_A");
        assert_eq!(cfg.thresholds.k_min, 8);
        env::remove_var("CFGTEST_A_PRAXIS_K_MIN");
    }

    #[test]
    fn unparseable_values_fall_back_to_defaults() {
        env::set_var("CFGTEST_B_PRAXIS_CLINICAL_BUFFER", "lots");
        env::set_var("CFGTEST_B_PRAXIS_OVERTIME_CRITICAL", "25");
        let cfg = EngineConfig::for_profile("CFGTEST_B");
        assert_eq!(cfg.staffing.clinical_buffer, StaffingDefaults::default().clinical_buffer);
        assert_eq!(cfg.thresholds.overtime_rate_percent.critical, 25.0);
        assert_eq!(cfg.thresholds.overtime_rate_percent.warn, 10.0);
        env::remove_var("CFGTEST_B_PRAXIS_CLINICAL_BUFFER");
        env::remove_var("CFGTEST_B_PRAXIS_OVERTIME_CRITICAL");
    }

    #[test]
    fn summary_reports_default_label() {
        let cfg = EngineConfig {
            profile: String::new(),
            thresholds: HrThresholds::default(),
            staffing: StaffingDefaults::default(),
        };
        let v = cfg.redacted_summary();
        assert_eq!(v["profile"], "default");
        assert_eq!(v["thresholds"]["kMin"], 5);
        assert_eq!(v["staffing"]["roundingStepFte"], 0.1);
    }
}
