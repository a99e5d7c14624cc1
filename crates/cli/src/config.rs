use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

use praxis_core::EngineConfig;

/// CLI configuration loaded from TOML file.
///
/// Every field is optional and overrides the environment-derived
/// [`EngineConfig`] value of the same name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub thresholds: ThresholdOverrides,

    #[serde(default)]
    pub staffing: StaffingOverrides,
}

/// `[thresholds]` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdOverrides {
    pub k_min: Option<u32>,
    pub fte_quote_warn: Option<f64>,
    pub fte_quote_critical: Option<f64>,
    pub fte_quote_overcapacity: Option<f64>,
    pub absence_warn: Option<f64>,
    pub absence_critical: Option<f64>,
    pub overtime_warn: Option<f64>,
    pub overtime_critical: Option<f64>,
    pub labor_cost_warn: Option<f64>,
    pub labor_cost_critical: Option<f64>,
}

/// `[staffing]` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaffingOverrides {
    pub clinical_buffer: Option<f64>,
    pub admin_buffer: Option<f64>,
    pub rounding_step_fte: Option<f64>,
    pub patients_per_chair: Option<f64>,
    pub avg_contract_fraction: Option<f64>,
}

fn set<T: Copy>(target: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *target = v;
    }
}

impl CliConfig {
    /// Return the default config directory path: ~/.config/praxis/
    pub fn default_config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("could not determine user config directory")?
            .join("praxis");
        Ok(config_dir)
    }

    /// Return the default config file path.
    pub fn default_config_path() -> Result<PathBuf> {
        Ok(Self::default_config_dir()?.join("config.toml"))
    }

    /// Load config from the given path, or the default path.
    /// Returns an empty config if the file does not exist.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_config_path()?,
        };

        if config_path.exists() {
            debug!(?config_path, "Loading config");
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("failed to read config: {}", config_path.display()))?;
            let config: Self = toml::from_str(&content)
                .with_context(|| format!("failed to parse config: {}", config_path.display()))?;
            Ok(config)
        } else {
            debug!(?config_path, "Config file not found, using environment only");
            Ok(Self::default())
        }
    }

    /// Overlay file values onto the environment-derived config.
    pub fn apply(&self, engine: &mut EngineConfig) {
        let t = &self.thresholds;
        let ht = &mut engine.thresholds;
        set(&mut ht.k_min, t.k_min);
        set(&mut ht.fte_quote.warn, t.fte_quote_warn);
        set(&mut ht.fte_quote.critical, t.fte_quote_critical);
        set(&mut ht.fte_quote_overcapacity, t.fte_quote_overcapacity);
        set(&mut ht.absence_rate_percent.warn, t.absence_warn);
        set(&mut ht.absence_rate_percent.critical, t.absence_critical);
        set(&mut ht.overtime_rate_percent.warn, t.overtime_warn);
        set(&mut ht.overtime_rate_percent.critical, t.overtime_critical);
        set(&mut ht.labor_cost_ratio_percent.warn, t.labor_cost_warn);
        set(&mut ht.labor_cost_ratio_percent.critical, t.labor_cost_critical);

        let s = &self.staffing;
        let sd = &mut engine.staffing;
        set(&mut sd.clinical_buffer, s.clinical_buffer);
        set(&mut sd.admin_buffer, s.admin_buffer);
        set(&mut sd.rounding_step_fte, s.rounding_step_fte);
        set(&mut sd.patients_per_chair, s.patients_per_chair);
        set(&mut sd.avg_contract_fraction, s.avg_contract_fraction);
    }
}
