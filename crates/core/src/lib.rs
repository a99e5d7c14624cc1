//! Shared building blocks for the practice personnel engines.
//!
//! - [`numeric`]: safe-number coercion, clamping, ceil-to-step rounding
//! - [`hr`]: aggregated HR input records, KPI snapshots and alerts
//! - [`thresholds`]: warn/critical bands and the k-anonymity floor
//! - [`config`]: environment-driven engine configuration

pub mod config;
pub mod hr;
pub mod numeric;
pub mod thresholds;

pub use config::{EngineConfig, StaffingDefaults};
pub use hr::*;
pub use thresholds::*;
