//! Rule-based HR alerts over KPI snapshots.
//!
//! Rules are a closed, ordered registry ([`rules::RULE_REGISTRY`]). Every
//! piece of generated text goes through the compliance text linter before
//! an alert is returned.

pub mod engine;
pub mod error;
pub mod report;
pub mod rules;

pub use engine::{check_thresholds, generate_hr_alerts};
pub use error::{AlertError, Result};
pub use report::{build_hr_report, build_hr_report_at, HrReport};
pub use rules::{HrAlertRule, HR_ALL_HEALTHY, RULE_REGISTRY};
