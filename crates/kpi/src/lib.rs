//! HR KPI aggregation over privacy-cleared group totals.
//!
//! Inputs are per-group sums prepared by the caller. Every entry point runs
//! the compliance gate first and refuses to compute anything on failure.

pub mod error;
pub mod metrics;
pub mod period;
pub mod snapshot;

pub use error::{KpiError, Result};
pub use metrics::{compute_metrics, overall_status, AVG_HOURLY_RATE_EUR, WEEKS_PER_MONTH};
pub use period::PeriodFrame;
pub use snapshot::{
    compute_practice_snapshot, compute_practice_snapshot_at, compute_role_snapshots,
    compute_role_snapshots_at, RoleSnapshots,
};
