//! HR analytics data model: aggregated inputs, KPI snapshots, alerts.
//!
//! Inputs are pre-aggregated per group by the caller. None of these types
//! carries a per-person identifier; the compliance guard enforces that on
//! whatever arrives in the flattened `extra` maps.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Group key used for practice-wide aggregates.
pub const PRACTICE_GROUP_KEY: &str = "PRACTICE";

// ── Aggregation level ─────────────────────────────────────────

/// Granularity at which KPIs are released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AggregationLevel {
    Practice,
    Role,
}

impl fmt::Display for AggregationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregationLevel::Practice => write!(f, "PRACTICE"),
            AggregationLevel::Role => write!(f, "ROLE"),
        }
    }
}

// ── Inputs ────────────────────────────────────────────────────

/// Absence days split by reason.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbsenceByType {
    #[serde(default)]
    pub sick: f64,
    #[serde(default)]
    pub vacation: f64,
    #[serde(default)]
    pub training: f64,
    #[serde(default)]
    pub other: f64,
    /// Unrecognised keys, scanned like the group's own `extra`.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl AbsenceByType {
    pub fn total(&self) -> f64 {
        self.sick + self.vacation + self.training + self.other
    }

    fn add(&mut self, other: &AbsenceByType) {
        self.sick += other.sick;
        self.vacation += other.vacation;
        self.training += other.training;
        self.other += other.other;
    }
}

/// One pre-aggregated group (a role, or the whole practice).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HrAggregatedGroupInput {
    pub group_key: String,
    pub headcount: u32,
    pub total_fte: f64,
    pub total_contracted_hours_per_week: f64,
    #[serde(default)]
    pub total_overtime_minutes: f64,
    #[serde(default)]
    pub total_absence_days: f64,
    #[serde(default)]
    pub absence_by_type: AbsenceByType,
    /// Unrecognised keys. Kept so the compliance scan sees them.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl HrAggregatedGroupInput {
    /// Empty group with the given key.
    pub fn empty(group_key: impl Into<String>) -> Self {
        Self {
            group_key: group_key.into(),
            headcount: 0,
            total_fte: 0.0,
            total_contracted_hours_per_week: 0.0,
            total_overtime_minutes: 0.0,
            total_absence_days: 0.0,
            absence_by_type: AbsenceByType::default(),
            extra: BTreeMap::new(),
        }
    }

    /// Add another group's totals into this one. The key is kept; `extra` is not merged.
    pub fn absorb(&mut self, other: &HrAggregatedGroupInput) {
        self.headcount = self.headcount.saturating_add(other.headcount);
        self.total_fte += other.total_fte;
        self.total_contracted_hours_per_week += other.total_contracted_hours_per_week;
        self.total_overtime_minutes += other.total_overtime_minutes;
        self.total_absence_days += other.total_absence_days;
        self.absence_by_type.add(&other.absence_by_type);
    }

    /// Sum a set of groups into one group under `group_key`.
    pub fn sum<'a, I>(group_key: impl Into<String>, groups: I) -> Self
    where
        I: IntoIterator<Item = &'a HrAggregatedGroupInput>,
    {
        let mut total = Self::empty(group_key);
        for g in groups {
            total.absorb(g);
        }
        total
    }
}

/// Request-scoped HR input for one practice and one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HrPracticeInput {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub target_fte: f64,
    pub workdays_per_week: f64,
    #[serde(default)]
    pub monthly_revenue: Option<f64>,
    pub groups: Vec<HrAggregatedGroupInput>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

// ── Snapshot ──────────────────────────────────────────────────

/// Traffic-light status of a snapshot or a single metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverallStatus {
    Ok,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HrPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HrMetrics {
    pub fte_quote: f64,
    pub current_fte: f64,
    pub target_fte: f64,
    pub fte_delta: f64,
    pub absence_rate_percent: f64,
    pub overtime_rate_percent: f64,
    pub labor_cost_ratio_percent: Option<f64>,
    pub overall_status: OverallStatus,
}

/// Compliance audit trail attached to every snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HrAudit {
    pub aggregation_level: AggregationLevel,
    pub k_used: u32,
    pub legal_basis: String,
    pub created_at: DateTime<Utc>,
    pub compliance_version: String,
}

/// Immutable KPI snapshot. The caller attaches the practice id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HrKpiSnapshot {
    pub id: Uuid,
    pub period: HrPeriod,
    pub aggregation_level: AggregationLevel,
    pub group_key: String,
    pub group_size: u32,
    pub metrics: HrMetrics,
    pub audit: HrAudit,
}

// ── Alerts ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warn,
    Critical,
}

impl AlertSeverity {
    /// Sort rank: critical first.
    pub fn rank(&self) -> u8 {
        match self {
            AlertSeverity::Critical => 0,
            AlertSeverity::Warn => 1,
            AlertSeverity::Info => 2,
        }
    }
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertSeverity::Info => write!(f, "info"),
            AlertSeverity::Warn => write!(f, "warn"),
            AlertSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Metric an alert refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HrMetric {
    FteQuote,
    AbsenceRatePercent,
    OvertimeRatePercent,
    LaborCostRatioPercent,
    OverallStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HrAlert {
    pub code: String,
    pub severity: AlertSeverity,
    pub title: String,
    pub explanation: String,
    pub recommended_actions: Vec<String>,
    pub metric: HrMetric,
    pub current_value: f64,
    pub threshold_value: Option<f64>,
    pub aggregation_level: AggregationLevel,
    pub group_key: String,
}
