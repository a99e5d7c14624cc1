//! KPI formulas for one aggregated group.

use praxis_core::numeric::{ratio, round_to, safe_number};
use praxis_core::{HrAggregatedGroupInput, HrMetrics, HrThresholds, OverallStatus};

use crate::period::PeriodFrame;

/// Employer cost per paid hour used to estimate monthly labor cost, in EUR.
pub const AVG_HOURLY_RATE_EUR: f64 = 28.0;

/// Average weeks per calendar month (52 / 12).
pub const WEEKS_PER_MONTH: f64 = 4.33;

const MINUTES_PER_HOUR: f64 = 60.0;

/// Compute rounded metrics and their overall status.
///
/// A non-positive `target_fte` yields a quote of 1.0: without a plan there
/// is no shortfall to report.
pub fn compute_metrics(
    group: &HrAggregatedGroupInput,
    target_fte: f64,
    period: &PeriodFrame,
    monthly_revenue: Option<f64>,
    thresholds: &HrThresholds,
) -> HrMetrics {
    let current_fte = safe_number(group.total_fte);
    let target_fte = safe_number(target_fte);
    let fte_quote = if target_fte > 0.0 {
        current_fte / target_fte
    } else {
        1.0
    };

    let person_workdays = f64::from(group.headcount) * period.workdays;
    let absence = 100.0 * ratio(safe_number(group.total_absence_days), person_workdays);

    let hours_per_week = safe_number(group.total_contracted_hours_per_week);
    let contract_minutes = hours_per_week * MINUTES_PER_HOUR * period.weeks;
    let overtime = 100.0 * ratio(safe_number(group.total_overtime_minutes), contract_minutes);

    let labor_cost = monthly_revenue
        .map(safe_number)
        .filter(|r| *r > 0.0)
        .map(|revenue| {
            let monthly_cost = hours_per_week * WEEKS_PER_MONTH * AVG_HOURLY_RATE_EUR;
            round_to(100.0 * monthly_cost / revenue, 1)
        });

    let mut metrics = HrMetrics {
        fte_quote: round_to(fte_quote, 3),
        current_fte: round_to(current_fte, 2),
        target_fte: round_to(target_fte, 2),
        fte_delta: round_to(current_fte - target_fte, 2),
        absence_rate_percent: round_to(absence, 1),
        overtime_rate_percent: round_to(overtime, 1),
        labor_cost_ratio_percent: labor_cost,
        overall_status: OverallStatus::Ok,
    };
    metrics.overall_status = overall_status(&metrics, thresholds);
    metrics
}

/// Worst status across all metrics. FTE quote is bad when low, the rates when high.
pub fn overall_status(metrics: &HrMetrics, thresholds: &HrThresholds) -> OverallStatus {
    let mut statuses = vec![
        thresholds.fte_quote.classify_low(metrics.fte_quote),
        thresholds.absence_rate_percent.classify_high(metrics.absence_rate_percent),
        thresholds.overtime_rate_percent.classify_high(metrics.overtime_rate_percent),
    ];
    if let Some(lc) = metrics.labor_cost_ratio_percent {
        statuses.push(thresholds.labor_cost_ratio_percent.classify_high(lc));
    }
    statuses.into_iter().max().unwrap_or(OverallStatus::Ok)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn four_weeks() -> PeriodFrame {
        PeriodFrame::new(
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 28).unwrap(),
            5.0,
        )
        .unwrap()
    }

    fn team() -> HrAggregatedGroupInput {
        HrAggregatedGroupInput {
            headcount: 10,
            total_fte: 9.0,
            total_contracted_hours_per_week: 360.0,
            total_overtime_minutes: 8640.0,
            total_absence_days: 10.0,
            ..HrAggregatedGroupInput::empty("PRACTICE")
        }
    }

    #[test]
    fn formulas() {
        let m = compute_metrics(&team(), 10.0, &four_weeks(), None, &HrThresholds::default());
        assert_eq!(m.fte_quote, 0.9);
        assert_eq!(m.fte_delta, -1.0);
        // 10 days over 10 people x 20 workdays
        assert_eq!(m.absence_rate_percent, 5.0);
        // 8640 min over 360 h x 60 x 4 weeks
        assert_eq!(m.overtime_rate_percent, 10.0);
        assert_eq!(m.labor_cost_ratio_percent, None);
        // quote at warn boundary is not below it; overtime at warn boundary is
        assert_eq!(m.overall_status, OverallStatus::Warning);
    }

    #[test]
    fn labor_cost_needs_positive_revenue() {
        let t = HrThresholds::default();
        let m = compute_metrics(&team(), 10.0, &four_weeks(), Some(200_000.0), &t);
        // 360 x 4.33 x 28 = 43646.4 EUR / 200000
        assert_eq!(m.labor_cost_ratio_percent, Some(21.8));
        let m = compute_metrics(&team(), 10.0, &four_weeks(), Some(0.0), &t);
        assert_eq!(m.labor_cost_ratio_percent, None);
    }

    #[test]
    fn zero_target_and_empty_group() {
        let empty = HrAggregatedGroupInput::empty("PRACTICE");
        let m = compute_metrics(&empty, 0.0, &four_weeks(), None, &HrThresholds::default());
        assert_eq!(m.fte_quote, 1.0);
        assert_eq!(m.absence_rate_percent, 0.0);
        assert_eq!(m.overtime_rate_percent, 0.0);
        assert_eq!(m.overall_status, OverallStatus::Ok);
    }

    #[test]
    fn critical_beats_warning() {
        let mut g = team();
        g.total_fte = 7.5;
        let m = compute_metrics(&g, 10.0, &four_weeks(), None, &HrThresholds::default());
        assert_eq!(m.fte_quote, 0.75);
        assert_eq!(m.overall_status, OverallStatus::Critical);
    }
}
