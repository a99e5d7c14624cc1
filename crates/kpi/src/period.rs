//! Reporting period arithmetic.

use chrono::NaiveDate;

use crate::error::{KpiError, Result};

const DAYS_PER_WEEK: f64 = 7.0;

/// Calendar facts about one reporting period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodFrame {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Whole days, both ends inclusive.
    pub days: u32,
    pub weeks: f64,
    pub workdays: f64,
}

impl PeriodFrame {
    pub fn new(start: NaiveDate, end: NaiveDate, workdays_per_week: f64) -> Result<Self> {
        if end < start {
            return Err(KpiError::InvalidPeriod { start, end });
        }
        if !workdays_per_week.is_finite() || workdays_per_week <= 0.0 || workdays_per_week > DAYS_PER_WEEK {
            return Err(KpiError::InvalidInput(format!(
                "workdaysPerWeek must lie in (0, 7], got {workdays_per_week}"
            )));
        }
        let span = (end - start).num_days() + 1;
        let days = u32::try_from(span)
            .map_err(|_| KpiError::InvalidInput(format!("period of {span} days is too long")))?;
        let weeks = f64::from(days) / DAYS_PER_WEEK;
        Ok(Self {
            start,
            end,
            days,
            weeks,
            workdays: workdays_per_week * weeks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn inclusive_days() {
        let p = PeriodFrame::new(d(2026, 3, 1), d(2026, 3, 28), 5.0).unwrap();
        assert_eq!(p.days, 28);
        assert_eq!(p.weeks, 4.0);
        assert_eq!(p.workdays, 20.0);
    }

    #[test]
    fn single_day_period() {
        let p = PeriodFrame::new(d(2026, 1, 5), d(2026, 1, 5), 5.0).unwrap();
        assert_eq!(p.days, 1);
    }

    #[test]
    fn reversed_period_is_rejected() {
        assert!(matches!(
            PeriodFrame::new(d(2026, 2, 1), d(2026, 1, 1), 5.0),
            Err(KpiError::InvalidPeriod { .. })
        ));
    }

    #[test]
    fn workdays_per_week_bounds() {
        let (s, e) = (d(2026, 1, 1), d(2026, 1, 31));
        assert!(PeriodFrame::new(s, e, 0.0).is_err());
        assert!(PeriodFrame::new(s, e, 8.0).is_err());
        assert!(PeriodFrame::new(s, e, f64::NAN).is_err());
        assert!(PeriodFrame::new(s, e, 4.5).is_ok());
    }
}
