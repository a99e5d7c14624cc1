use chrono::NaiveDate;

use praxis_compliance::ComplianceError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KpiError {
    /// The input failed the compliance gate. Nothing was computed.
    #[error(transparent)]
    Compliance(#[from] ComplianceError),

    #[error("period end {end} lies before period start {start}")]
    InvalidPeriod { start: NaiveDate, end: NaiveDate },

    #[error("invalid HR input: {0}")]
    InvalidInput(String),
}

impl KpiError {
    /// Whether the caller sent something unacceptable (HTTP 400 class).
    pub fn is_client_error(&self) -> bool {
        match self {
            KpiError::Compliance(e) => e.is_client_error(),
            KpiError::InvalidPeriod { .. } | KpiError::InvalidInput(_) => true,
        }
    }
}

pub type Result<T> = std::result::Result<T, KpiError>;
