use praxis_compliance::ComplianceError;
use praxis_kpi::KpiError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AlertError {
    /// An alert template produced text that refers to an individual.
    #[error(transparent)]
    Compliance(#[from] ComplianceError),

    #[error(transparent)]
    Kpi(#[from] KpiError),

    #[error("invalid thresholds: {}", .0.join("; "))]
    InvalidThresholds(Vec<String>),
}

impl AlertError {
    pub fn is_client_error(&self) -> bool {
        match self {
            // alert text is generated here, so a text violation is ours
            AlertError::Compliance(ComplianceError::NonCompliantText { .. }) => false,
            AlertError::Compliance(e) => e.is_client_error(),
            AlertError::Kpi(e) => e.is_client_error(),
            AlertError::InvalidThresholds(_) => true,
        }
    }
}

pub type Result<T> = std::result::Result<T, AlertError>;
