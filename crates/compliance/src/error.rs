//! Error type for privacy-compliance violations.

/// A hard compliance rejection. Never downgraded to a warning.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ComplianceError {
    /// A per-person identifier (staff/employee/person id, national id) was found.
    #[error("forbidden identifier field '{field}' at {path}")]
    ForbiddenIdentifier { path: String, field: String },

    /// Personal data (name, email, phone, birth date) inside an HR analytics structure.
    #[error("personal data field '{field}' is not allowed in HR analytics input (at {path})")]
    PersonalDataField { path: String, field: String },

    /// k-anonymity floor configured below the absolute minimum.
    #[error("kMin {k_min} is below the absolute floor of {floor}")]
    KMinBelowFloor { k_min: u32, floor: u32 },

    /// Text addresses or describes an individual.
    #[error("non-compliant text ({reason}): '{excerpt}'")]
    NonCompliantText { reason: String, excerpt: String },

    /// Pre-flight validation of aggregated input failed.
    #[error("aggregated input rejected: {}", .errors.join("; "))]
    InvalidAggregate { errors: Vec<String> },

    /// Input could not be decoded into the typed HR model.
    #[error("malformed HR input: {0}")]
    Malformed(String),

    /// Internal failure while preparing a value for the scan.
    #[error("failed to serialize value for compliance scan: {0}")]
    Serialization(String),
}

impl ComplianceError {
    /// Whether the caller sent something unacceptable (HTTP 400 class),
    /// as opposed to an internal failure.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ComplianceError::Serialization(_))
    }
}

/// Result alias for compliance operations.
pub type Result<T> = std::result::Result<T, ComplianceError>;
