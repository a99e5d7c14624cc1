//! Privacy gate for HR analytics.
//!
//! Every HR computation passes through this crate first: the structural scan
//! rejects per-person data, k-anonymity decides what may be released, group
//! keys are mapped onto a closed whitelist, and generated text is linted.
//! All checks fail closed with a [`ComplianceError`].

pub mod error;
pub mod fields;
mod fuzzy;
pub mod group_key;
pub mod guard;
pub mod kanon;
pub mod text;
pub mod validation;

pub use error::{ComplianceError, Result};
pub use group_key::{sanitize_group_key, ALLOWED_GROUP_KEYS, CATCH_ALL_GROUP_KEY};
pub use guard::{
    assert_no_identifiers, assert_no_person_level, assert_serializable_no_person_level,
    decode_practice_input,
};
pub use kanon::{
    enforce_k_anonymity, filter_and_aggregate_by_k_anonymity, validate_k_min, KAnonymityVerdict,
    KFilterOutcome,
};
pub use text::{assert_all_text_compliance, assert_text_compliance};
pub use validation::{
    validate_aggregated_input, validate_thresholds, ValidationError, ValidationResult,
    ValidationWarning,
};

/// Version stamped into every snapshot audit.
pub const COMPLIANCE_VERSION: &str = concat!("praxis-compliance/", env!("CARGO_PKG_VERSION"));

/// Legal basis recorded in snapshot audits.
pub const LEGAL_BASIS: &str =
    "Art. 88 DSGVO i.V.m. § 26 BDSG: Beschaeftigtendaten ausschliesslich aggregiert und k-anonym";
