//! Forbidden field names and key normalization.
//!
//! Keys are compared after [`normalize_key`], so `staff_id`, `staffId`,
//! `Staff-ID` and `STAFFID` are the same field.

/// Which forbidden list a key fell into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForbiddenKind {
    /// Illegal at any depth of any structure.
    Identifier,
    /// Illegal inside HR analytics structures.
    PersonalData,
}

/// Identifier fragments matched anywhere in the key (`primaryStaffId` included).
const IDENTIFIER_FRAGMENTS: &[&str] = &[
    "staffid",
    "employeeid",
    "personid",
    "memberid",
    "mitarbeiterid",
    "personalnummer",
    "employeenumber",
    "staffnumber",
    "sozialversicherungsnummer",
    "versicherungsnummer",
    "socialsecuritynumber",
    "nationalid",
    "steueridentifikationsnummer",
];

/// Short identifiers matched only as the whole key.
const IDENTIFIER_EXACT: &[&str] = &["ssn", "svnr", "svnummer", "taxid", "steuerid", "userid", "personalnr"];

const PERSONAL_DATA_FRAGMENTS: &[&str] = &[
    "firstname",
    "lastname",
    "fullname",
    "givenname",
    "surname",
    "vorname",
    "nachname",
    "email",
    "phone",
    "telefon",
    "birthdate",
    "dateofbirth",
    "geburtsdatum",
    "geburtstag",
];

const PERSONAL_DATA_EXACT: &[&str] = &["name", "mail", "dob", "birthday", "handy", "mobile", "mobil"];

/// Lowercase, transliterate umlauts, drop everything but ASCII alphanumerics.
pub fn normalize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for ch in key.chars().flat_map(char::to_lowercase) {
        match ch {
            'ä' => out.push_str("ae"),
            'ö' => out.push_str("oe"),
            'ü' => out.push_str("ue"),
            'ß' => out.push_str("ss"),
            c if c.is_ascii_alphanumeric() => out.push(c),
            _ => {}
        }
    }
    out
}

/// Classify a raw key. `None` means the key is safe.
pub fn classify_key(key: &str) -> Option<ForbiddenKind> {
    let k = normalize_key(key);
    if IDENTIFIER_EXACT.contains(&k.as_str()) || IDENTIFIER_FRAGMENTS.iter().any(|f| k.contains(f)) {
        return Some(ForbiddenKind::Identifier);
    }
    if PERSONAL_DATA_EXACT.contains(&k.as_str())
        || PERSONAL_DATA_FRAGMENTS.iter().any(|f| k.contains(f))
    {
        return Some(ForbiddenKind::PersonalData);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_collapses_spellings() {
        assert_eq!(normalize_key("staff_id"), "staffid");
        assert_eq!(normalize_key("Staff-ID"), "staffid");
        assert_eq!(normalize_key("Geburtsdatum"), "geburtsdatum");
        assert_eq!(normalize_key("Größe"), "groesse");
    }

    #[test]
    fn identifiers_match_anywhere_in_key() {
        assert_eq!(classify_key("staffId"), Some(ForbiddenKind::Identifier));
        assert_eq!(classify_key("primary_employee_id"), Some(ForbiddenKind::Identifier));
        assert_eq!(classify_key("SSN"), Some(ForbiddenKind::Identifier));
        assert_eq!(classify_key("Sozialversicherungsnummer"), Some(ForbiddenKind::Identifier));
    }

    #[test]
    fn short_identifiers_only_match_whole_key() {
        // "businessName" contains "ssn" but is not an identifier
        assert_eq!(classify_key("businessName"), None);
    }

    #[test]
    fn personal_data_fields() {
        assert_eq!(classify_key("name"), Some(ForbiddenKind::PersonalData));
        assert_eq!(classify_key("lastName"), Some(ForbiddenKind::PersonalData));
        assert_eq!(classify_key("e-mail"), Some(ForbiddenKind::PersonalData));
        assert_eq!(classify_key("phoneNumber"), Some(ForbiddenKind::PersonalData));
        assert_eq!(classify_key("birth_date"), Some(ForbiddenKind::PersonalData));
    }

    #[test]
    fn aggregate_fields_are_safe() {
        for key in [
            "groupKey",
            "headcount",
            "totalFte",
            "totalContractedHoursPerWeek",
            "totalOvertimeMinutes",
            "absenceByType",
            "periodStart",
            "monthlyRevenue",
            "groupName",
        ] {
            assert_eq!(classify_key(key), None, "{key}");
        }
    }
}
