// ABOUTME: Field constraint checks for name record candidates, applied on create and update.
// ABOUTME: Only fields present in the candidate are checked, so partial updates validate cleanly.

use thiserror::Error;

use crate::model::NameRecordFields;

pub const NAME_MIN_LEN: usize = 2;
pub const NAME_MAX_LEN: usize = 20;
pub const GENDERS: [&str; 3] = ["M", "F", "B"];
pub const ERAS: [&str; 2] = ["Modern", "Classic"];

/// A rejected candidate. The display text is returned to the client verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("'{0}' is required")]
    Missing(&'static str),

    #[error("Supplied Name '{0}' is less than 2 or longer than 20 characters")]
    NameLength(String),

    #[error("Please supply gender as M for Male, F for Female, or B for Both. You supplied {0}")]
    Gender(String),

    #[error("Please supply era as Modern or Classic. You supplied {0}")]
    Era(String),
}

/// Check the present fields of a candidate, stopping at the first failure.
/// Order: name length, gender code, era.
pub fn validate(candidate: &NameRecordFields) -> Result<(), ValidationError> {
    if let Some(name) = &candidate.name {
        let len = name.chars().count();
        if !(NAME_MIN_LEN..=NAME_MAX_LEN).contains(&len) {
            tracing::warn!(name = %name, len, "rejected name outside length bounds");
            return Err(ValidationError::NameLength(name.clone()));
        }
    }

    if let Some(gender) = &candidate.gender {
        if !GENDERS.contains(&gender.as_str()) {
            tracing::warn!(gender = %gender, "rejected unknown gender code");
            return Err(ValidationError::Gender(gender.clone()));
        }
    }

    if let Some(era) = &candidate.era {
        if !ERAS.contains(&era.as_str()) {
            tracing::warn!(era = %era, "rejected unknown era");
            return Err(ValidationError::Era(era.clone()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: Option<&str>, gender: Option<&str>, era: Option<&str>) -> NameRecordFields {
        NameRecordFields {
            name: name.map(str::to_string),
            gender: gender.map(str::to_string),
            era: era.map(str::to_string),
            recent: None,
        }
    }

    #[test]
    fn accepts_valid_record() {
        assert!(validate(&candidate(Some("Sam"), Some("B"), Some("Modern"))).is_ok());
        assert!(validate(&candidate(Some("Jo"), Some("M"), Some("Classic"))).is_ok());
        assert!(validate(&candidate(Some("abcdefghijklmnopqrst"), Some("F"), Some("Modern"))).is_ok());
    }

    #[test]
    fn rejects_name_of_one_or_twenty_one_chars() {
        let err = validate(&candidate(Some("A"), Some("M"), Some("Modern"))).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Supplied Name 'A' is less than 2 or longer than 20 characters"
        );

        let long = "a".repeat(21);
        let err = validate(&candidate(Some(long.as_str()), Some("M"), Some("Modern"))).unwrap_err();
        assert_eq!(err, ValidationError::NameLength(long));
    }

    #[test]
    fn name_length_counts_characters_not_bytes() {
        // 10 characters, 20 bytes
        let name = "éééééééééé";
        assert!(validate(&candidate(Some(name), None, None)).is_ok());
    }

    #[test]
    fn rejects_unknown_gender_echoing_value() {
        let err = validate(&candidate(Some("Sam"), Some("X"), Some("Modern"))).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please supply gender as M for Male, F for Female, or B for Both. You supplied X"
        );
    }

    #[test]
    fn rejects_unknown_era_echoing_value() {
        let err = validate(&candidate(Some("Sam"), Some("M"), Some("Future"))).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please supply era as Modern or Classic. You supplied Future"
        );
    }

    #[test]
    fn first_failure_wins() {
        let err = validate(&candidate(Some("A"), Some("X"), Some("Future"))).unwrap_err();
        assert!(matches!(err, ValidationError::NameLength(_)));

        let err = validate(&candidate(Some("Sam"), Some("X"), Some("Future"))).unwrap_err();
        assert!(matches!(err, ValidationError::Gender(_)));
    }

    #[test]
    fn absent_fields_are_not_checked() {
        assert!(validate(&candidate(None, None, None)).is_ok());
        assert!(validate(&candidate(None, Some("F"), None)).is_ok());
        assert!(validate(&candidate(None, None, Some("Classic"))).is_ok());
        assert!(validate(&candidate(None, None, Some("Bronze"))).is_err());
    }
}
