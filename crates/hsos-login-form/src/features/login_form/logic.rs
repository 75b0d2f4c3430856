//! Client-side field validation mirroring `required` + `type=email|password` inputs.
//!
//! # Design
//! - Format checks only; the provider decides whether credentials are correct.
//! - The email grammar follows the HTML `type=email` valid-address rule.

/// Why a field failed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldError {
    /// Required field is empty.
    Missing,
    /// Value does not match the field type.
    Malformed,
}

/// Validation state of a single input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FieldValidity {
    /// Not validated since the last edit.
    #[default]
    Unchecked,
    /// Passed validation.
    Valid,
    /// Failed validation.
    Invalid(FieldError),
}

impl FieldValidity {
    /// Whether the inline invalid indicator should show.
    #[must_use]
    pub const fn is_invalid(self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    fn from_result(result: Result<(), FieldError>) -> Self {
        match result {
            Ok(()) => Self::Valid,
            Err(err) => Self::Invalid(err),
        }
    }
}

/// Validate the identifier field (required, email).
#[must_use]
pub fn validate_email(value: &str) -> FieldValidity {
    FieldValidity::from_result(check_email(value))
}

/// Validate the secret field (required).
#[must_use]
pub fn validate_password(value: &str) -> FieldValidity {
    if value.is_empty() {
        FieldValidity::Invalid(FieldError::Missing)
    } else {
        FieldValidity::Valid
    }
}

fn check_email(value: &str) -> Result<(), FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FieldError::Missing);
    }
    let (local, domain) = value.split_once('@').ok_or(FieldError::Malformed)?;
    if local.is_empty() || !local.chars().all(is_local_char) {
        return Err(FieldError::Malformed);
    }
    if domain.is_empty() || !domain.split('.').all(is_domain_label) {
        return Err(FieldError::Malformed);
    }
    Ok(())
}

fn is_local_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || ".!#$%&'*+/=?^_`{|}~-".contains(c)
}

fn is_domain_label(label: &str) -> bool {
    (1..=63).contains(&label.len())
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !label.starts_with('-')
        && !label.ends_with('-')
}

#[cfg(test)]
mod tests {
    use super::{FieldError, FieldValidity, validate_email, validate_password};

    #[test]
    fn accepts_html_valid_addresses() {
        for value in [
            "student@hs-osnabrueck.de",
            "first.last+tag@example.org",
            "x@localhost",
            "  padded@example.com ",
        ] {
            assert_eq!(validate_email(value), FieldValidity::Valid, "{value}");
        }
    }

    #[test]
    fn rejects_missing_and_malformed_addresses() {
        assert_eq!(
            validate_email(""),
            FieldValidity::Invalid(FieldError::Missing)
        );
        assert_eq!(
            validate_email("   "),
            FieldValidity::Invalid(FieldError::Missing)
        );
        for value in [
            "no-at-sign",
            "@example.org",
            "user@",
            "user@-bad.org",
            "user@bad-.org",
            "user@exa mple.org",
            "us er@example.org",
            "user@example..org",
            "a@b@c",
        ] {
            assert_eq!(
                validate_email(value),
                FieldValidity::Invalid(FieldError::Malformed),
                "{value}"
            );
        }
    }

    #[test]
    fn password_is_only_required() {
        assert!(validate_password("").is_invalid());
        assert_eq!(validate_password(" "), FieldValidity::Valid);
        assert!(!FieldValidity::Unchecked.is_invalid());
    }
}
