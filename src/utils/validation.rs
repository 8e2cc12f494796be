//! Field rules used by `#[validate(custom(...))]` attributes.

use validator::{ValidateEmail, ValidationError};

use crate::domain::slug::slugify;
use crate::domain::Password;

fn rule(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

/// Rejects strings that are empty after trimming.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(rule("blank", "must not be blank"));
    }
    Ok(())
}

/// Display names must be non-blank and yield a non-empty slug.
pub fn sluggable(value: &str) -> Result<(), ValidationError> {
    not_blank(value)?;
    if slugify(value).is_empty() {
        return Err(rule("slug", "must contain at least one letter or digit"));
    }
    Ok(())
}

pub fn valid_email(value: &str) -> Result<(), ValidationError> {
    if !value.trim().validate_email() {
        return Err(rule("email", "Invalid email"));
    }
    Ok(())
}

pub fn strong_password(value: &str) -> Result<(), ValidationError> {
    Password::check_strength(value).map_err(|message| rule("password", message))
}

/// Trim an optional text field; blank becomes `None`.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_blank() {
        assert!(not_blank("  ").is_err());
        assert!(not_blank(" Toys ").is_ok());
    }

    #[test]
    fn test_sluggable_needs_letters_or_digits() {
        assert!(sluggable("Ração Seca").is_ok());
        assert!(sluggable("4x4").is_ok());
        assert_eq!(sluggable("   ").unwrap_err().code, "blank");
        assert_eq!(sluggable("!!!").unwrap_err().code, "slug");
        assert_eq!(sluggable(" *** - ").unwrap_err().code, "slug");
    }

    #[test]
    fn test_valid_email_trims() {
        assert!(valid_email(" admin@shop.test ").is_ok());
        assert!(valid_email("not-an-email").is_err());
    }

    #[test]
    fn test_strong_password_message() {
        let err = strong_password("weakpass").unwrap_err();
        assert_eq!(
            err.message.as_deref(),
            Some("Password must contain at least one uppercase letter")
        );
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text(Some("   ".into())), None);
        assert_eq!(optional_text(Some(" Dry food ".into())), Some("Dry food".into()));
        assert_eq!(optional_text(None), None);
    }
}
