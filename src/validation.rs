//! Input validation for user data.

use crate::error::{Result, UserbaseError};

/// Maximum allowed length for a user name.
pub const MAX_NAME_LENGTH: usize = 255;

/// Maximum allowed length for an email address.
pub const MAX_EMAIL_LENGTH: usize = 255;

/// Maximum allowed length for a label name.
pub const MAX_LABEL_LENGTH: usize = 255;

/// Validates a user name.
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(UserbaseError::Validation("Name cannot be blank".to_string()));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(UserbaseError::Validation(format!(
            "Name exceeds maximum length of {} characters",
            MAX_NAME_LENGTH
        )));
    }
    Ok(())
}

/// Validates an email address: `local@domain`, one `@`, no whitespace.
pub fn validate_email(email: &str) -> Result<()> {
    if email.chars().count() > MAX_EMAIL_LENGTH {
        return Err(UserbaseError::Validation(format!(
            "Email exceeds maximum length of {} characters",
            MAX_EMAIL_LENGTH
        )));
    }
    if email.chars().any(char::is_whitespace) {
        return Err(UserbaseError::Validation(
            "Email cannot contain whitespace".to_string(),
        ));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(())
        }
        _ => Err(UserbaseError::Validation(format!(
            "Invalid email address: {}",
            email
        ))),
    }
}

/// Validates an optional email; absence is always valid.
pub fn validate_optional_email(email: Option<&str>) -> Result<()> {
    email.map_or(Ok(()), validate_email)
}

/// Validates a label name.
pub fn validate_label_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(UserbaseError::Validation(
            "Label name cannot be blank".to_string(),
        ));
    }
    if name.chars().count() > MAX_LABEL_LENGTH {
        return Err(UserbaseError::Validation(format!(
            "Label name exceeds maximum length of {} characters",
            MAX_LABEL_LENGTH
        )));
    }
    Ok(())
}

/// Parses a GraphQL identifier into a database row id.
pub fn parse_id(entity: &str, id: &str) -> Result<i64> {
    id.trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| UserbaseError::Validation(format!("Invalid {} id: {}", entity, id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name_blank() {
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
    }

    #[test]
    fn test_validate_name_valid() {
        assert!(validate_name("Bob").is_ok());
    }

    #[test]
    fn test_validate_name_too_long() {
        let long_name = "a".repeat(MAX_NAME_LENGTH + 1);
        assert!(validate_name(&long_name).is_err());
        assert!(validate_name(&"a".repeat(MAX_NAME_LENGTH)).is_ok());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("bob@x.com").is_ok());
        assert!(validate_email("bob").is_err());
        assert!(validate_email("@x.com").is_err());
        assert!(validate_email("bob@").is_err());
        assert!(validate_email("bob@x@y").is_err());
        assert!(validate_email("bob @x.com").is_err());
    }

    #[test]
    fn test_validate_optional_email() {
        assert!(validate_optional_email(None).is_ok());
        assert!(validate_optional_email(Some("a@x.com")).is_ok());
        assert!(validate_optional_email(Some("nope")).is_err());
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("User", "1").unwrap(), 1);
        assert_eq!(parse_id("User", " 42 ").unwrap(), 42);
        assert!(parse_id("User", "abc").is_err());
        assert!(parse_id("User", "0").is_err());
        assert!(parse_id("User", "-3").is_err());
    }
}
