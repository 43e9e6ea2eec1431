//! Email Value Object
//!
//! Validated, normalized email address.

use std::fmt;
use thiserror::Error;

/// Maximum total length (RFC 5321)
const MAX_EMAIL_LENGTH: usize = 254;

/// Email validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailError {
    #[error("Email cannot be empty")]
    Empty,

    #[error("Email must be at most {MAX_EMAIL_LENGTH} characters")]
    TooLong,

    #[error("Email format is invalid")]
    InvalidFormat,
}

/// Validated email address
///
/// Normalized to lowercase; uniqueness comparisons are done on the
/// normalized form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Validate and normalize an email address
    pub fn new(raw: &str) -> Result<Self, EmailError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EmailError::Empty);
        }
        if trimmed.chars().count() > MAX_EMAIL_LENGTH {
            return Err(EmailError::TooLong);
        }

        // Minimal structural check: one '@', non-empty local part,
        // domain with at least one dot and no whitespace.
        let (local, domain) = trimmed.split_once('@').ok_or(EmailError::InvalidFormat)?;
        if local.is_empty()
            || domain.is_empty()
            || !domain.contains('.')
            || domain.starts_with('.')
            || domain.ends_with('.')
            || trimmed.chars().any(char::is_whitespace)
            || domain.contains('@')
        {
            return Err(EmailError::InvalidFormat);
        }

        Ok(Self(trimmed.to_lowercase()))
    }

    /// Restore from a trusted database value
    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(Email::new("a@x.com").is_ok());
        assert!(Email::new("  padded@example.org  ").is_ok());
        assert!(Email::new("first.last@sub.example.co").is_ok());
    }

    #[test]
    fn test_normalizes_to_lowercase() {
        let email = Email::new("User@Example.COM").unwrap();
        assert_eq!(email.as_str(), "user@example.com");
    }

    #[test]
    fn test_invalid_emails() {
        assert_eq!(Email::new("").unwrap_err(), EmailError::Empty);
        assert_eq!(Email::new("no-at-sign").unwrap_err(), EmailError::InvalidFormat);
        assert_eq!(Email::new("@x.com").unwrap_err(), EmailError::InvalidFormat);
        assert_eq!(Email::new("a@nodot").unwrap_err(), EmailError::InvalidFormat);
        assert_eq!(Email::new("a b@x.com").unwrap_err(), EmailError::InvalidFormat);
        assert_eq!(Email::new("a@@x.com").unwrap_err(), EmailError::InvalidFormat);
    }
}
