//! Nickname Value Object
//!
//! Unique public display name of a user.

use std::fmt;
use thiserror::Error;

/// Minimum nickname length (code points)
pub const MIN_NICKNAME_LENGTH: usize = 2;

/// Maximum nickname length (code points)
pub const MAX_NICKNAME_LENGTH: usize = 32;

/// Nickname validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NicknameError {
    #[error("Nickname must be at least {MIN_NICKNAME_LENGTH} characters")]
    TooShort,

    #[error("Nickname must be at most {MAX_NICKNAME_LENGTH} characters")]
    TooLong,

    #[error("Nickname contains invalid characters")]
    InvalidCharacter,
}

/// Validated nickname
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Nickname(String);

impl Nickname {
    /// Validate a nickname
    ///
    /// Leading/trailing whitespace is trimmed. Control characters are
    /// rejected; any other printable character (including non-ASCII)
    /// is allowed.
    pub fn new(raw: &str) -> Result<Self, NicknameError> {
        let trimmed = raw.trim();

        let char_count = trimmed.chars().count();
        if char_count < MIN_NICKNAME_LENGTH {
            return Err(NicknameError::TooShort);
        }
        if char_count > MAX_NICKNAME_LENGTH {
            return Err(NicknameError::TooLong);
        }

        if trimmed.chars().any(char::is_control) {
            return Err(NicknameError::InvalidCharacter);
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Restore from a trusted database value
    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Nickname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_nicknames() {
        assert!(Nickname::new("jae").is_ok());
        assert!(Nickname::new("  spaced  ").is_ok());
        assert!(Nickname::new("ニックネーム").is_ok());
    }

    #[test]
    fn test_length_bounds() {
        assert_eq!(Nickname::new("a").unwrap_err(), NicknameError::TooShort);
        let long = "x".repeat(MAX_NICKNAME_LENGTH + 1);
        assert_eq!(Nickname::new(&long).unwrap_err(), NicknameError::TooLong);
    }

    #[test]
    fn test_rejects_control_characters() {
        assert_eq!(
            Nickname::new("ab\u{0000}cd").unwrap_err(),
            NicknameError::InvalidCharacter
        );
    }
}
