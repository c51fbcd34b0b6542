//! Owner identifier type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`OwnerId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OwnerIdError {
    /// The input string is empty or only whitespace.
    #[error("owner id cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("owner id must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// The caller-supplied identifier that scopes every stored record.
///
/// The tracker has no account system: whatever the client sends in the
/// `x-user-id` header is trusted as-is. The only checks are that the value is
/// not blank and fits the column.
///
/// ## Examples
///
/// ```
/// use waifu_tracker_core::OwnerId;
///
/// assert!(OwnerId::parse("GGO-4821").is_ok());
/// assert_eq!(OwnerId::parse("  SAO-1234 ").map(|o| o.to_string()).as_deref(), Ok("SAO-1234"));
///
/// assert!(OwnerId::parse("").is_err());
/// assert!(OwnerId::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    /// Maximum length of an owner id.
    pub const MAX_LENGTH: usize = 128;

    /// Parse an `OwnerId`, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty or longer than
    /// [`OwnerId::MAX_LENGTH`].
    pub fn parse(s: &str) -> Result<Self, OwnerIdError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(OwnerIdError::Empty);
        }

        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(OwnerIdError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the owner id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for OwnerId {
    type Err = OwnerIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for OwnerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_whitespace() {
        let owner = OwnerId::parse("\tALO-9001\n").unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(owner.as_str(), "ALO-9001");
    }

    #[test]
    fn test_parse_rejects_blank() {
        assert_eq!(OwnerId::parse(""), Err(OwnerIdError::Empty));
        assert_eq!(OwnerId::parse("   "), Err(OwnerIdError::Empty));
    }

    #[test]
    fn test_parse_rejects_too_long() {
        let long = "x".repeat(OwnerId::MAX_LENGTH + 1);
        assert_eq!(
            OwnerId::parse(&long),
            Err(OwnerIdError::TooLong {
                max: OwnerId::MAX_LENGTH
            })
        );
    }

    #[test]
    fn test_parse_accepts_max_length() {
        let max = "x".repeat(OwnerId::MAX_LENGTH);
        assert!(OwnerId::parse(&max).is_ok());
    }

    #[test]
    fn test_from_str() {
        let owner: OwnerId = "UNIT-1000".parse().unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(owner.to_string(), "UNIT-1000");
    }
}
