//! Tax identification number (NIF) type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`TaxId`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum TaxIdError {
    /// The input is shorter than the minimum length.
    #[error("tax id must be at least {min} characters")]
    TooShort {
        /// Minimum required length.
        min: usize,
    },
    /// The input contains characters other than letters and digits.
    #[error("tax id may only contain letters and digits")]
    InvalidCharacter,
}

/// A fiscal identification number (NIF) for a pharmacy or deposit.
///
/// The platform registers companies, not individuals, so the NIF is the
/// primary legal identifier of an entity. Validation here is structural
/// only; uniqueness is enforced by the backend at registration time.
///
/// ## Constraints
///
/// - At least 10 characters
/// - Letters and digits only
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct TaxId(String);

impl TaxId {
    /// Minimum length of a tax id.
    pub const MIN_LENGTH: usize = 10;

    /// Parse a `TaxId` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is shorter than [`Self::MIN_LENGTH`]
    /// or contains non-alphanumeric characters.
    pub fn parse(s: &str) -> Result<Self, TaxIdError> {
        let trimmed = s.trim();

        if trimmed.len() < Self::MIN_LENGTH {
            return Err(TaxIdError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }

        if !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(TaxIdError::InvalidCharacter);
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the tax id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `TaxId` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for TaxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TaxId {
    type Err = TaxIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for TaxId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert!(TaxId::parse("5417012345").is_ok());
        assert!(TaxId::parse("AO541701234567").is_ok());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let nif = TaxId::parse("  5417012345  ").unwrap();
        assert_eq!(nif.as_str(), "5417012345");
    }

    #[test]
    fn test_parse_too_short() {
        assert!(matches!(
            TaxId::parse("123456789"),
            Err(TaxIdError::TooShort { min: 10 })
        ));
        assert!(matches!(TaxId::parse(""), Err(TaxIdError::TooShort { .. })));
    }

    #[test]
    fn test_parse_invalid_characters() {
        assert!(matches!(
            TaxId::parse("54170-12345"),
            Err(TaxIdError::InvalidCharacter)
        ));
        assert!(matches!(
            TaxId::parse("54170 12345"),
            Err(TaxIdError::InvalidCharacter)
        ));
    }

    #[test]
    fn test_serde_roundtrip() {
        let nif = TaxId::parse("5417012345").unwrap();
        let json = serde_json::to_string(&nif).unwrap();
        assert_eq!(json, "\"5417012345\"");

        let parsed: TaxId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, nif);
    }
}
