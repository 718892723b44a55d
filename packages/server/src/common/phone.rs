//! Canonical (E.164-style) phone numbers.
//!
//! Every lookup and write keys on the canonical form, so `+1 (555) 000-1111`
//! and `15550001111` resolve to the same identity and the same OTP challenge.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

const MIN_DIGITS: usize = 7;
const MAX_DIGITS: usize = 15;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PhoneError {
    #[error("phone number is required")]
    Empty,

    #[error("phone number may only contain digits after the leading '+'")]
    InvalidCharacter,

    #[error("phone number must have between 7 and 15 digits")]
    InvalidLength,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(try_from = "String", into = "String")]
#[sqlx(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Normalize user input into `+<digits>`.
    ///
    /// Separators (space, dash, dot, parentheses) are dropped, an international
    /// `00` prefix becomes `+`, and a missing `+` is added.
    pub fn parse(input: &str) -> Result<Self, PhoneError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(PhoneError::Empty);
        }

        let compact: String = trimmed
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
            .collect();

        let digits = if let Some(rest) = compact.strip_prefix('+') {
            rest
        } else if let Some(rest) = compact.strip_prefix("00") {
            rest
        } else {
            compact.as_str()
        };

        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(PhoneError::InvalidCharacter);
        }
        if !(MIN_DIGITS..=MAX_DIGITS).contains(&digits.len()) {
            return Err(PhoneError::InvalidLength);
        }

        Ok(Self(format!("+{}", digits)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Form safe for info-level logs: `+1555***1111`.
    pub fn masked(&self) -> String {
        let len = self.0.len();
        if len <= 8 {
            return format!("{}***", &self.0[..2]);
        }
        format!("{}***{}", &self.0[..5], &self.0[len - 4..])
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = PhoneError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PhoneNumber> for String {
    fn from(phone: PhoneNumber) -> Self {
        phone.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_canonical() {
        let phone = PhoneNumber::parse("+15550001111").unwrap();
        assert_eq!(phone.as_str(), "+15550001111");
    }

    #[test]
    fn test_missing_plus_is_added() {
        let phone = PhoneNumber::parse("15550001111").unwrap();
        assert_eq!(phone.as_str(), "+15550001111");
    }

    #[test]
    fn test_separators_are_stripped() {
        let phone = PhoneNumber::parse(" +1 (555) 000-1111 ").unwrap();
        assert_eq!(phone.as_str(), "+15550001111");

        let dotted = PhoneNumber::parse("1.555.000.1111").unwrap();
        assert_eq!(dotted, phone);
    }

    #[test]
    fn test_international_prefix() {
        let phone = PhoneNumber::parse("00447700900123").unwrap();
        assert_eq!(phone.as_str(), "+447700900123");
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(PhoneNumber::parse("   "), Err(PhoneError::Empty));
    }

    #[test]
    fn test_rejects_letters() {
        assert_eq!(
            PhoneNumber::parse("+1555CALLNOW"),
            Err(PhoneError::InvalidCharacter)
        );
    }

    #[test]
    fn test_rejects_bad_length() {
        assert_eq!(PhoneNumber::parse("+12345"), Err(PhoneError::InvalidLength));
        assert_eq!(
            PhoneNumber::parse("+1234567890123456"),
            Err(PhoneError::InvalidLength)
        );
    }

    #[test]
    fn test_masked() {
        let phone = PhoneNumber::parse("+15550001111").unwrap();
        assert_eq!(phone.masked(), "+1555***1111");
    }

    #[test]
    fn test_deserialize_normalizes() {
        let phone: PhoneNumber = serde_json::from_str("\"1 555 000 1111\"").unwrap();
        assert_eq!(phone.as_str(), "+15550001111");
        assert!(serde_json::from_str::<PhoneNumber>("\"abc\"").is_err());
    }
}
