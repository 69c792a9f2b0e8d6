//! Burkina Faso phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Country calling code for Burkina Faso.
pub const COUNTRY_CODE: &str = "+226";

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone cannot be empty")]
    Empty,
    /// The subscriber number does not have exactly 8 digits.
    #[error("phone must have 8 digits after the country code")]
    WrongLength,
    /// The subscriber number contains a non-digit.
    #[error("phone must contain only digits")]
    NotNumeric,
    /// Mobile numbers start with 6 or 7.
    #[error("phone must start with 6 or 7")]
    InvalidPrefix,
}

/// A Burkinabè mobile number, stored as its 8-digit subscriber part.
///
/// Spaces are ignored on input and the `+226` prefix is optional.
///
/// ```
/// use lca_tv_core::Phone;
///
/// let phone = Phone::parse("+226 70 12 34 56").unwrap();
/// assert_eq!(phone.to_string(), "+226 70 12 34 56");
/// assert!(Phone::parse("50123456").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Parse a phone number.
    ///
    /// # Errors
    ///
    /// Returns an error unless the input, with spaces removed, is an optional
    /// `+226` followed by 8 digits starting with 6 or 7.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return Err(PhoneError::Empty);
        }

        let subscriber = compact.strip_prefix(COUNTRY_CODE).unwrap_or(&compact);

        if !subscriber.chars().all(|c| c.is_ascii_digit()) {
            return Err(PhoneError::NotNumeric);
        }
        if subscriber.len() != 8 {
            return Err(PhoneError::WrongLength);
        }
        if !subscriber.starts_with(['6', '7']) {
            return Err(PhoneError::InvalidPrefix);
        }

        Ok(Self(subscriber.to_owned()))
    }

    /// Returns true if the input would parse as a phone number.
    #[must_use]
    pub fn is_valid(s: &str) -> bool {
        Self::parse(s).is_ok()
    }

    /// The 8-digit subscriber number.
    #[must_use]
    pub fn subscriber(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(COUNTRY_CODE)?;
        for pair in self.0.as_bytes().chunks(2) {
            f.write_str(" ")?;
            f.write_str(std::str::from_utf8(pair).map_err(|_| fmt::Error)?)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_local_and_international() {
        assert_eq!(Phone::parse("70123456").unwrap().subscriber(), "70123456");
        assert_eq!(
            Phone::parse("+22665123456").unwrap().subscriber(),
            "65123456"
        );
        assert_eq!(
            Phone::parse("+226 76 00 11 22").unwrap().subscriber(),
            "76001122"
        );
    }

    #[test]
    fn test_parse_rejects_bad_numbers() {
        assert_eq!(Phone::parse(""), Err(PhoneError::Empty));
        assert_eq!(Phone::parse("7012345"), Err(PhoneError::WrongLength));
        assert_eq!(Phone::parse("701234567"), Err(PhoneError::WrongLength));
        assert_eq!(Phone::parse("50123456"), Err(PhoneError::InvalidPrefix));
        assert_eq!(Phone::parse("70-12-34-56"), Err(PhoneError::NotNumeric));
        assert_eq!(Phone::parse("+33612345678"), Err(PhoneError::NotNumeric));
    }

    #[test]
    fn test_display_groups_pairs() {
        let phone = Phone::parse("70123456").unwrap();
        assert_eq!(phone.to_string(), "+226 70 12 34 56");
    }
}
