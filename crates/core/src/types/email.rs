//! Email address type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Email`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum EmailError {
    /// The input string is empty.
    #[error("email cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("email must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input is not shaped like `local@domain`.
    #[error("email must be of the form local@domain")]
    Malformed,
}

/// An email address.
///
/// Provides structural validation only: a non-empty local part and domain
/// separated by a single `@`, within the RFC 5321 length limit. Deliverability
/// is someone else's problem.
///
/// ## Examples
///
/// ```
/// use cartloom_core::Email;
///
/// assert!(Email::parse("vendor@example.com").is_ok());
/// assert!(Email::parse("no-at-symbol").is_err());
/// assert!(Email::parse("@example.com").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Maximum length of an email address (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Parse an `Email` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than 254 characters,
    /// or missing a non-empty local part or domain around a single `@`.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        if s.is_empty() {
            return Err(EmailError::Empty);
        }
        if s.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        let Some((local, domain)) = s.split_once('@') else {
            return Err(EmailError::Malformed);
        };
        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return Err(EmailError::Malformed);
        }
        Ok(Self(s.to_owned()))
    }

    /// Get the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_shapes() {
        for s in ["user@example.com", "user.name+tag@domain.co.uk", "a@b"] {
            assert!(Email::parse(s).is_ok(), "should accept {s}");
        }
    }

    #[test]
    fn rejects_structural_garbage() {
        for s in ["", "no-at-symbol", "@domain.com", "user@", "a@b@c"] {
            assert!(Email::parse(s).is_err(), "should reject {s}");
        }
    }

    #[test]
    fn rejects_overlong_input() {
        let s = format!("{}@example.com", "a".repeat(250));
        assert!(matches!(
            Email::parse(&s),
            Err(EmailError::TooLong { max: 254 })
        ));
    }

    #[test]
    fn display_round_trips() {
        let email = Email::parse("vendor@example.com").unwrap();
        assert_eq!(email.to_string(), "vendor@example.com");
        assert_eq!(email.as_str(), "vendor@example.com");
    }
}
