//! Email address validation and normalization
//!
//! Emails are stored and compared in lowercase so lookups are
//! case-insensitive without relying on a database collation.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Maximum length for an email address (matches `VARCHAR(255)`)
const MAX_EMAIL_LEN: usize = 255;

/// One `@`, no whitespace, something on both sides.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+$").expect("invalid email regex"));

/// Validated, lowercased email address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Create a new email, trimming and lowercasing it.
    ///
    /// # Example
    /// ```
    /// use lightbnb_db::models::Email;
    ///
    /// let email = Email::new(" Tristan@Example.COM ").unwrap();
    /// assert_eq!(email.as_str(), "tristan@example.com");
    /// assert!(Email::new("not-an-email").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let normalized = Self::normalize(s);

        if normalized.is_empty() {
            return Err(ValidationError::Missing { field: "email" });
        }

        if normalized.len() > MAX_EMAIL_LEN {
            return Err(ValidationError::TooLong {
                field: "email",
                max: MAX_EMAIL_LEN,
            });
        }

        if !EMAIL_RE.is_match(&normalized) {
            return Err(ValidationError::MalformedEmail { email: normalized });
        }

        Ok(Self(normalized))
    }

    /// Lookup form of an arbitrary string: trimmed and lowercased, no validation.
    pub fn normalize(s: &str) -> String {
        s.trim().to_lowercase()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Email {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}
