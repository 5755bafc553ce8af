//! User records

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Email, ValidationError};

/// Maximum length for a display name (matches `VARCHAR(255)`)
const MAX_NAME_LEN: usize = 255;

/// User record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    /// Password hash. Never a plaintext password, never serialized out.
    #[serde(skip_serializing, default)]
    pub password: String,
}

/// Validated input for `add_user`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: Email,
    pub password: String,
}

impl NewUser {
    /// Build a new user, validating the name and normalizing the email.
    pub fn new(
        name: impl Into<String>,
        email: &str,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Missing { field: "name" });
        }
        if trimmed.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "name",
                max: MAX_NAME_LEN,
            });
        }

        let password = password.into();
        if password.is_empty() {
            return Err(ValidationError::Missing { field: "password" });
        }

        Ok(Self {
            name: trimmed.to_owned(),
            email: Email::new(email)?,
            password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_normalized_email() {
        let user = NewUser::new(" Devin Sanders ", "Devin@Sanders.CA", "$2a$10$hash").unwrap();
        assert_eq!(user.name, "Devin Sanders");
        assert_eq!(user.email.as_str(), "devin@sanders.ca");
    }

    #[test]
    fn rejects_blank_name() {
        let err = NewUser::new("  ", "a@b.c", "hash").unwrap_err();
        assert_eq!(err, ValidationError::Missing { field: "name" });
    }

    #[test]
    fn rejects_empty_password() {
        let err = NewUser::new("Eva", "eva@b.c", "").unwrap_err();
        assert_eq!(err, ValidationError::Missing { field: "password" });
    }

    #[test]
    fn serialized_user_omits_password() {
        let user = User {
            id: 1,
            name: "Devin Sanders".into(),
            email: "tristanjacobs@gmail.com".into(),
            password: "$2a$10$hash".into(),
        };
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["email"], "tristanjacobs@gmail.com");
        assert!(value.get("password").is_none());
    }

    #[test]
    fn propagates_email_errors() {
        let err = NewUser::new("Eva", "eva", "hash").unwrap_err();
        assert_eq!(
            err,
            ValidationError::MalformedEmail {
                email: "eva".into()
            }
        );
    }
}
