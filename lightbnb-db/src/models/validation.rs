//! Rejections raised while building `NewUser` and `Email`

use std::fmt;

/// Why user-supplied account data was refused before reaching the database
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required account field was blank after trimming
    Missing { field: &'static str },

    /// Longer than the `VARCHAR` column that stores it
    TooLong { field: &'static str, max: usize },

    /// Not of the form `local@domain`; holds the normalized input
    MalformedEmail { email: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "{} is required", field),
            Self::TooLong { field, max } => {
                write!(f, "{} is longer than {} characters", field, max)
            }
            Self::MalformedEmail { email } => {
                write!(f, "'{}' is not an email address (expected local@domain)", email)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_field() {
        let err = ValidationError::TooLong {
            field: "name",
            max: 255,
        };
        assert_eq!(err.to_string(), "name is longer than 255 characters");

        let err = ValidationError::Missing { field: "password" };
        assert_eq!(err.to_string(), "password is required");
    }

    #[test]
    fn malformed_email_echoes_input() {
        let err = ValidationError::MalformedEmail {
            email: "sue.luna".into(),
        };
        assert_eq!(
            err.to_string(),
            "'sue.luna' is not an email address (expected local@domain)"
        );
    }
}
