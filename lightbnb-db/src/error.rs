//! Error types for lightbnb-db
//!
//! Every query failure is returned to the caller, classified so that a
//! dead connection, a rejected insert and a missing row can be told apart.

use thiserror::Error;

pub type DbResult<T> = Result<T, DbError>;

/// Database error type
#[derive(Error, Debug)]
pub enum DbError {
    /// Pool, socket, TLS or protocol failure; the statement may not have run.
    #[error("database connection error: {0}")]
    Connection(#[source] sqlx::Error),

    /// The statement ran and a schema constraint rejected it.
    #[error("{kind} constraint violation: {message}")]
    Constraint {
        kind: ConstraintKind,
        constraint: Option<String>,
        message: String,
    },

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// Any other failure reported for the statement itself.
    #[error("query error: {0}")]
    Query(#[source] sqlx::Error),
}

/// Which kind of schema constraint rejected a write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Unique,
    ForeignKey,
    NotNull,
    Check,
}

impl std::fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Unique => "unique",
            Self::ForeignKey => "foreign key",
            Self::NotNull => "not-null",
            Self::Check => "check",
        })
    }
}

impl DbError {
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            Self::Constraint {
                kind: ConstraintKind::Unique,
                ..
            }
        )
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::NotFound {
                resource: "row",
                id: String::new(),
            },
            sqlx::Error::Database(db) => match constraint_kind(&*db) {
                Some(kind) => Self::Constraint {
                    kind,
                    constraint: db.constraint().map(str::to_owned),
                    message: db.message().to_owned(),
                },
                None => Self::Query(sqlx::Error::Database(db)),
            },
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Configuration(_) => Self::Connection(err),
            other => Self::Query(other),
        }
    }
}

/// SQLSTATE for `not_null_violation`
const NOT_NULL_VIOLATION: &str = "23502";

fn constraint_kind(db: &dyn sqlx::error::DatabaseError) -> Option<ConstraintKind> {
    if db.is_unique_violation() {
        Some(ConstraintKind::Unique)
    } else if db.is_foreign_key_violation() {
        Some(ConstraintKind::ForeignKey)
    } else if db.is_check_violation() {
        Some(ConstraintKind::Check)
    } else if db.code().as_deref() == Some(NOT_NULL_VIOLATION) {
        Some(ConstraintKind::NotNull)
    } else {
        None
    }
}
