//! Repository implementations for database access
//!
//! Each repository borrows the shared pool and runs exactly one statement
//! per operation. Failures are logged here and then returned; nothing is
//! swallowed.

pub mod users;
pub mod properties;
pub mod reservations;

pub use users::UserRepo;
pub use properties::PropertyRepo;
pub use reservations::ReservationRepo;

use crate::error::DbError;

/// Classify a sqlx failure and log it against the operation that hit it.
pub(crate) fn query_failed(operation: &'static str) -> impl FnOnce(sqlx::Error) -> DbError {
    move |e| {
        let err = DbError::from(e);
        tracing::error!(operation, error = %err, "query failed");
        err
    }
}
