//! lightbnb-db: data access for the LightBnB booking app
//!
//! Builds parameterized SQL for users, properties and reservations, runs
//! it against PostgreSQL and maps rows into plain records. The property
//! search query is assembled from a sparse filter in [`db::filter`].

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod store;

pub use config::DatabaseConfig;
pub use error::{ConstraintKind, DbError, DbResult};
pub use store::{BookingStore, PgStore};
