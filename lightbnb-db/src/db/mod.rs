//! Database layer - connection pool, query building and repositories
//!
//! - One injected pool, no global connection
//! - Every operation is a single statement, no transactions
//! - Rely on DB constraints and classify their violations, no check-then-insert

pub mod filter;
pub mod pool;
pub mod repos;

pub use filter::{build_property_query, BuiltQuery, QueryParam};
pub use pool::create_pool;
pub use repos::*;
