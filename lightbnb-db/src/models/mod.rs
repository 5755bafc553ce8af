//! Domain models with validation at construction
//!
//! User input that needs checking is validated when these types are
//! created. Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod email;
pub mod user;
pub mod property;
pub mod reservation;
pub mod filter;
pub mod limit;

pub use validation::ValidationError;
pub use email::Email;
pub use user::{NewUser, User};
pub use property::{dollars_to_cents, NewProperty, Property, PropertyListing};
pub use reservation::{Reservation, ReservationListing};
pub use filter::PropertyFilter;
pub use limit::{Limit, DEFAULT_LIMIT, MAX_LIMIT};
