//! Command implementations for the lightbnb CLI
//!
//! Each command has a `run_*` entry point that connects and writes to
//! stdout, and an `execute` function generic over [`BookingStore`] that
//! does the work.

pub mod properties;
pub mod reservations;
pub mod seed;
pub mod users;

pub use properties::run_properties;
pub use reservations::run_reservations;
pub use seed::run_seed;
pub use users::run_users;

use anyhow::{Context as _, Result};
use lightbnb_db::PgStore;

use crate::config::LightbnbConfig;
use crate::output::OutputFormat;

/// Settings shared by every command
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub config: LightbnbConfig,
    /// `--database-url` / `DATABASE_URL`
    pub database_url: Option<String>,
    pub format: OutputFormat,
}

impl Context {
    /// Build the pool and wrap it in a store.
    pub async fn connect(&self) -> Result<PgStore> {
        let db = self.config.database_config(self.database_url.as_deref())?;
        PgStore::connect(&db)
            .await
            .context("Failed to connect to database")
    }
}

#[cfg(test)]
pub(crate) mod fake {
    //! In-memory [`BookingStore`] for command tests

    use std::sync::Mutex;

    use async_trait::async_trait;
    use lightbnb_db::models::{
        Limit, NewProperty, NewUser, Property, PropertyFilter, PropertyListing,
        ReservationListing, User,
    };
    use lightbnb_db::{BookingStore, ConstraintKind, DbError, DbResult};

    #[derive(Default)]
    pub struct FakeStore {
        pub users: Mutex<Vec<User>>,
        pub properties: Mutex<Vec<Property>>,
        pub reservations: Vec<ReservationListing>,
        /// Fail `add_property` once this many properties exist
        pub property_capacity: Option<usize>,
    }

    #[async_trait]
    impl BookingStore for FakeStore {
        async fn get_user_with_email(&self, email: &str) -> DbResult<Option<User>> {
            let email = email.to_lowercase();
            let users = self.users.lock().unwrap();
            Ok(users.iter().find(|u| u.email == email).cloned())
        }

        async fn get_user_with_id(&self, id: i32) -> DbResult<Option<User>> {
            let users = self.users.lock().unwrap();
            Ok(users.iter().find(|u| u.id == id).cloned())
        }

        async fn add_user(&self, user: &NewUser) -> DbResult<User> {
            let mut users = self.users.lock().unwrap();
            if users.iter().any(|u| u.email == user.email.as_str()) {
                return Err(DbError::Constraint {
                    kind: ConstraintKind::Unique,
                    constraint: Some("users_email_key".into()),
                    message: "duplicate key value violates unique constraint".into(),
                });
            }
            let created = User {
                id: users.len() as i32 + 100,
                name: user.name.clone(),
                email: user.email.as_str().to_owned(),
                password: user.password.clone(),
            };
            users.push(created.clone());
            Ok(created)
        }

        async fn get_all_reservations(
            &self,
            guest_id: i32,
            limit: Limit,
        ) -> DbResult<Vec<ReservationListing>> {
            Ok(self
                .reservations
                .iter()
                .filter(|r| r.reservation.guest_id == guest_id)
                .take(limit.get() as usize)
                .cloned()
                .collect())
        }

        async fn get_all_properties(
            &self,
            filter: &PropertyFilter,
            limit: Limit,
        ) -> DbResult<Vec<PropertyListing>> {
            let properties = self.properties.lock().unwrap();
            Ok(properties
                .iter()
                .filter(|p| filter.owner_id().map_or(true, |id| p.owner_id == id))
                .take(limit.get() as usize)
                .map(|p| PropertyListing {
                    property: p.clone(),
                    average_rating: None,
                })
                .collect())
        }

        async fn add_property(&self, property: &NewProperty) -> DbResult<Property> {
            let mut properties = self.properties.lock().unwrap();
            if self.property_capacity == Some(properties.len()) {
                return Err(DbError::Constraint {
                    kind: ConstraintKind::ForeignKey,
                    constraint: Some("properties_owner_id_fkey".into()),
                    message: "insert or update violates foreign key constraint".into(),
                });
            }
            let created = Property {
                id: properties.len() as i32 + 500,
                owner_id: property.owner_id,
                title: property.title.clone(),
                description: property.description.clone(),
                thumbnail_photo_url: property.thumbnail_photo_url.clone(),
                cover_photo_url: property.cover_photo_url.clone(),
                cost_per_night: property.cost_per_night,
                parking_spaces: property.parking_spaces,
                number_of_bathrooms: property.number_of_bathrooms,
                number_of_bedrooms: property.number_of_bedrooms,
                country: property.country.clone(),
                street: property.street.clone(),
                city: property.city.clone(),
                province: property.province.clone(),
                post_code: property.post_code.clone(),
                active: true,
            };
            properties.push(created.clone());
            Ok(created)
        }
    }

    pub fn new_property(owner_id: i32, title: &str, cost_per_night: i32) -> NewProperty {
        NewProperty {
            owner_id,
            title: title.into(),
            description: None,
            thumbnail_photo_url: "https://images.example.com/t.jpg".into(),
            cover_photo_url: "https://images.example.com/c.jpg".into(),
            cost_per_night,
            parking_spaces: 0,
            number_of_bathrooms: 1,
            number_of_bedrooms: 1,
            country: "Canada".into(),
            street: "1 Main St".into(),
            city: "Vancouver".into(),
            province: "British Columbia".into(),
            post_code: "V5K 0A1".into(),
        }
    }
}
