//! The query service as a trait
//!
//! Callers depend on [`BookingStore`] rather than on a pool, so the
//! PostgreSQL implementation can be swapped for a double in tests.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::config::DatabaseConfig;
use crate::db::{create_pool, PropertyRepo, ReservationRepo, UserRepo};
use crate::error::DbResult;
use crate::models::{
    Limit, NewProperty, NewUser, Property, PropertyFilter, PropertyListing, ReservationListing,
    User,
};

/// All read/write operations of the booking data layer
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Case-insensitive lookup; `Ok(None)` when no user has this email.
    async fn get_user_with_email(&self, email: &str) -> DbResult<Option<User>>;

    /// `Ok(None)` when no user has this id.
    async fn get_user_with_id(&self, id: i32) -> DbResult<Option<User>>;

    async fn add_user(&self, user: &NewUser) -> DbResult<User>;

    /// A guest's reservations, earliest first, at most `limit`.
    async fn get_all_reservations(
        &self,
        guest_id: i32,
        limit: Limit,
    ) -> DbResult<Vec<ReservationListing>>;

    /// Properties matching `filter`, cheapest first, at most `limit`.
    async fn get_all_properties(
        &self,
        filter: &PropertyFilter,
        limit: Limit,
    ) -> DbResult<Vec<PropertyListing>>;

    async fn add_property(&self, property: &NewProperty) -> DbResult<Property>;
}

/// [`BookingStore`] backed by a PostgreSQL pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build the pool from configuration and wrap it.
    pub async fn connect(config: &DatabaseConfig) -> DbResult<Self> {
        Ok(Self::new(create_pool(config).await?))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl BookingStore for PgStore {
    async fn get_user_with_email(&self, email: &str) -> DbResult<Option<User>> {
        UserRepo::new(&self.pool).get_by_email(email).await
    }

    async fn get_user_with_id(&self, id: i32) -> DbResult<Option<User>> {
        UserRepo::new(&self.pool).get_by_id(id).await
    }

    async fn add_user(&self, user: &NewUser) -> DbResult<User> {
        UserRepo::new(&self.pool).create(user).await
    }

    async fn get_all_reservations(
        &self,
        guest_id: i32,
        limit: Limit,
    ) -> DbResult<Vec<ReservationListing>> {
        ReservationRepo::new(&self.pool)
            .list_for_guest(guest_id, limit)
            .await
    }

    async fn get_all_properties(
        &self,
        filter: &PropertyFilter,
        limit: Limit,
    ) -> DbResult<Vec<PropertyListing>> {
        PropertyRepo::new(&self.pool).list(filter, limit).await
    }

    async fn add_property(&self, property: &NewProperty) -> DbResult<Property> {
        PropertyRepo::new(&self.pool).create(property).await
    }
}
