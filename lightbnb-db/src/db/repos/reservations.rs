//! Reservation repository
//!
//! Read-only: reservations for one guest, each joined with its property
//! and the property's average review score.

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Row};

use super::query_failed;
use crate::error::DbError;
use crate::models::{Limit, Property, Reservation, ReservationListing};

/// Reservation repository
pub struct ReservationRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ReservationRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a guest's reservations, earliest start date first.
    ///
    /// Reservation columns are aliased so they don't collide with the
    /// property's `id`.
    pub async fn list_for_guest(
        &self,
        guest_id: i32,
        limit: Limit,
    ) -> Result<Vec<ReservationListing>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT
                reservations.id AS reservation_id,
                reservations.guest_id,
                reservations.property_id,
                reservations.start_date,
                reservations.end_date,
                properties.*,
                AVG(property_reviews.rating)::float8 AS average_rating
            FROM properties
            JOIN reservations ON properties.id = reservations.property_id
            JOIN property_reviews ON property_reviews.property_id = properties.id
            WHERE reservations.guest_id = $1
            GROUP BY reservations.id, properties.id
            ORDER BY reservations.start_date
            LIMIT $2
            "#,
        )
        .bind(guest_id)
        .bind(limit.as_i64())
        .fetch_all(self.pool)
        .await
        .map_err(query_failed("get_all_reservations"))?;

        let items = rows
            .iter()
            .map(listing_from_row)
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(query_failed("get_all_reservations"))?;

        tracing::debug!(guest_id, count = items.len(), "reservations for guest");
        Ok(items)
    }
}

fn listing_from_row(row: &PgRow) -> Result<ReservationListing, sqlx::Error> {
    Ok(ReservationListing {
        reservation: Reservation {
            id: row.try_get("reservation_id")?,
            guest_id: row.try_get("guest_id")?,
            property_id: row.try_get("property_id")?,
            start_date: row.try_get("start_date")?,
            end_date: row.try_get("end_date")?,
        },
        property: Property::from_row(row)?,
        average_rating: row.try_get("average_rating")?,
    })
}
