//! Property repository
//!
//! - list: dynamic filter query from [`build_property_query`], JOIN with
//!   reviews for the average rating
//! - create: fixed 14-column INSERT ... RETURNING

use sqlx::PgPool;

use super::query_failed;
use crate::db::filter::{build_property_query, QueryParam};
use crate::error::DbError;
use crate::models::{Limit, NewProperty, Property, PropertyFilter, PropertyListing};

/// Property repository
pub struct PropertyRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PropertyRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List properties matching `filter`, cheapest first.
    pub async fn list(
        &self,
        filter: &PropertyFilter,
        limit: Limit,
    ) -> Result<Vec<PropertyListing>, DbError> {
        let built = build_property_query(filter, limit);
        tracing::debug!(sql = %built.sql, params = ?built.params, "property search");

        let mut query = sqlx::query_as::<_, PropertyListing>(&built.sql);
        for param in &built.params {
            query = match param {
                QueryParam::Text(s) => query.bind(s.as_str()),
                QueryParam::Int(i) => query.bind(*i),
                QueryParam::Float(f) => query.bind(*f),
            };
        }

        let rows = query
            .fetch_all(self.pool)
            .await
            .map_err(query_failed("get_all_properties"))?;

        tracing::debug!(count = rows.len(), "property search returned");
        Ok(rows)
    }

    /// Insert a property and return the created row.
    pub async fn create(&self, property: &NewProperty) -> Result<Property, DbError> {
        let created = sqlx::query_as::<_, Property>(
            r#"
            INSERT INTO properties (
                title, description, owner_id, cover_photo_url, thumbnail_photo_url,
                cost_per_night, parking_spaces, number_of_bathrooms, number_of_bedrooms,
                province, city, country, street, post_code
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING
                id, owner_id, title, description, thumbnail_photo_url, cover_photo_url,
                cost_per_night, parking_spaces, number_of_bathrooms, number_of_bedrooms,
                country, street, city, province, post_code, active
            "#,
        )
        .bind(&property.title)
        .bind(property.description.as_deref())
        .bind(property.owner_id)
        .bind(&property.cover_photo_url)
        .bind(&property.thumbnail_photo_url)
        .bind(property.cost_per_night)
        .bind(property.parking_spaces)
        .bind(property.number_of_bathrooms)
        .bind(property.number_of_bedrooms)
        .bind(&property.province)
        .bind(&property.city)
        .bind(&property.country)
        .bind(&property.street)
        .bind(&property.post_code)
        .fetch_one(self.pool)
        .await
        .map_err(query_failed("add_property"))?;

        tracing::info!(
            id = created.id,
            owner_id = created.owner_id,
            title = %created.title,
            "created property"
        );
        Ok(created)
    }
}
