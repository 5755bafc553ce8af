//! Property search query builder
//!
//! Turns a sparse [`PropertyFilter`] into one parameterized statement.
//! Predicates are collected into a list and joined with `AND`; the list is
//! prefixed with `WHERE` only when it is non-empty, so the order in which
//! options are checked never affects clause placement. Each placeholder is
//! numbered from the parameter list length right after its value is pushed.
//!
//! Building is pure: the result can be logged, printed or asserted on
//! without a database.

use std::fmt;

use serde::Serialize;

use crate::models::{dollars_to_cents, Limit, PropertyFilter};

/// Everything before the filter predicates.
const PROPERTY_SELECT: &str = "SELECT properties.*, AVG(property_reviews.rating)::float8 AS average_rating
FROM properties
JOIN property_reviews ON properties.id = property_reviews.property_id";

/// A value bound to one positional placeholder
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryParam {
    Text(String),
    Int(i64),
    Float(f64),
}

impl fmt::Display for QueryParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "'{}'", s),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
        }
    }
}

/// SQL text plus its bound values, in placeholder order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuiltQuery {
    pub sql: String,
    pub params: Vec<QueryParam>,
}

/// Parameter accumulator that hands out `$n` placeholders.
#[derive(Debug, Default)]
struct Params(Vec<QueryParam>);

impl Params {
    /// Push a value and return the placeholder that refers to it.
    fn push(&mut self, value: QueryParam) -> String {
        self.0.push(value);
        format!("${}", self.0.len())
    }
}

/// Build the property listing statement for `filter`.
///
/// Option evaluation order is city, owner, minimum price, maximum price,
/// then minimum rating (as `HAVING`, after grouping).
pub fn build_property_query(filter: &PropertyFilter, limit: Limit) -> BuiltQuery {
    let mut params = Params::default();
    let mut predicates: Vec<String> = Vec::new();

    if let Some(city) = filter.city() {
        let p = params.push(QueryParam::Text(format!("%{}%", city)));
        predicates.push(format!("city LIKE {}", p));
    }

    if let Some(owner_id) = filter.owner_id() {
        let p = params.push(QueryParam::Int(i64::from(owner_id)));
        predicates.push(format!("owner_id = {}", p));
    }

    if let Some(min) = filter.minimum_price_per_night() {
        let p = params.push(QueryParam::Int(dollars_to_cents(min)));
        predicates.push(format!("cost_per_night >= {}", p));
    }

    if let Some(max) = filter.maximum_price_per_night() {
        let p = params.push(QueryParam::Int(dollars_to_cents(max)));
        predicates.push(format!("cost_per_night <= {}", p));
    }

    let mut sql = String::from(PROPERTY_SELECT);

    if !predicates.is_empty() {
        sql.push_str("\nWHERE ");
        sql.push_str(&predicates.join(" AND "));
    }

    sql.push_str("\nGROUP BY properties.id");

    if let Some(rating) = filter.minimum_rating() {
        let p = params.push(QueryParam::Float(rating));
        sql.push_str(&format!("\nHAVING AVG(property_reviews.rating) >= {}", p));
    }

    let p = params.push(QueryParam::Int(limit.as_i64()));
    sql.push_str(&format!("\nORDER BY cost_per_night\nLIMIT {}", p));

    BuiltQuery {
        sql,
        params: params.0,
    }
}
