//! Search options for the property listing

use serde::{Deserialize, Serialize};

/// Sparse set of property search options.
///
/// Every field is optional. Empty strings, zero and non-finite numbers
/// are treated as absent, the way an empty search form field would be.
/// A city is otherwise used exactly as given, surrounding spaces included.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyFilter {
    /// Substring match on city
    pub city: Option<String>,
    /// Exact owner
    pub owner_id: Option<i32>,
    /// Dollars, inclusive
    pub minimum_price_per_night: Option<f64>,
    /// Dollars, inclusive
    pub maximum_price_per_night: Option<f64>,
    /// Average review score, inclusive
    pub minimum_rating: Option<f64>,
}

impl PropertyFilter {
    pub fn city(&self) -> Option<&str> {
        self.city.as_deref().filter(|c| !c.is_empty())
    }

    pub fn owner_id(&self) -> Option<i32> {
        self.owner_id.filter(|id| *id != 0)
    }

    pub fn minimum_price_per_night(&self) -> Option<f64> {
        self.minimum_price_per_night.filter(is_set)
    }

    pub fn maximum_price_per_night(&self) -> Option<f64> {
        self.maximum_price_per_night.filter(is_set)
    }

    pub fn minimum_rating(&self) -> Option<f64> {
        self.minimum_rating.filter(is_set)
    }

    /// True when no option would add a predicate.
    pub fn is_empty(&self) -> bool {
        self.city().is_none()
            && self.owner_id().is_none()
            && self.minimum_price_per_night().is_none()
            && self.maximum_price_per_night().is_none()
            && self.minimum_rating().is_none()
    }
}

/// NaN, infinities and zero never become predicates.
fn is_set(value: &f64) -> bool {
    value.is_finite() && *value != 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty() {
        assert!(PropertyFilter::default().is_empty());
    }

    #[test]
    fn empty_city_is_absent() {
        let filter = PropertyFilter {
            city: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(filter.city(), None);
        assert!(filter.is_empty());
    }

    #[test]
    fn city_is_not_trimmed() {
        let filter = PropertyFilter {
            city: Some(" van".into()),
            ..Default::default()
        };
        assert_eq!(filter.city(), Some(" van"));
    }

    #[test]
    fn non_finite_values_are_absent() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let filter = PropertyFilter {
                minimum_price_per_night: Some(value),
                maximum_price_per_night: Some(value),
                minimum_rating: Some(value),
                ..Default::default()
            };
            assert!(filter.is_empty(), "{value} should be absent");
        }
    }

    #[test]
    fn zero_values_are_absent() {
        let filter = PropertyFilter {
            owner_id: Some(0),
            minimum_price_per_night: Some(0.0),
            maximum_price_per_night: Some(0.0),
            minimum_rating: Some(0.0),
            ..Default::default()
        };
        assert!(filter.is_empty());
    }

    #[test]
    fn deserializes_sparse_json() {
        let filter: PropertyFilter =
            serde_json::from_str(r#"{"city": "Vancouver", "minimum_rating": 4}"#).unwrap();
        assert_eq!(filter.city(), Some("Vancouver"));
        assert_eq!(filter.minimum_rating(), Some(4.0));
        assert_eq!(filter.owner_id(), None);
    }
}
