//! Database configuration passed in at startup

use serde::{Deserialize, Serialize};

/// Default maximum connections for the pool.
/// Kept low; every operation is a single short round trip.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Connection settings for [`crate::db::create_pool`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection string
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    DEFAULT_MAX_CONNECTIONS
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections.max(1);
        self
    }

    /// Read `DATABASE_URL` from the environment, if set.
    pub fn from_env() -> Option<Self> {
        std::env::var("DATABASE_URL").ok().map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_default_pool_size() {
        let config = DatabaseConfig::new("postgres://localhost/lightbnb");
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn max_connections_at_least_one() {
        let config = DatabaseConfig::new("postgres://localhost/lightbnb").with_max_connections(0);
        assert_eq!(config.max_connections, 1);
    }
}
