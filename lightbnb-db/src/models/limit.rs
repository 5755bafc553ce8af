//! Result-count caps for list queries

use serde::{Deserialize, Serialize};

/// Maximum rows a single list query may return
pub const MAX_LIMIT: u32 = 100;

/// Rows returned when the caller does not say
pub const DEFAULT_LIMIT: u32 = 10;

/// Row limit for list queries, clamped to `0..=100`
///
/// Zero is kept as-is and yields `LIMIT 0`. Anything above [`MAX_LIMIT`]
/// is capped so one query can't pull the whole table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Limit(u32);

impl Limit {
    /// Create a limit, capping at [`MAX_LIMIT`] rather than failing.
    pub fn new(limit: u32) -> Self {
        Self(limit.min(MAX_LIMIT))
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    /// Value to bind to a `LIMIT $n` placeholder.
    pub fn as_i64(&self) -> i64 {
        i64::from(self.0)
    }
}

impl Default for Limit {
    fn default() -> Self {
        Self(DEFAULT_LIMIT)
    }
}

impl From<u32> for Limit {
    fn from(limit: u32) -> Self {
        Self::new(limit)
    }
}

impl From<Limit> for u32 {
    fn from(limit: Limit) -> Self {
        limit.0
    }
}
