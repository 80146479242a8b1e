//! Newtype IDs for vehicle records.
//!
//! Source systems hand out ids in different shapes (document keys, numeric
//! spreadsheet cells, form timestamps). Everything is stringified into a
//! [`VehicleId`] so uniqueness checks compare like with like.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a vehicle listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(String);

impl VehicleId {
    /// Create an ID from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Synthesize a fresh ID.
    ///
    /// The token is a millisecond timestamp, bumped past the last value
    /// issued in this process so two calls never return the same ID.
    pub fn generate() -> Self {
        Self(generate_id().to_string())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for VehicleId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for VehicleId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<i64> for VehicleId {
    fn from(n: i64) -> Self {
        Self(n.to_string())
    }
}

impl AsRef<str> for VehicleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Timestamp-derived token, strictly increasing within the process.
fn generate_id() -> i64 {
    use std::sync::atomic::{AtomicI64, Ordering};

    static LAST: AtomicI64 = AtomicI64::new(0);

    let now = chrono::Utc::now().timestamp_millis();
    let mut last = LAST.load(Ordering::SeqCst);
    loop {
        let next = now.max(last + 1);
        match LAST.compare_exchange(last, next, Ordering::SeqCst, Ordering::SeqCst) {
            Ok(_) => return next,
            Err(actual) => last = actual,
        }
    }
}
