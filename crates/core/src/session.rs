//! Session identity
//!
//! A session is an opaque identifier generated once per client lifetime. It
//! correlates every query from one client instance to the backend without
//! any authentication, is never rotated, and is never persisted across
//! restarts.

use serde::{Deserialize, Serialize};

/// Opaque per-client session identifier.
///
/// Wire shape is `user_` plus a short random suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh identifier. Called exactly once per client lifetime.
    pub fn generate() -> Self {
        let entropy = uuid::Uuid::new_v4().simple().to_string();
        Self(format!("user_{}", &entropy[..8]))
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pure selection from a pool: `seed` decides, the pool is never mutated.
///
/// Randomized choices (greeting lines) go through here so the contract stays
/// deterministic given a seed; callers supply whatever entropy they like.
/// Returns `None` for an empty pool.
pub fn pick_random<T>(seed: u64, pool: &[T]) -> Option<&T> {
    if pool.is_empty() {
        return None;
    }
    pool.get((seed % pool.len() as u64) as usize)
}
