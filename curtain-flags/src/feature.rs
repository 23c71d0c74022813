//! Per-feature mutations and raw reads.

use crate::error::{FlagError, FlagResult};
use crate::keys;
use crate::store::FlagStore;
use std::collections::HashSet;
use std::sync::Arc;

/// Mutation and raw-read facade for feature state.
///
/// A feature needs no creation step: it exists once any mutation targets
/// its name. Store failures here propagate to the caller, since a dropped
/// write must be visible; the default-response fallback belongs only to
/// the evaluator.
#[derive(Clone)]
pub struct Features {
    store: Arc<dyn FlagStore>,
}

impl Features {
    /// Create a facade over the given store.
    pub fn new(store: Arc<dyn FlagStore>) -> Self {
        Self { store }
    }

    /// Add users to a feature's allow-list. Adding a user twice is a no-op.
    pub async fn add_users(&self, feature: &str, users: &[String]) -> FlagResult<()> {
        if users.is_empty() {
            return Ok(());
        }
        self.store.set_add(&keys::users_key(feature), users).await
    }

    /// Remove users from a feature's allow-list. Absent users are no-ops.
    pub async fn remove_users(&self, feature: &str, users: &[String]) -> FlagResult<()> {
        if users.is_empty() {
            return Ok(());
        }
        self.store
            .set_remove(&keys::users_key(feature), users)
            .await
    }

    /// Set a feature's rollout percentage.
    ///
    /// Values over 100 are rejected with [`FlagError::InvalidPercentage`]
    /// rather than clamped; a clamped write would silently store something
    /// other than what the caller asked for.
    pub async fn set_percentage(&self, feature: &str, percentage: u8) -> FlagResult<()> {
        if percentage > 100 {
            return Err(FlagError::InvalidPercentage(percentage));
        }
        self.store
            .kv_set(&keys::percentage_key(feature), percentage)
            .await
    }

    /// Current allow-list contents. Empty set when nothing was ever added.
    pub async fn list_users(&self, feature: &str) -> FlagResult<HashSet<String>> {
        self.store.set_members(&keys::users_key(feature)).await
    }

    /// Raw stored percentage, not defaulted. `None` when never set, which
    /// is distinct from an explicit 0.
    pub async fn get_percentage(&self, feature: &str) -> FlagResult<Option<u8>> {
        self.store.kv_get(&keys::percentage_key(feature)).await
    }
}
