//! Flag store trait and the in-memory backend.

use crate::error::{FlagError, FlagResult};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;

/// Storage backend for flag state.
///
/// Two facets per key space: string sets (allow-lists) and small scalar
/// values (rollout percentages). Absent keys are normal states, not errors:
/// `set_members` on an absent key is an empty set and `kv_get` is
/// `Ok(None)`. An `Err` from any method means the store itself could not
/// be reached.
#[async_trait]
pub trait FlagStore: Send + Sync {
    /// Add members to a set. Already-present members are no-ops.
    async fn set_add(&self, key: &str, members: &[String]) -> FlagResult<()>;

    /// Remove members from a set. Absent members are no-ops.
    async fn set_remove(&self, key: &str, members: &[String]) -> FlagResult<()>;

    /// Test membership of a single value.
    async fn set_contains(&self, key: &str, member: &str) -> FlagResult<bool>;

    /// Enumerate a set. Absent key yields an empty set.
    async fn set_members(&self, key: &str) -> FlagResult<HashSet<String>>;

    /// Store a percentage value.
    async fn kv_set(&self, key: &str, value: u8) -> FlagResult<()>;

    /// Read a percentage value. Absent key yields `Ok(None)`.
    async fn kv_get(&self, key: &str) -> FlagResult<Option<u8>>;
}

/// Store operations, used to target failure injection in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    SetAdd,
    SetRemove,
    SetContains,
    SetMembers,
    KvSet,
    KvGet,
}

/// In-process flag store.
///
/// Keeps all state behind `RwLock`ed maps. Useful as a test double and for
/// single-process setups that do not need shared state. Individual
/// operations can be made to fail with [`MemoryFlagStore::fail_on`] to
/// exercise the evaluator's fallback path.
#[derive(Default)]
pub struct MemoryFlagStore {
    sets: RwLock<HashMap<String, HashSet<String>>>,
    values: RwLock<HashMap<String, u8>>,
    failures: RwLock<HashSet<StoreOp>>,
}

impl MemoryFlagStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call to `op` fail with `StoreUnavailable`.
    pub async fn fail_on(&self, op: StoreOp) {
        self.failures.write().await.insert(op);
    }

    /// Clear all injected failures.
    pub async fn heal(&self) {
        self.failures.write().await.clear();
    }

    async fn check(&self, op: StoreOp) -> FlagResult<()> {
        if self.failures.read().await.contains(&op) {
            return Err(FlagError::StoreUnavailable(format!(
                "injected failure for {op:?}"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl FlagStore for MemoryFlagStore {
    async fn set_add(&self, key: &str, members: &[String]) -> FlagResult<()> {
        self.check(StoreOp::SetAdd).await?;
        let mut sets = self.sets.write().await;
        let set = sets.entry(key.to_string()).or_default();
        set.extend(members.iter().cloned());
        Ok(())
    }

    async fn set_remove(&self, key: &str, members: &[String]) -> FlagResult<()> {
        self.check(StoreOp::SetRemove).await?;
        let mut sets = self.sets.write().await;
        if let Some(set) = sets.get_mut(key) {
            for member in members {
                set.remove(member);
            }
        }
        Ok(())
    }

    async fn set_contains(&self, key: &str, member: &str) -> FlagResult<bool> {
        self.check(StoreOp::SetContains).await?;
        let sets = self.sets.read().await;
        Ok(sets.get(key).is_some_and(|set| set.contains(member)))
    }

    async fn set_members(&self, key: &str) -> FlagResult<HashSet<String>> {
        self.check(StoreOp::SetMembers).await?;
        let sets = self.sets.read().await;
        Ok(sets.get(key).cloned().unwrap_or_default())
    }

    async fn kv_set(&self, key: &str, value: u8) -> FlagResult<()> {
        self.check(StoreOp::KvSet).await?;
        self.values.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn kv_get(&self, key: &str) -> FlagResult<Option<u8>> {
        self.check(StoreOp::KvGet).await?;
        Ok(self.values.read().await.get(key).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_add_is_idempotent() {
        let store = MemoryFlagStore::new();
        let members = vec!["u1".to_string(), "u1".to_string()];
        store.set_add("k", &members).await.unwrap();
        store.set_add("k", &members).await.unwrap();
        assert_eq!(store.set_members("k").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn remove_of_absent_member_is_noop() {
        let store = MemoryFlagStore::new();
        store
            .set_remove("k", &["ghost".to_string()])
            .await
            .unwrap();
        assert!(store.set_members("k").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn absent_value_is_none_not_error() {
        let store = MemoryFlagStore::new();
        assert_eq!(store.kv_get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn injected_failure_surfaces_as_store_unavailable() {
        let store = MemoryFlagStore::new();
        store.fail_on(StoreOp::KvGet).await;
        let err = store.kv_get("k").await.unwrap_err();
        assert!(matches!(err, FlagError::StoreUnavailable(_)));

        store.heal().await;
        assert!(store.kv_get("k").await.is_ok());
    }
}
