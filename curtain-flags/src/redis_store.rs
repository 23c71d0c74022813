//! Redis flag store implementation.

use crate::error::FlagResult;
use crate::store::FlagStore;
use async_trait::async_trait;
use curtain_redis::RedisService;
use std::collections::HashSet;
use std::sync::Arc;

/// Flag store backed by a shared Redis instance.
///
/// Allow-lists are Redis sets; percentages are plain string values. All
/// commands go through the [`RedisService`] pool, so one store can be
/// shared across evaluators and processes.
#[derive(Clone)]
pub struct RedisFlagStore {
    redis: Arc<RedisService>,
}

impl RedisFlagStore {
    /// Create a store over an existing Redis service.
    pub fn new(redis: Arc<RedisService>) -> Self {
        Self { redis }
    }

    /// Get the underlying Redis service.
    pub fn redis(&self) -> &RedisService {
        &self.redis
    }
}

#[async_trait]
impl FlagStore for RedisFlagStore {
    async fn set_add(&self, key: &str, members: &[String]) -> FlagResult<()> {
        if members.is_empty() {
            return Ok(());
        }
        self.redis.sadd(key, members).await?;
        Ok(())
    }

    async fn set_remove(&self, key: &str, members: &[String]) -> FlagResult<()> {
        if members.is_empty() {
            return Ok(());
        }
        self.redis.srem(key, members).await?;
        Ok(())
    }

    async fn set_contains(&self, key: &str, member: &str) -> FlagResult<bool> {
        Ok(self.redis.sismember(key, member).await?)
    }

    async fn set_members(&self, key: &str) -> FlagResult<HashSet<String>> {
        let members: Vec<String> = self.redis.smembers(key).await?;
        Ok(members.into_iter().collect())
    }

    async fn kv_set(&self, key: &str, value: u8) -> FlagResult<()> {
        Ok(self.redis.set_value(key, value).await?)
    }

    async fn kv_get(&self, key: &str) -> FlagResult<Option<u8>> {
        Ok(self.redis.get_value(key).await?)
    }
}
