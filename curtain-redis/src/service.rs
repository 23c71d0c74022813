//! Redis service wrapping the pool with the commands the flag layer uses.

use redis::AsyncCommands;
use std::future::Future;
use std::time::Duration;

use crate::{
    RedisConfig, RedisError, Result,
    pool::{RedisConnection, RedisPool, build_pool},
};

/// Redis service providing a connection pool and typed command helpers.
///
/// This is the entry point for all Redis traffic. Construct one per process
/// and share it by reference; the pool handles concurrent callers. Every
/// command is bounded by `config.command_timeout`, surfacing as
/// [`RedisError::Timeout`] when exceeded.
pub struct RedisService {
    config: RedisConfig,
    pool: RedisPool,
}

impl RedisService {
    /// Create a new Redis service, establishing the pool.
    pub async fn new(config: RedisConfig) -> Result<Self> {
        let pool = build_pool(&config).await?;
        Ok(Self { config, pool })
    }

    /// Create from an existing pool.
    pub fn from_pool(config: RedisConfig, pool: RedisPool) -> Self {
        Self { config, pool }
    }

    /// Get the configuration.
    pub fn config(&self) -> &RedisConfig {
        &self.config
    }

    /// Get a connection from the pool.
    pub async fn get(&self) -> Result<RedisConnection<'_>> {
        let conn = self.pool.get().await?;
        Ok(RedisConnection::new(conn))
    }

    /// Check if the connection is healthy.
    pub async fn health_check(&self) -> Result<()> {
        let mut conn = self.get().await?;
        let _: String = self
            .bounded(redis::cmd("PING").query_async(&mut *conn))
            .await?;
        Ok(())
    }

    /// Get a string value (GET). Absent keys are `Ok(None)`.
    pub async fn get_value<T: redis::FromRedisValue>(&self, key: &str) -> Result<Option<T>> {
        let mut conn = self.get().await?;
        self.bounded(conn.get(key)).await
    }

    /// Set a string value (SET).
    pub async fn set_value<T: redis::ToSingleRedisArg + Send + Sync>(
        &self,
        key: &str,
        value: T,
    ) -> Result<()> {
        let mut conn = self.get().await?;
        self.bounded(conn.set(key, value)).await
    }

    /// Delete a key (DEL). Returns whether anything was removed.
    pub async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.get().await?;
        let deleted: u32 = self.bounded(conn.del(key)).await?;
        Ok(deleted > 0)
    }

    /// Check if a key exists (EXISTS).
    pub async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.get().await?;
        self.bounded(conn.exists(key)).await
    }

    /// Add members to a set (SADD). Returns the number newly added.
    pub async fn sadd<T: redis::ToRedisArgs + Send + Sync>(
        &self,
        key: &str,
        members: &[T],
    ) -> Result<u64> {
        let mut conn = self.get().await?;
        self.bounded(conn.sadd(key, members)).await
    }

    /// Remove members from a set (SREM). Returns the number removed.
    pub async fn srem<T: redis::ToRedisArgs + Send + Sync>(
        &self,
        key: &str,
        members: &[T],
    ) -> Result<u64> {
        let mut conn = self.get().await?;
        self.bounded(conn.srem(key, members)).await
    }

    /// Enumerate a set (SMEMBERS). Absent keys yield an empty vec.
    pub async fn smembers<T: redis::FromRedisValue>(&self, key: &str) -> Result<Vec<T>> {
        let mut conn = self.get().await?;
        self.bounded(conn.smembers(key)).await
    }

    /// Test set membership (SISMEMBER).
    pub async fn sismember<T: redis::ToSingleRedisArg + Send + Sync>(
        &self,
        key: &str,
        member: T,
    ) -> Result<bool> {
        let mut conn = self.get().await?;
        self.bounded(conn.sismember(key, member)).await
    }

    async fn bounded<T>(&self, command: impl Future<Output = redis::RedisResult<T>>) -> Result<T> {
        with_timeout(self.config.command_timeout, command).await
    }
}

/// Run a command future under a deadline.
async fn with_timeout<T>(
    timeout: Duration,
    command: impl Future<Output = redis::RedisResult<T>>,
) -> Result<T> {
    match tokio::time::timeout(timeout, command).await {
        Ok(result) => Ok(result?),
        Err(_) => Err(RedisError::Timeout),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stalled_command_times_out() {
        let result: Result<()> = with_timeout(
            Duration::from_millis(5),
            std::future::pending::<redis::RedisResult<()>>(),
        )
        .await;
        assert!(matches!(result.unwrap_err(), RedisError::Timeout));
    }

    #[tokio::test]
    async fn prompt_command_passes_through() {
        let result = with_timeout(Duration::from_secs(1), async { Ok(42u64) }).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    #[ignore = "requires Redis"]
    async fn set_round_trip() {
        let config = RedisConfig::builder().url("redis://localhost:6379").build();
        let redis = RedisService::new(config).await.unwrap();

        redis.delete("curtain_test_set").await.unwrap();
        redis
            .sadd("curtain_test_set", &["a", "b"])
            .await
            .unwrap();

        assert!(redis.sismember("curtain_test_set", "a").await.unwrap());
        assert!(!redis.sismember("curtain_test_set", "z").await.unwrap());

        let members: Vec<String> = redis.smembers("curtain_test_set").await.unwrap();
        assert_eq!(members.len(), 2);

        redis.delete("curtain_test_set").await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires Redis"]
    async fn pooled_connections_carry_the_configured_name() {
        let config = RedisConfig::builder()
            .url("redis://localhost:6379")
            .connection_name("curtain-test")
            .build();
        let redis = RedisService::new(config).await.unwrap();

        let mut conn = redis.get().await.unwrap();
        let name: String = redis::cmd("CLIENT")
            .arg("GETNAME")
            .query_async(&mut *conn)
            .await
            .unwrap();
        assert_eq!(name, "curtain-test");
    }
}
