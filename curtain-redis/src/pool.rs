//! Connection pooling for the flag store.

use bb8::{CustomizeConnection, Pool, PooledConnection};
use bb8_redis::RedisConnectionManager;
use redis::aio::MultiplexedConnection;
use std::ops::{Deref, DerefMut};
use tracing::info;

use crate::{RedisConfig, RedisError, Result};

/// Type alias for the connection pool.
pub type RedisPool = Pool<RedisConnectionManager>;

/// A connection checked out of the pool.
///
/// Derefs to the underlying multiplexed connection, so redis commands
/// apply to it directly.
pub struct RedisConnection<'a> {
    conn: PooledConnection<'a, RedisConnectionManager>,
}

impl<'a> RedisConnection<'a> {
    pub(crate) fn new(conn: PooledConnection<'a, RedisConnectionManager>) -> Self {
        Self { conn }
    }
}

impl<'a> Deref for RedisConnection<'a> {
    type Target = MultiplexedConnection;

    fn deref(&self) -> &Self::Target {
        &self.conn
    }
}

impl<'a> DerefMut for RedisConnection<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.conn
    }
}

/// Build the pool described by `config` and verify it with a PING.
///
/// When `config.connection_name` is set, every physical connection the
/// pool opens announces itself with CLIENT SETNAME, so pool members are
/// identifiable in CLIENT LIST on a shared Redis instance.
pub async fn build_pool(config: &RedisConfig) -> Result<RedisPool> {
    let manager = RedisConnectionManager::new(config.connection_url())
        .map_err(|e| RedisError::Connection(e.to_string()))?;

    let mut builder = Pool::builder()
        .max_size(config.pool_size)
        .min_idle(config.min_idle)
        .connection_timeout(config.connection_timeout);

    if let Some(name) = &config.connection_name {
        builder = builder.connection_customizer(Box::new(ConnectionNamer {
            name: name.clone(),
        }));
    }

    let pool = builder
        .build(manager)
        .await
        .map_err(|e| RedisError::Pool(e.to_string()))?;

    // Verify connectivity once; scoped so the connection returns to the
    // pool before the pool is handed out
    {
        let mut conn = pool
            .get()
            .await
            .map_err(|e| RedisError::Pool(e.to_string()))?;
        let _: String = redis::cmd("PING")
            .query_async(&mut *conn)
            .await
            .map_err(|e| RedisError::Connection(e.to_string()))?;
    }

    info!(
        pool_size = config.pool_size,
        url = %config.url,
        "Redis connection pool ready"
    );

    Ok(pool)
}

/// Labels each new pooled connection via CLIENT SETNAME.
#[derive(Debug)]
struct ConnectionNamer {
    name: String,
}

impl CustomizeConnection<MultiplexedConnection, redis::RedisError> for ConnectionNamer {
    fn on_acquire<'a>(
        &'a self,
        conn: &'a mut MultiplexedConnection,
    ) -> std::pin::Pin<
        Box<
            dyn std::future::Future<Output = std::result::Result<(), redis::RedisError>>
                + Send
                + 'a,
        >,
    > {
        Box::pin(async move {
            let _: () = redis::cmd("CLIENT")
                .arg("SETNAME")
                .arg(&self.name)
                .query_async(conn)
                .await?;
            Ok(())
        })
    }
}
