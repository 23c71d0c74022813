//! # Curtain Redis
//!
//! Redis client integration for Curtain feature flags: connection pooling
//! and the small command surface the flag store needs (string GET/SET plus
//! set SADD/SREM/SMEMBERS/SISMEMBER).
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use curtain_redis::{RedisConfig, RedisService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RedisConfig::builder()
//!         .url("redis://localhost:6379")
//!         .pool_size(10)
//!         .build();
//!
//!     let redis = RedisService::new(config).await?;
//!     redis.sadd("feature:checkout_v2:users", &["u1", "u2"]).await?;
//!     let open = redis.sismember("feature:checkout_v2:users", "u1").await?;
//!     assert!(open);
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod pool;
mod service;

pub use config::{RedisConfig, RedisConfigBuilder};
pub use error::{RedisError, Result};
pub use pool::{RedisConnection, RedisPool, build_pool};
pub use service::RedisService;

// Re-export redis crate for convenience
pub use redis;
