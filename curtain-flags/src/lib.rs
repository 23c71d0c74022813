//! Feature-flag evaluation for Curtain.
//!
//! Decides, for a named feature and zero or more subject identifiers,
//! whether that feature is open. Two independent activation mechanisms:
//!
//! - **Allow-list** - explicit subject identifiers for which the feature
//!   is always open
//! - **Percentage rollout** - sticky per-subject bucketing (or a fresh
//!   random draw) against a stored percentage
//!
//! State lives in a shared store ([`FlagStore`]), so decisions are
//! consistent across processes. When the store is unreachable, evaluation
//! answers with a configured default instead of raising.
//!
//! # Quick Start
//!
//! ```
//! use curtain_flags::{Curtain, CurtainConfig, Features, MemoryFlagStore};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), curtain_flags::FlagError> {
//! let store = Arc::new(MemoryFlagStore::new());
//! let features = Features::new(store.clone());
//! let curtain = Curtain::new(store, CurtainConfig::default());
//!
//! features
//!     .add_users("checkout_v2", &["u1".to_string()])
//!     .await?;
//!
//! assert!(curtain.is_open("checkout_v2", &["u1".to_string()]).await);
//! assert!(!curtain.is_open("checkout_v2", &["u3".to_string()]).await);
//! # Ok(())
//! # }
//! ```
//!
//! # Redis backend
//!
//! With the default `redis` feature, [`RedisFlagStore`] persists flag
//! state in Redis via `curtain-redis`:
//!
//! ```rust,ignore
//! let redis = Arc::new(RedisService::new(RedisConfig::from_env().build()).await?);
//! let store = Arc::new(RedisFlagStore::new(redis));
//! let curtain = Curtain::new(store, CurtainConfig::from_env());
//! ```

pub mod config;
pub mod curtain;
pub mod error;
pub mod feature;
pub mod keys;
pub mod rollout;
pub mod store;

#[cfg(feature = "redis")]
pub mod redis_store;

pub use config::CurtainConfig;
pub use curtain::Curtain;
pub use error::{FlagError, FlagResult};
pub use feature::Features;
pub use rollout::RolloutMode;
pub use store::{FlagStore, MemoryFlagStore, StoreOp};

#[cfg(feature = "redis")]
pub use redis_store::RedisFlagStore;
