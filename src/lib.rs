// Curtain - Redis-backed feature flags for Rust
//
// Facade crate re-exporting the flag evaluation core and, with the
// default `redis` feature, the Redis store integration.

// Re-export the flag core
pub use curtain_flags::*;

// Re-export the Redis integration
#[cfg(feature = "redis")]
pub use curtain_redis;
