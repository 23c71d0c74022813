//! Error types for flag operations.

use thiserror::Error;

/// Result type for flag operations.
pub type FlagResult<T> = Result<T, FlagError>;

/// Flag-layer errors.
///
/// Mutation and raw-read operations surface these to the caller; the
/// evaluator converts `StoreUnavailable` into the configured default
/// response instead of returning it.
#[derive(Debug, Error)]
pub enum FlagError {
    /// The backing store could not be reached or the command failed in
    /// transit. A key that is simply absent is never this error.
    #[error("Flag store unavailable: {0}")]
    StoreUnavailable(String),

    /// A rollout percentage above 100 was supplied.
    #[error("Invalid rollout percentage: {0} (expected 0-100)")]
    InvalidPercentage(u8),
}

#[cfg(feature = "redis")]
impl From<curtain_redis::RedisError> for FlagError {
    fn from(err: curtain_redis::RedisError) -> Self {
        Self::StoreUnavailable(err.to_string())
    }
}
