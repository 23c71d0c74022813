//! Store key derivation.
//!
//! Each feature maps to two namespaced keys so flag state never collides
//! with unrelated data in a shared Redis instance.

/// Key holding a feature's allow-list set.
pub fn users_key(feature: &str) -> String {
    format!("curtain:feature:{feature}:users")
}

/// Key holding a feature's rollout percentage.
pub fn percentage_key(feature: &str) -> String {
    format!("curtain:feature:{feature}:percentage")
}
