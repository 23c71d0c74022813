//! Runtime configuration for flag evaluation.

use crate::rollout::RolloutMode;
use serde::{Deserialize, Serialize};

/// Evaluation settings.
///
/// Constructed once and passed by reference into [`Curtain`]; there is no
/// process-global configured instance.
///
/// [`Curtain`]: crate::Curtain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurtainConfig {
    /// Answer returned by `is_open` when the store cannot be queried.
    pub default_response: bool,
    /// Percentage assumed for a feature whose percentage was never set.
    pub default_percentage: u8,
    /// How percentage admission is decided.
    #[serde(default)]
    pub rollout: RolloutMode,
}

impl Default for CurtainConfig {
    fn default() -> Self {
        Self {
            default_response: false,
            default_percentage: 0,
            rollout: RolloutMode::default(),
        }
    }
}

impl CurtainConfig {
    /// Create a configuration with the defaults: closed on store failure,
    /// 0% for unset features, sticky rollout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback answer for store failures.
    pub fn with_default_response(mut self, response: bool) -> Self {
        self.default_response = response;
        self
    }

    /// Set the percentage assumed for never-configured features.
    /// Values over 100 are clamped to 100.
    pub fn with_default_percentage(mut self, percentage: u8) -> Self {
        self.default_percentage = percentage.min(100);
        self
    }

    /// Set the rollout mode.
    pub fn with_rollout(mut self, rollout: RolloutMode) -> Self {
        self.rollout = rollout;
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Reads `CURTAIN_DEFAULT_RESPONSE` (`true`/`1` for open),
    /// `CURTAIN_DEFAULT_PERCENTAGE`, and `CURTAIN_ROLLOUT`
    /// (`sticky` or `random`).
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(response) = std::env::var("CURTAIN_DEFAULT_RESPONSE") {
            config.default_response = matches!(response.as_str(), "true" | "1");
        }

        if let Ok(percentage) = std::env::var("CURTAIN_DEFAULT_PERCENTAGE")
            && let Ok(value) = percentage.parse::<u8>()
        {
            config.default_percentage = value.min(100);
        }

        if let Ok(mode) = std::env::var("CURTAIN_ROLLOUT") {
            match mode.as_str() {
                "random" => config.rollout = RolloutMode::Random,
                "sticky" => config.rollout = RolloutMode::Sticky,
                _ => {}
            }
        }

        config
    }
}
