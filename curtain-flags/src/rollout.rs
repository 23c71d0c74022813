//! Percentage rollout admission.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// How a percentage decides admission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RolloutMode {
    /// Deterministic per-subject bucketing: a given subject always gets the
    /// same outcome for a given feature, so rollouts do not flicker.
    #[default]
    Sticky,
    /// Fresh random draw on every evaluation. Useful for pure sampling,
    /// where per-call variance is acceptable or wanted.
    Random,
}

impl RolloutMode {
    /// Decide whether the rollout admits the given subjects at `percentage`.
    ///
    /// Sticky mode buckets each subject; all of them must fall inside the
    /// rollout, mirroring the all-subjects allow-list rule. With no
    /// subjects there is nothing to bucket, so both modes draw.
    pub fn admits(&self, feature: &str, subjects: &[String], percentage: u8) -> bool {
        if percentage >= 100 {
            return true;
        }
        if percentage == 0 {
            return false;
        }

        match self {
            Self::Sticky if !subjects.is_empty() => subjects
                .iter()
                .all(|subject| bucket(feature, subject) < percentage),
            _ => rand::rng().random_range(1..=100) <= percentage,
        }
    }
}

/// Hash (feature, subject) into a stable bucket in [0, 100).
pub(crate) fn bucket(feature: &str, subject: &str) -> u8 {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(feature.as_bytes());
    hasher.update(subject.as_bytes());
    let digest = hasher.finalize();

    // First byte (0-255) mapped onto 0-99
    ((digest[0] as u16 * 100) / 256) as u8
}
