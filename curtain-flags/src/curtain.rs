//! The evaluator: decides whether a feature is open.

use crate::config::CurtainConfig;
use crate::error::FlagResult;
use crate::keys;
use crate::store::FlagStore;
use std::sync::Arc;
use tracing::warn;

/// Feature evaluation engine.
///
/// A feature is open when every given subject is on its allow-list, or
/// when its percentage rollout admits the call: either mechanism alone is
/// sufficient. All state lives in the store, so the evaluator is stateless
/// and safe to share across tasks.
///
/// `is_open` never surfaces an error: if the store cannot be queried it
/// answers with the configured default response. A flag check must not
/// raise into application code.
#[derive(Clone)]
pub struct Curtain {
    store: Arc<dyn FlagStore>,
    config: CurtainConfig,
}

impl Curtain {
    /// Create an evaluator over the given store and configuration.
    pub fn new(store: Arc<dyn FlagStore>, config: CurtainConfig) -> Self {
        Self { store, config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &CurtainConfig {
        &self.config
    }

    /// Decide whether `feature` is open for `subjects`.
    ///
    /// With no subjects the decision is the percentage check alone. With
    /// subjects it is allow-listed OR percentage-admitted. Any store
    /// failure short-circuits to the configured default response; reads
    /// are never retried here.
    pub async fn is_open(&self, feature: &str, subjects: &[String]) -> bool {
        if !subjects.is_empty() {
            match self.users_allowed(feature, subjects).await {
                Ok(true) => return true,
                Ok(false) => {}
                Err(err) => {
                    warn!(feature, error = %err, "allow-list check failed, using default response");
                    return self.config.default_response;
                }
            }
        }

        match self.percentage_allowed(feature, subjects).await {
            Ok(allowed) => allowed,
            Err(err) => {
                warn!(feature, error = %err, "percentage check failed, using default response");
                self.config.default_response
            }
        }
    }

    /// Whether every subject is on the feature's allow-list.
    ///
    /// Vacuously true for an empty subject list; `is_open` only consults
    /// this when subjects were given.
    pub async fn users_allowed(&self, feature: &str, subjects: &[String]) -> FlagResult<bool> {
        let key = keys::users_key(feature);
        for subject in subjects {
            if !self.store.set_contains(&key, subject).await? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Whether the feature's percentage rollout admits this evaluation.
    ///
    /// An absent percentage is a normal state and resolves to the
    /// configured default percentage; only a store failure is an error.
    pub async fn percentage_allowed(
        &self,
        feature: &str,
        subjects: &[String],
    ) -> FlagResult<bool> {
        let stored = self.store.kv_get(&keys::percentage_key(feature)).await?;
        let percentage = stored.unwrap_or(self.config.default_percentage);
        Ok(self.config.rollout.admits(feature, subjects, percentage))
    }
}
