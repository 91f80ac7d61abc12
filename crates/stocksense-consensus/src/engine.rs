//! Recompute-on-write consensus engine with per-pair serialization.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use dashmap::DashMap;

use stocksense_core::config::ConsensusConfig;
use stocksense_core::errors::StockResult;
use stocksense_core::models::{Observation, StatusAggregate};
use stocksense_core::traits::IStockStore;

use crate::formula::{self, Verdict};

/// Derives and persists aggregates. One engine instance serializes
/// recomputes per (item, location) pair, so concurrent writers interleave
/// as full read-derive-upsert rounds and the stored aggregate always
/// reflects some complete recompute.
pub struct ConsensusEngine {
    config: ConsensusConfig,
    recompute_locks: DashMap<(String, String), Arc<Mutex<()>>>,
}

impl ConsensusEngine {
    /// Create an engine with the given configuration.
    pub fn new(config: ConsensusConfig) -> Self {
        Self {
            config,
            recompute_locks: DashMap::new(),
        }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &ConsensusConfig {
        &self.config
    }

    /// Derive a verdict from observations without touching storage.
    pub fn derive(
        &self,
        observations: &[Observation],
        now: chrono::DateTime<Utc>,
    ) -> Option<Verdict> {
        formula::compute(observations, now, &self.config)
    }

    /// Recompute the aggregate for one pair from its stored observations and
    /// persist it. Returns the new aggregate, or `None` when the pair has no
    /// observations (the stored aggregate, if any, is left untouched).
    pub fn recompute(
        &self,
        store: &dyn IStockStore,
        item_id: &str,
        location_id: &str,
    ) -> StockResult<Option<StatusAggregate>> {
        let lock = self.pair_lock(item_id, location_id);
        // The guard only orders recomputes; a poisoned lock carries no state
        // to repair, so a panicked holder is safe to succeed.
        let _guard = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let observations =
            store.recent_observations(item_id, location_id, self.config.max_observations)?;
        let Some(verdict) = self.derive(&observations, Utc::now()) else {
            tracing::debug!(item_id, location_id, "recompute skipped, no observations");
            return Ok(None);
        };

        let aggregate = StatusAggregate {
            item_id: item_id.to_string(),
            location_id: location_id.to_string(),
            status: verdict.status,
            confidence: verdict.confidence,
            last_verified_at: verdict.last_verified_at,
        };
        store.upsert_aggregate(&aggregate)?;
        tracing::debug!(
            item_id,
            location_id,
            status = %aggregate.status,
            confidence = %aggregate.confidence,
            considered = observations.len(),
            "aggregate recomputed"
        );
        Ok(Some(aggregate))
    }

    /// The serialization lock for one pair. The Arc is cloned out so the
    /// DashMap shard guard drops before anyone blocks on the mutex.
    fn pair_lock(&self, item_id: &str, location_id: &str) -> Arc<Mutex<()>> {
        self.recompute_locks
            .entry((item_id.to_string(), location_id.to_string()))
            .or_default()
            .clone()
    }
}
