//! Vote orchestration: validate, increment, record.

use std::sync::Arc;

use tally_core::error::Result;
use tally_core::{Entity, VoteCounter};

use crate::obs::Metrics;
use crate::store::CounterStore;

/// Outcome of an accepted vote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteReceipt {
    pub entity: Entity,
    pub new_count: u64,
}

#[derive(Clone)]
pub struct VoteService {
    store: Arc<dyn CounterStore>,
    metrics: Arc<Metrics>,
}

impl VoteService {
    pub fn new(store: Arc<dyn CounterStore>, metrics: Arc<Metrics>) -> Self {
        Self { store, metrics }
    }

    /// Count one vote for `raw`.
    ///
    /// Malformed names fail with `InvalidRequest` before the store is touched.
    /// Store errors (`UnknownEntity`, `StoreUnavailable`) are returned as-is and
    /// leave `votes_total` unchanged.
    pub async fn vote(&self, raw: &str) -> Result<VoteReceipt> {
        let entity = Entity::parse(raw)?;
        let new_count = self.store.increment(&entity).await?;
        self.metrics.record_vote(entity.as_str());
        tracing::debug!(%entity, new_count, "vote counted");
        Ok(VoteReceipt { entity, new_count })
    }

    pub async fn list_standings(&self) -> Result<Vec<VoteCounter>> {
        self.store.list_all().await
    }
}
