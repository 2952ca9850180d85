//! In-process counter store.
//!
//! Used by tests and by `store.backend: memory` for running without Postgres.
//! Counters are `AtomicU64`s inside a `DashMap`; `increment` is one
//! `fetch_add`. Availability can be switched off to emulate a severed
//! connection, and a fixed latency can be injected before every operation so
//! concurrent callers interleave.

use std::cmp::Reverse;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;

use tally_core::error::{Result, TallyError};
use tally_core::{Entity, EntityRegistry, VoteCounter};

use super::CounterStore;

struct Slot {
    seq: u64,
    count: AtomicU64,
}

pub struct MemoryCounterStore {
    slots: DashMap<Entity, Slot>,
    next_seq: AtomicU64,
    available: AtomicBool,
    latency: Option<Duration>,
}

impl Default for MemoryCounterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCounterStore {
    pub fn new() -> Self {
        Self {
            slots: DashMap::new(),
            next_seq: AtomicU64::new(0),
            available: AtomicBool::new(true),
            latency: None,
        }
    }

    /// Sleep this long before every operation.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// `false` makes every operation fail with `StoreUnavailable`.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    async fn enter(&self) -> Result<()> {
        if let Some(d) = self.latency {
            tokio::time::sleep(d).await;
        }
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(TallyError::StoreUnavailable("memory store disconnected".into()))
        }
    }
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ensure_schema(&self, entities: &EntityRegistry) -> Result<()> {
        self.enter().await?;
        for entity in entities {
            self.slots.entry(entity.clone()).or_insert_with(|| Slot {
                seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
                count: AtomicU64::new(0),
            });
        }
        Ok(())
    }

    async fn increment(&self, entity: &Entity) -> Result<u64> {
        self.enter().await?;
        let slot = self
            .slots
            .get(entity)
            .ok_or_else(|| TallyError::UnknownEntity(entity.to_string()))?;
        Ok(slot.count.fetch_add(1, Ordering::AcqRel) + 1)
    }

    async fn list_all(&self) -> Result<Vec<VoteCounter>> {
        self.enter().await?;
        let mut rows: Vec<(u64, u64, Entity)> = self
            .slots
            .iter()
            .map(|r| {
                let slot = r.value();
                (slot.count.load(Ordering::Acquire), slot.seq, r.key().clone())
            })
            .collect();
        rows.sort_by_key(|(count, seq, _)| (Reverse(*count), *seq));
        Ok(rows
            .into_iter()
            .map(|(count, _, entity)| VoteCounter::new(entity, count))
            .collect())
    }

    async fn ping(&self) -> Result<()> {
        self.enter().await
    }
}
