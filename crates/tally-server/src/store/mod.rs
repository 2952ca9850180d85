//! Persistent vote counters.
//!
//! All counter state lives behind [`CounterStore`]; the server holds no
//! in-process copy. Implementations must make `increment` a single atomic
//! operation that returns the post-increment value.

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;

use tally_core::error::Result;
use tally_core::{Entity, EntityRegistry, VoteCounter};

use crate::config::{StoreBackend, StoreSection};

pub use memory::MemoryCounterStore;
pub use postgres::PgCounterStore;

#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Short backend name for logs.
    fn backend(&self) -> &'static str;

    /// Create a zeroed counter for every entity that has none.
    /// Existing counts are never touched.
    async fn ensure_schema(&self, entities: &EntityRegistry) -> Result<()>;

    /// Add one vote and return the new count in the same operation.
    async fn increment(&self, entity: &Entity) -> Result<u64>;

    /// Every counter, count descending, ties in registration order.
    async fn list_all(&self) -> Result<Vec<VoteCounter>>;

    /// Lightweight liveness probe.
    async fn ping(&self) -> Result<()>;
}

/// Build the configured backend. For Postgres this connects eagerly, so an
/// unreachable database fails startup.
pub async fn connect(cfg: &StoreSection) -> Result<Arc<dyn CounterStore>> {
    match cfg.backend {
        StoreBackend::Postgres => Ok(Arc::new(PgCounterStore::connect(cfg).await?)),
        StoreBackend::Memory => Ok(Arc::new(MemoryCounterStore::new())),
    }
}
