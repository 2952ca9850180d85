//! Shared fixtures for server integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use tally_core::EntityRegistry;
use tally_server::app_state::AppState;
use tally_server::config::{self, ServerConfig};
use tally_server::obs::Metrics;
use tally_server::store::{CounterStore, MemoryCounterStore};

pub fn registry(names: &[&str]) -> EntityRegistry {
    EntityRegistry::from_names(names).unwrap()
}

pub fn memory_config(names: &[&str]) -> ServerConfig {
    let list = names
        .iter()
        .map(|n| format!("\"{n}\""))
        .collect::<Vec<_>>()
        .join(", ");
    let yaml = format!(
        "version: 1\nstore: {{ backend: memory }}\nhealth: {{ probe_timeout_ms: 200 }}\ncompanies: [{list}]\n"
    );
    config::load_from_str(&yaml).unwrap()
}

/// Memory store with counters registered for `names`.
pub async fn seeded_store(names: &[&str]) -> Arc<MemoryCounterStore> {
    let store = Arc::new(MemoryCounterStore::new());
    store.ensure_schema(&registry(names)).await.unwrap();
    store
}

/// State over a seeded memory store, plus handles to the store and metrics.
pub async fn memory_state(names: &[&str]) -> (AppState, Arc<MemoryCounterStore>, Arc<Metrics>) {
    let store = seeded_store(names).await;
    let metrics = Arc::new(Metrics::new());
    let dyn_store: Arc<dyn CounterStore> = store.clone();
    let state = AppState::new(&memory_config(names), dyn_store, Arc::clone(&metrics)).unwrap();
    (state, store, metrics)
}

pub fn count_of(standings: &[tally_core::VoteCounter], name: &str) -> u64 {
    standings
        .iter()
        .find(|c| c.entity.as_str() == name)
        .map(|c| c.count)
        .unwrap()
}
