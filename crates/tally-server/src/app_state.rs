//! Shared application state.
//!
//! Built once at startup from an already connected store and an explicitly
//! constructed metrics registry; cloned cheaply into every handler.

use std::sync::Arc;
use std::time::Duration;

use tally_core::error::Result;
use tally_core::EntityRegistry;

use crate::config::ServerConfig;
use crate::health::HealthMonitor;
use crate::obs::Metrics;
use crate::service::VoteService;
use crate::store::CounterStore;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    registry: EntityRegistry,
    metrics: Arc<Metrics>,
    votes: VoteService,
    health: HealthMonitor,
}

impl AppState {
    /// Wire components. Returns Result so main can exit cleanly on a bad
    /// entity list.
    pub fn new(cfg: &ServerConfig, store: Arc<dyn CounterStore>, metrics: Arc<Metrics>) -> Result<Self> {
        let registry = cfg.registry()?;
        let votes = VoteService::new(Arc::clone(&store), Arc::clone(&metrics));
        let health = HealthMonitor::new(
            store,
            Arc::clone(&metrics),
            Duration::from_millis(cfg.health.probe_timeout_ms),
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                registry,
                metrics,
                votes,
                health,
            }),
        })
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.inner.registry
    }

    pub fn metrics(&self) -> &Metrics {
        &self.inner.metrics
    }

    pub fn votes(&self) -> &VoteService {
        &self.inner.votes
    }

    pub fn health(&self) -> &HealthMonitor {
        &self.inner.health
    }
}
