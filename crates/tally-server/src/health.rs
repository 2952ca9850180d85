//! Store liveness monitor.
//!
//! `check` never fails: probe errors and timeouts are logged and turned into
//! `Unhealthy`. Every probe overwrites the `database_health` gauge, so a single
//! failure flips the status and a single success flips it back.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tally_core::HealthStatus;

use crate::obs::Metrics;
use crate::store::CounterStore;

pub struct HealthMonitor {
    store: Arc<dyn CounterStore>,
    metrics: Arc<Metrics>,
    probe_timeout: Duration,
    last_healthy: AtomicBool,
}

impl HealthMonitor {
    pub fn new(store: Arc<dyn CounterStore>, metrics: Arc<Metrics>, probe_timeout: Duration) -> Self {
        Self {
            store,
            metrics,
            probe_timeout,
            last_healthy: AtomicBool::new(false),
        }
    }

    pub async fn check(&self) -> HealthStatus {
        let healthy = match tokio::time::timeout(self.probe_timeout, self.store.ping()).await {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                tracing::warn!(backend = self.store.backend(), error = %e, "database health check failed");
                false
            }
            Err(_) => {
                tracing::warn!(
                    backend = self.store.backend(),
                    timeout_ms = self.probe_timeout.as_millis() as u64,
                    "database health check timed out"
                );
                false
            }
        };

        self.metrics.set_store_health(healthy);
        let was = self.last_healthy.swap(healthy, Ordering::Relaxed);
        if was != healthy {
            tracing::info!(healthy, "database health changed");
        }
        HealthStatus::from(healthy)
    }
}
