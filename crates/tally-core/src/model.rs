use serde::Serialize;

use crate::entity::Entity;

/// Persisted tally for one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoteCounter {
    #[serde(rename = "company")]
    pub entity: Entity,
    #[serde(rename = "votes")]
    pub count: u64,
}

impl VoteCounter {
    pub fn new(entity: Entity, count: u64) -> Self {
        Self { entity, count }
    }
}

/// Result of a single liveness probe. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

impl HealthStatus {
    pub fn is_healthy(self) -> bool {
        matches!(self, HealthStatus::Healthy)
    }

    /// Value used in the `{"status": ...}` body.
    pub fn as_str(self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Unhealthy => "unhealthy",
        }
    }
}

impl From<bool> for HealthStatus {
    fn from(ok: bool) -> Self {
        if ok {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        }
    }
}
