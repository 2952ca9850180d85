//! Postgres-backed counters (`votes` table).

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Connection;

use tally_core::error::{Result, TallyError};
use tally_core::{Entity, EntityRegistry, VoteCounter};

use crate::config::StoreSection;

use super::CounterStore;

const CREATE_TABLE_SQL: &str = "
CREATE TABLE IF NOT EXISTS votes (
    id SERIAL PRIMARY KEY,
    company_name VARCHAR(50) UNIQUE NOT NULL,
    vote_count INT NOT NULL DEFAULT 0
)";

const INSERT_SQL: &str =
    "INSERT INTO votes (company_name) VALUES ($1) ON CONFLICT (company_name) DO NOTHING";

// Single round trip: the row lock taken by UPDATE serializes concurrent votes.
const INCREMENT_SQL: &str =
    "UPDATE votes SET vote_count = vote_count + 1 WHERE company_name = $1 RETURNING vote_count";

const LIST_SQL: &str = "SELECT company_name, vote_count FROM votes ORDER BY vote_count DESC, id ASC";

fn unavailable(e: sqlx::Error) -> TallyError {
    TallyError::StoreUnavailable(e.to_string())
}

fn to_count(entity: &str, raw: i32) -> Result<u64> {
    u64::try_from(raw)
        .map_err(|_| TallyError::Internal(format!("negative vote_count {raw} for {entity}")))
}

pub struct PgCounterStore {
    pool: PgPool,
}

impl PgCounterStore {
    /// Open the pool and establish one connection up front.
    pub async fn connect(cfg: &StoreSection) -> Result<Self> {
        let url = cfg
            .database_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or_else(|| TallyError::Config("DATABASE_URL environment variable is not set".into()))?;

        let pool = PgPoolOptions::new()
            .max_connections(cfg.max_connections)
            .acquire_timeout(Duration::from_millis(cfg.acquire_timeout_ms))
            .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
            .connect(url)
            .await
            .map_err(unavailable)?;

        tracing::info!(max_connections = cfg.max_connections, "connected to postgres");
        Ok(Self { pool })
    }
}

#[async_trait]
impl CounterStore for PgCounterStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ensure_schema(&self, entities: &EntityRegistry) -> Result<()> {
        sqlx::query(CREATE_TABLE_SQL)
            .execute(&self.pool)
            .await
            .map_err(unavailable)?;

        for entity in entities {
            let res = sqlx::query(INSERT_SQL)
                .bind(entity.as_str())
                .execute(&self.pool)
                .await
                .map_err(unavailable)?;
            if res.rows_affected() > 0 {
                tracing::info!(%entity, "registered new counter");
            }
        }
        tracing::info!(entities = entities.len(), "votes table checked and populated");
        Ok(())
    }

    async fn increment(&self, entity: &Entity) -> Result<u64> {
        let row: Option<i32> = sqlx::query_scalar(INCREMENT_SQL)
            .bind(entity.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(unavailable)?;

        match row {
            Some(n) => to_count(entity.as_str(), n),
            None => Err(TallyError::UnknownEntity(entity.to_string())),
        }
    }

    async fn list_all(&self) -> Result<Vec<VoteCounter>> {
        let rows: Vec<(String, i32)> = sqlx::query_as(LIST_SQL)
            .fetch_all(&self.pool)
            .await
            .map_err(unavailable)?;

        let mut out = Vec::with_capacity(rows.len());
        for (name, raw) in rows {
            let entity = match Entity::parse(&name) {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!(%name, error = %e, "skipping malformed company row");
                    continue;
                }
            };
            let count = to_count(&name, raw)?;
            out.push(VoteCounter::new(entity, count));
        }
        Ok(out)
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.pool.acquire().await.map_err(unavailable)?;
        conn.ping().await.map_err(unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_count_is_internal_error() {
        let err = to_count("google", -1).expect_err("must fail");
        assert_eq!(err.client_code().as_str(), "INTERNAL");
        assert_eq!(to_count("google", 41).unwrap(), 41);
    }

    #[test]
    fn increment_is_single_statement() {
        assert!(INCREMENT_SQL.starts_with("UPDATE"));
        assert!(INCREMENT_SQL.contains("RETURNING vote_count"));
        assert!(!INCREMENT_SQL.contains(';'));
    }
}
