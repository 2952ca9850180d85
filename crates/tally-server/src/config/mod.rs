//! Server config loader (strict parsing + environment overrides).
//!
//! Order: optional YAML file -> `DATABASE_URL` / `PORT` from the environment ->
//! `validate()`. A missing connection string is a startup error.

pub mod schema;

use std::fs;
use std::path::Path;

use tally_core::error::{Result, TallyError};

pub use schema::{HealthSection, ServerConfig, ServerSection, StoreBackend, StoreSection};

const DEFAULT_CONFIG_PATH: &str = "tally.yaml";

/// Load the process configuration from the file named by `TALLY_CONFIG`
/// (or `tally.yaml` if present) and the real environment.
pub fn load() -> Result<ServerConfig> {
    load_with_env(|key| std::env::var(key).ok())
}

/// Same as [`load`], with an injectable environment lookup.
pub fn load_with_env<F>(env: F) -> Result<ServerConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let cfg = match env("TALLY_CONFIG") {
        Some(path) => parse_file(&path)?,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => parse_file(DEFAULT_CONFIG_PATH)?,
        None => ServerConfig::default(),
    };
    let cfg = apply_env(cfg, &env)?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_from_str(s: &str) -> Result<ServerConfig> {
    let cfg = parse_str(s)?;
    cfg.validate()?;
    Ok(cfg)
}

/// Parse without validating, so environment overrides can fill gaps first.
pub fn parse_str(s: &str) -> Result<ServerConfig> {
    serde_yaml::from_str(s).map_err(|e| TallyError::Config(format!("invalid yaml: {e}")))
}

fn parse_file(path: &str) -> Result<ServerConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| TallyError::Config(format!("read config {path} failed: {e}")))?;
    parse_str(&s)
}

pub fn apply_env<F>(mut cfg: ServerConfig, env: F) -> Result<ServerConfig>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = env("DATABASE_URL").filter(|u| !u.is_empty()) {
        cfg.store.database_url = Some(url);
    }
    if let Some(port) = env("PORT").filter(|p| !p.is_empty()) {
        cfg.server.port = port
            .parse()
            .map_err(|_| TallyError::Config(format!("PORT is not a valid port: {port}")))?;
    }
    Ok(cfg)
}
