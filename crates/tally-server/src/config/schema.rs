use serde::Deserialize;
use tally_core::error::{Result, TallyError};
use tally_core::EntityRegistry;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub store: StoreSection,

    #[serde(default)]
    pub health: HealthSection,

    #[serde(default = "default_companies")]
    pub companies: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            store: StoreSection::default(),
            health: HealthSection::default(),
            companies: default_companies(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(TallyError::Config(format!(
                "unsupported config version {}",
                self.version
            )));
        }
        self.store.validate()?;
        self.health.validate()?;
        self.registry()?;
        Ok(())
    }

    /// Registered entity set, in configured order.
    pub fn registry(&self) -> Result<EntityRegistry> {
        EntityRegistry::from_names(&self.companies)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    #[serde(default)]
    pub backend: StoreBackend,

    /// Usually injected from `DATABASE_URL` rather than written to the file.
    #[serde(default)]
    pub database_url: Option<String>,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_acquire_timeout_ms")]
    pub acquire_timeout_ms: u64,

    #[serde(default = "default_max_lifetime_secs")]
    pub max_lifetime_secs: u64,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            database_url: None,
            max_connections: default_max_connections(),
            acquire_timeout_ms: default_acquire_timeout_ms(),
            max_lifetime_secs: default_max_lifetime_secs(),
        }
    }
}

impl StoreSection {
    pub fn validate(&self) -> Result<()> {
        if self.backend == StoreBackend::Postgres
            && self.database_url.as_deref().map_or(true, str::is_empty)
        {
            return Err(TallyError::Config(
                "DATABASE_URL environment variable is not set".into(),
            ));
        }
        if !(1..=1000).contains(&self.max_connections) {
            return Err(TallyError::Config(
                "store.max_connections must be between 1 and 1000".into(),
            ));
        }
        if !(100..=60000).contains(&self.acquire_timeout_ms) {
            return Err(TallyError::Config(
                "store.acquire_timeout_ms must be between 100 and 60000".into(),
            ));
        }
        if self.max_lifetime_secs == 0 {
            return Err(TallyError::Config(
                "store.max_lifetime_secs must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HealthSection {
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
}

impl Default for HealthSection {
    fn default() -> Self {
        Self {
            probe_timeout_ms: default_probe_timeout_ms(),
        }
    }
}

impl HealthSection {
    pub fn validate(&self) -> Result<()> {
        if !(50..=30000).contains(&self.probe_timeout_ms) {
            return Err(TallyError::Config(
                "health.probe_timeout_ms must be between 50 and 30000".into(),
            ));
        }
        Ok(())
    }
}

fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    8080
}
fn default_max_connections() -> u32 {
    25
}
fn default_acquire_timeout_ms() -> u64 {
    3000
}
fn default_max_lifetime_secs() -> u64 {
    300
}
fn default_probe_timeout_ms() -> u64 {
    2000
}
fn default_companies() -> Vec<String> {
    ["google", "microsoft", "apple", "amazon", "nvidia", "meta"]
        .into_iter()
        .map(String::from)
        .collect()
}
