use chrono::FixedOffset;
use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// PostgreSQL connection URL. Without it the service runs on the in-memory store.
    #[serde(default)]
    pub database_url: Option<String>,

    /// Redis connection URL for the catalog snapshot cache
    #[serde(default)]
    pub redis_url: Option<String>,

    /// Lifetime of a cached catalog snapshot, in seconds
    #[serde(default = "default_catalog_cache_ttl")]
    pub catalog_cache_ttl: u64,

    /// Offset from UTC, in minutes, of the calendar day a condition log is filed under
    #[serde(default = "default_log_utc_offset_minutes")]
    pub log_utc_offset_minutes: i32,

    /// JSON file of catalog items loaded into the in-memory store at startup
    #[serde(default)]
    pub catalog_seed_path: Option<String>,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_catalog_cache_ttl() -> u64 {
    300
}

fn default_log_utc_offset_minutes() -> i32 {
    9 * 60
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars).map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Fixed offset used to date condition logs
    pub fn log_offset(&self) -> anyhow::Result<FixedOffset> {
        self.log_utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "LOG_UTC_OFFSET_MINUTES out of range: {}",
                    self.log_utc_offset_minutes
                )
            })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
