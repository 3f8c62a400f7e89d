//! Document store configuration.

use serde::{Deserialize, Serialize};

/// Provider name for the PostgreSQL-backed store.
pub const PROVIDER_POSTGRES: &str = "postgres";
/// Provider name for the process-local store.
pub const PROVIDER_MEMORY: &str = "memory";

/// Document store and connection pool configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Store backend: `"postgres"` or `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// PostgreSQL connection URL.
    #[serde(default)]
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// Idle connection timeout in seconds.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,
    /// Apply pending migrations on server start.
    #[serde(default = "default_true")]
    pub run_migrations: bool,
    /// Capacity of the collection change broadcast channel.
    #[serde(default = "default_change_buffer")]
    pub change_buffer_size: usize,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_seconds: default_connect_timeout(),
            idle_timeout_seconds: default_idle_timeout(),
            run_migrations: default_true(),
            change_buffer_size: default_change_buffer(),
        }
    }
}

fn default_provider() -> String {
    PROVIDER_MEMORY.to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_idle_timeout() -> u64 {
    300
}

fn default_true() -> bool {
    true
}

fn default_change_buffer() -> usize {
    256
}
