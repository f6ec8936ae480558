//! Service configuration.

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Transaction statistics service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsConfig {
    /// Acceptance/aggregation window length in seconds
    pub window_secs: i64,
    /// Eviction pass cadence in milliseconds
    pub eviction_interval_ms: u64,
    /// HTTP server configuration
    pub server: ServerConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            window_secs: 60,
            eviction_interval_ms: 1000,
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                timeout_seconds: 30,
            },
        }
    }
}

impl StatisticsConfig {
    /// Load configuration from a file with environment overrides.
    pub fn from_file(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("STATISTICS"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Get server address
    #[must_use]
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
