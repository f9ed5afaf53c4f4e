//! Configuration for the Paddock API.

use serde::{Deserialize, Serialize};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Database configuration. Racing and sports catalogs live in separate
/// SQLite files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_racing_path")]
    pub racing_path: String,
    #[serde(default = "default_sports_path")]
    pub sports_path: String,
}

fn default_racing_path() -> String {
    "data/racing.db".to_string()
}

fn default_sports_path() -> String {
    "data/sports.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            racing_path: default_racing_path(),
            sports_path: default_sports_path(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Load configuration from environment and config file
    pub fn load() -> anyhow::Result<Self> {
        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Add config file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (PADDOCK_SERVER_PORT, etc.)
            .add_source(
                config::Environment::with_prefix("PADDOCK")
                    .separator("_")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
