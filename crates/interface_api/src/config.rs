//! API configuration

use std::time::Duration;

use serde::Deserialize;

/// API configuration, loaded from environment variables with defaults
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    #[serde(default = "defaults::host")]
    pub host: String,
    /// Server port
    #[serde(default = "defaults::port")]
    pub port: u16,
    /// PostgreSQL connection string
    #[serde(default = "defaults::database_url")]
    pub database_url: String,
    /// Counter-store host
    #[serde(default = "defaults::redis_host")]
    pub redis_host: String,
    /// Counter-store port
    #[serde(default = "defaults::redis_port")]
    pub redis_port: u16,
    /// Requests allowed per rate-limit window
    #[serde(default = "defaults::rate_limit_times")]
    pub rate_limit_times: u32,
    /// Rate-limit window in seconds
    #[serde(default = "defaults::rate_limit_seconds")]
    pub rate_limit_seconds: u64,
    /// Log level
    #[serde(default = "defaults::log_level")]
    pub log_level: String,
}

mod defaults {
    pub fn host() -> String {
        "0.0.0.0".to_string()
    }
    pub fn port() -> u16 {
        8080
    }
    pub fn database_url() -> String {
        "postgres://postgres:postgres@db/claims".to_string()
    }
    pub fn redis_host() -> String {
        "redis".to_string()
    }
    pub fn redis_port() -> u16 {
        6379
    }
    pub fn rate_limit_times() -> u32 {
        10
    }
    pub fn rate_limit_seconds() -> u64 {
        60
    }
    pub fn log_level() -> String {
        "info".to_string()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: defaults::host(),
            port: defaults::port(),
            database_url: defaults::database_url(),
            redis_host: defaults::redis_host(),
            redis_port: defaults::redis_port(),
            rate_limit_times: defaults::rate_limit_times(),
            rate_limit_seconds: defaults::rate_limit_seconds(),
            log_level: defaults::log_level(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment variables
    /// (`DATABASE_URL`, `REDIS_HOST`, `REDIS_PORT`, `RATE_LIMIT_TIMES`,
    /// `RATE_LIMIT_SECONDS`, `HOST`, `PORT`, `LOG_LEVEL`)
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::default())
            .build()?
            .try_deserialize()
    }

    /// Returns the server bind address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the counter-store connection URL
    pub fn redis_url(&self) -> String {
        format!("redis://{}:{}", self.redis_host, self.redis_port)
    }

    /// Returns the rate-limit window as a duration
    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_seconds)
    }
}
