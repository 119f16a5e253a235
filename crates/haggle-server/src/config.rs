//! Server configuration
//!
//! Read from the process environment (after `.env` is loaded by dotenvy).

use std::time::Duration;

use thiserror::Error;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_AGENT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_AGENT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CARFAX_BASE_URL: &str = "https://helix.carfax.com/search/v2/vehicles";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Connection pool sizing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    pub max_lifetime: Duration,
    pub idle_timeout: Duration,
    pub acquire_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: 25,
            min_connections: 5,
            max_lifetime: Duration::from_secs(5 * 60),
            idle_timeout: Duration::from_secs(30),
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

/// Configuration for the Haggle server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub database_url: String,
    pub agent_base_url: String,
    pub agent_timeout: Duration,
    pub carfax_base_url: String,
    pub pool: PoolConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let pool_defaults = PoolConfig::default();

        Ok(Self {
            port: parse_or("PORT", get("PORT"), DEFAULT_PORT)?,
            database_url,
            agent_base_url: get("AGENT_BASE_URL")
                .unwrap_or_else(|| DEFAULT_AGENT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            agent_timeout: Duration::from_secs(parse_or(
                "AGENT_TIMEOUT_SECS",
                get("AGENT_TIMEOUT_SECS"),
                DEFAULT_AGENT_TIMEOUT_SECS,
            )?),
            carfax_base_url: get("CARFAX_BASE_URL")
                .unwrap_or_else(|| DEFAULT_CARFAX_BASE_URL.to_string()),
            pool: PoolConfig {
                max_connections: parse_or(
                    "DB_MAX_CONNECTIONS",
                    get("DB_MAX_CONNECTIONS"),
                    pool_defaults.max_connections,
                )?,
                min_connections: parse_or(
                    "DB_MIN_CONNECTIONS",
                    get("DB_MIN_CONNECTIONS"),
                    pool_defaults.min_connections,
                )?,
                ..pool_defaults
            },
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
        None => Ok(default),
    }
}
