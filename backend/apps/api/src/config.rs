//! Process Configuration
//!
//! Read once at startup from the environment (after `.env` is loaded).

use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use platform::password::HasherConfig;
use platform::token::TokenConfig;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_ENVIRONMENT: &str = "development";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_TOKEN_TTL_HOURS: u64 = 24;

/// Allowed CORS origins
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

impl CorsOrigins {
    fn parse(raw: &str) -> Self {
        let origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
            CorsOrigins::Any
        } else {
            CorsOrigins::List(origins)
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub environment: String,
    /// Unset means the in-memory directory
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub token: TokenConfig,
    pub hasher: HasherConfig,
    pub cors_origins: CorsOrigins,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let defaults = HasherConfig::default();
        let ttl_hours: u64 = parse_or(&var, "JWT_TTL_HOURS", DEFAULT_TOKEN_TTL_HOURS)?;

        Ok(Self {
            port: parse_or(&var, "PORT", DEFAULT_PORT)?,
            environment: var("ENVIRONMENT").unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
            database_url: var("DATABASE_URL"),
            database_max_connections: parse_or(
                &var,
                "DATABASE_MAX_CONNECTIONS",
                DEFAULT_MAX_CONNECTIONS,
            )?,
            token: TokenConfig::from_secret(
                var("JWT_SECRET"),
                Duration::from_secs(ttl_hours.saturating_mul(60 * 60)),
            ),
            hasher: HasherConfig {
                memory_kib: parse_or(&var, "PASSWORD_HASH_MEMORY_KIB", defaults.memory_kib)?,
                iterations: parse_or(&var, "PASSWORD_HASH_ITERATIONS", defaults.iterations)?,
                parallelism: parse_or(&var, "PASSWORD_HASH_PARALLELISM", defaults.parallelism)?,
            },
            cors_origins: CorsOrigins::parse(
                &var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|| "*".to_string()),
            ),
        })
    }
}

fn parse_or<T>(var: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        None => Ok(default),
    }
}
