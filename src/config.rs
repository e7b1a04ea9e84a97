//! Runtime configuration from the environment (a `.env` file is honored by the binary).

use crate::error::ConfigError;
use std::net::SocketAddr;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://app.db";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5555";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 64 * 1024;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub body_limit_bytes: usize,
    /// Insert demo campers and activities when the store is empty.
    pub seed_demo_data: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_url: DEFAULT_DATABASE_URL.into(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5555)),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
            seed_demo_data: false,
        }
    }
}

impl AppConfig {
    /// `DATABASE_URL` (or `DB_URI`), `BIND_ADDR`, `DB_MAX_CONNECTIONS`, `BODY_LIMIT_BYTES`, `SEED_DEMO_DATA`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .or_else(|| lookup("DB_URI"))
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        let bind_addr = parse_or("BIND_ADDR", lookup("BIND_ADDR"), DEFAULT_BIND_ADDR)?;
        let max_connections = parse_or(
            "DB_MAX_CONNECTIONS",
            lookup("DB_MAX_CONNECTIONS"),
            &DEFAULT_MAX_CONNECTIONS.to_string(),
        )?;
        let body_limit_bytes = parse_or(
            "BODY_LIMIT_BYTES",
            lookup("BODY_LIMIT_BYTES"),
            &DEFAULT_BODY_LIMIT_BYTES.to_string(),
        )?;
        let seed_demo_data = match lookup("SEED_DEMO_DATA") {
            None => false,
            Some(v) => match v.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "SEED_DEMO_DATA",
                        value: v,
                    })
                }
            },
        };
        Ok(AppConfig {
            database_url,
            bind_addr,
            max_connections,
            body_limit_bytes,
            seed_demo_data,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: &str,
) -> Result<T, ConfigError> {
    let value = raw.unwrap_or_else(|| default.to_string());
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value })
}
