//! Database connection configuration.

use std::env;

/// Connection parameters for the durable backend, read from the
/// environment at startup. The binary loads `.env` (dotenvy) before this
/// runs.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl DbConfig {
    /// Build a config from `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD`
    /// and `DB_NAME`, with local-development defaults for anything unset.
    pub fn from_env() -> Self {
        Self {
            host: env_or("DB_HOST", "localhost"),
            port: env::var("DB_PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(5432),
            user: env_or("DB_USER", "postgres"),
            password: env_or("DB_PASSWORD", ""),
            database: env_or("DB_NAME", "car_rental"),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
