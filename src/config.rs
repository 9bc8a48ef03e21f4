use std::env;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use dotenvy::dotenv;

use crate::store::StoreBackend;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub store_backend: StoreBackend,
    /// Required when `store_backend` is MySQL.
    pub database_url: Option<String>,
    pub db_max_connections: u32,

    // Rate limiting, 0 disables the limiter
    pub rate_upload_per_min: u32,
    pub rate_query_per_min: u32,

    /// Upper bound on a JSON request body; spreadsheets arrive as number arrays.
    pub json_limit_bytes: usize,

    pub api_prefix: String,

    pub log_dir: String,
    pub log_level: tracing::Level,
}

impl Config {
    /// Read configuration from the environment (and `.env`).
    ///
    /// Fails on the first missing or unparsable setting so the process never
    /// starts half-configured.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let store_backend: StoreBackend = var_or("STORE_BACKEND", StoreBackend::Mysql)?;
        let database_url = env::var("DATABASE_URL").ok().filter(|s| !s.trim().is_empty());

        if store_backend == StoreBackend::Mysql && database_url.is_none() {
            return Err(anyhow!("DATABASE_URL must be set when STORE_BACKEND=mysql"));
        }

        Ok(Self {
            server_addr: var_or("SERVER_ADDR", "127.0.0.1:8080".to_string())?,
            store_backend,
            database_url,
            db_max_connections: var_or("DB_MAX_CONNECTIONS", 5)?,

            rate_upload_per_min: var_or("RATE_UPLOAD_PER_MIN", 30)?,
            rate_query_per_min: var_or("RATE_QUERY_PER_MIN", 600)?,

            json_limit_bytes: var_or("JSON_LIMIT_BYTES", 64 * 1024 * 1024)?,

            api_prefix: var_or("API_PREFIX", "/api".to_string())?,

            log_dir: var_or("LOG_DIR", "logs".to_string())?,
            log_level: var_or("LOG_LEVEL", tracing::Level::INFO)?,
        })
    }
}

fn var_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("{e}"))
            .with_context(|| format!("invalid value for {key}: {raw:?}")),
        Err(env::VarError::NotPresent) => Ok(default),
        Err(e) => Err(e).with_context(|| format!("cannot read {key}")),
    }
}
