use std::env;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use dotenvy::dotenv;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,
    pub db_max_connections: u32,
    pub run_migrations: bool,

    /// Largest accepted spreadsheet upload, in bytes
    pub max_upload_bytes: usize,

    pub log_dir: String,
    pub log_level: tracing::Level,

    // Rate limiting
    pub rate_upload_per_min: u32,
    pub rate_calculate_per_min: u32,
    pub rate_read_per_min: u32,

    pub api_prefix: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| lookup(key).ok_or_else(|| anyhow!("{key} must be set"));

        Ok(Self {
            server_addr: required("SERVER_ADDR")?,
            database_url: required("DATABASE_URL")?,
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 5)?,
            run_migrations: parse_or(&lookup, "RUN_MIGRATIONS", true)?,

            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,

            log_dir: lookup("LOG_DIR").unwrap_or_else(|| "logs".to_string()),
            log_level: parse_or(&lookup, "LOG_LEVEL", tracing::Level::INFO)?,

            rate_upload_per_min: parse_or(&lookup, "RATE_UPLOAD_PER_MIN", 30)?,
            rate_calculate_per_min: parse_or(&lookup, "RATE_CALCULATE_PER_MIN", 60)?,
            rate_read_per_min: parse_or(&lookup, "RATE_READ_PER_MIN", 1000)?,

            api_prefix: lookup("API_PREFIX").unwrap_or_else(|| "/api".to_string()),
        })
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_optional_keys_absent() {
        let config = Config::from_lookup(lookup_from(&[
            ("SERVER_ADDR", "127.0.0.1:8080"),
            ("DATABASE_URL", "mysql://localhost/sicalc"),
        ]))
        .unwrap();

        assert_eq!(config.api_prefix, "/api");
        assert_eq!(config.db_max_connections, 5);
        assert!(config.run_migrations);
        assert_eq!(config.log_level, tracing::Level::INFO);
        assert_eq!(config.rate_upload_per_min, 30);
    }

    #[test]
    fn missing_required_key_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[("SERVER_ADDR", "127.0.0.1:8080")])).unwrap_err();
        assert_eq!(err.to_string(), "DATABASE_URL must be set");
    }

    #[test]
    fn malformed_number_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[
            ("SERVER_ADDR", "127.0.0.1:8080"),
            ("DATABASE_URL", "mysql://localhost/sicalc"),
            ("RATE_READ_PER_MIN", "lots"),
        ]))
        .unwrap_err();

        assert!(err.to_string().starts_with("RATE_READ_PER_MIN has an invalid value"));
    }
}
