//! Runtime configuration, read once at startup from the environment.
//!
//! A `.env` file in the working directory is honoured when present.
//!
//! | Variable              | Default             |
//! |-----------------------|---------------------|
//! | `HOST`                | `127.0.0.1`         |
//! | `PORT`                | `8080`              |
//! | `DATABASE_PATH`       | `directory.sqlite`  |
//! | `ADMIN_TOKENS`        | empty (`email=token,...`) |
//! | `NOTIFY_WEBHOOK_URL`  | unset, relay disabled |
//! | `NOTIFY_CHAT_ID`      | unset               |
//! | `JSON_LIMIT_BYTES`    | `65536`             |
//! | `TRUSTED_PROXY`       | `false`             |
//!
//! Set `TRUSTED_PROXY=true` only when the server is reachable solely through
//! a reverse proxy that overwrites `X-Forwarded-For`; otherwise clients could
//! pick their own rate-limit key.

use std::collections::HashMap;
use std::env;
use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATABASE_PATH: &str = "directory.sqlite";
const DEFAULT_JSON_LIMIT_BYTES: usize = 64 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a number, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },
    #[error("{name} must be true or false, got '{value}'")]
    InvalidFlag { name: &'static str, value: String },
    #[error("ADMIN_TOKENS entry '{0}' must look like email=token")]
    InvalidAdminToken(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: String,
    /// Bearer token -> admin email.
    pub admin_tokens: HashMap<String, String>,
    pub notify_webhook_url: Option<String>,
    pub notify_chat_id: Option<String>,
    pub json_limit_bytes: usize,
    /// Honour forwarded client addresses when keying rate limits.
    pub trusted_proxy: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: parse_var("PORT", DEFAULT_PORT)?,
            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| DEFAULT_DATABASE_PATH.to_string()),
            admin_tokens: parse_admin_tokens(&env::var("ADMIN_TOKENS").unwrap_or_default())?,
            notify_webhook_url: non_empty_var("NOTIFY_WEBHOOK_URL"),
            notify_chat_id: non_empty_var("NOTIFY_CHAT_ID"),
            json_limit_bytes: parse_var("JSON_LIMIT_BYTES", DEFAULT_JSON_LIMIT_BYTES)?,
            trusted_proxy: parse_flag("TRUSTED_PROXY", env::var("TRUSTED_PROXY").ok())?,
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
        Err(_) => Ok(default),
    }
}

pub(crate) fn parse_flag(name: &'static str, raw: Option<String>) -> Result<bool, ConfigError> {
    let Some(value) = raw else {
        return Ok(false);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" => Ok(false),
        "1" | "true" | "yes" => Ok(true),
        _ => Err(ConfigError::InvalidFlag { name, value }),
    }
}

/// Parses `ADMIN_TOKENS`, a comma separated list of `email=token` pairs.
pub(crate) fn parse_admin_tokens(raw: &str) -> Result<HashMap<String, String>, ConfigError> {
    let mut tokens = HashMap::new();
    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        match entry.split_once('=') {
            Some((email, token)) if !email.trim().is_empty() && !token.trim().is_empty() => {
                tokens.insert(token.trim().to_string(), email.trim().to_string());
            }
            _ => return Err(ConfigError::InvalidAdminToken(entry.to_string())),
        }
    }
    Ok(tokens)
}
