/*
 * Responsibility
 * - Load settings from the environment (.env supported via dotenvy)
 * - Validate values (invalid values fail startup)
 * - Broker URL is optional: without it the forwarder has no client and
 *   guarded routes answer with a wiring error
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use serde_json::Value;

use crate::services::auth::ValidationOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }

    fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

const DEFAULT_VALIDATION_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    // Global bound for a whole HTTP request
    pub request_timeout: Duration,

    // Broker used for the validate-authorization call
    pub valkey_url: Option<String>,

    // None: wait for the remote verdict indefinitely
    pub validation_timeout: Option<Duration>,
    // Forwarded as `options` on every validation packet
    pub validation_options: Option<ValidationOptions>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = match std::env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            Err(_) => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let request_timeout_secs = match std::env::var("HTTP_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::Invalid("HTTP_REQUEST_TIMEOUT_SECS"))?,
            Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
        };
        let request_timeout = Duration::from_secs(request_timeout_secs);

        let valkey_url = std::env::var("VALKEY_URL")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let validation_timeout = parse_timeout_ms(
            std::env::var("AUTH_VALIDATION_TIMEOUT_MS").ok().as_deref(),
        )?;

        let validation_options = parse_options(
            std::env::var("AUTH_VALIDATION_OPTIONS").ok().as_deref(),
        )?;

        Ok(Self {
            addr,
            app_env,
            request_timeout,
            valkey_url,
            validation_timeout,
            validation_options,
        })
    }
}

// Unset -> default, `0` -> disabled.
fn parse_timeout_ms(raw: Option<&str>) -> Result<Option<Duration>, ConfigError> {
    let ms = match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => s
            .parse::<u64>()
            .map_err(|_| ConfigError::Invalid("AUTH_VALIDATION_TIMEOUT_MS"))?,
        None => DEFAULT_VALIDATION_TIMEOUT_MS,
    };

    Ok((ms > 0).then(|| Duration::from_millis(ms)))
}

// Must be a JSON object when present.
fn parse_options(raw: Option<&str>) -> Result<Option<ValidationOptions>, ConfigError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(options)) => Ok(Some(options)),
        _ => Err(ConfigError::Invalid("AUTH_VALIDATION_OPTIONS")),
    }
}
