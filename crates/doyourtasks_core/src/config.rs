//! Runtime configuration loaded from the process environment.
//!
//! # Responsibility
//! - Collect the handful of settings the server needs: bind port, hosted
//!   backend project URL, and the service key sent with every backend call.
//!
//! # Invariants
//! - Misconfiguration surfaces as a typed error; nothing here panics.

use std::error::Error;
use std::fmt::{Display, Formatter};

const PORT_VAR: &str = "DOYOURTASKS_PORT";
const BACKEND_URL_VAR: &str = "DOYOURTASKS_BACKEND_URL";
const BACKEND_KEY_VAR: &str = "DOYOURTASKS_BACKEND_KEY";
const LOG_DIR_VAR: &str = "DOYOURTASKS_LOG_DIR";

const DEFAULT_PORT: u16 = 3000;

/// Server runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// HTTP bind port.
    pub port: u16,
    /// Hosted backend project URL (table storage and auth hang off it).
    pub backend_url: String,
    /// Service key sent with every backend call.
    pub backend_key: String,
    /// Absolute directory for rolling log files; file logging is skipped
    /// when unset.
    pub log_dir: Option<String>,
}

impl Config {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup; `from_env` is this
    /// over `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup(PORT_VAR) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|err| ConfigError::Invalid {
                key: PORT_VAR,
                message: err.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            port,
            backend_url: require(&lookup, BACKEND_URL_VAR)?,
            backend_key: require(&lookup, BACKEND_KEY_VAR)?,
            log_dir: lookup(LOG_DIR_VAR),
        })
    }

    /// Base URL of the table-storage REST interface.
    pub fn store_url(&self) -> String {
        format!("{}/rest/v1", self.backend_url.trim_end_matches('/'))
    }

    /// Base URL of the auth service.
    pub fn auth_url(&self) -> String {
        format!("{}/auth/v1", self.backend_url.trim_end_matches('/'))
    }
}

fn require<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(key)),
    }
}

/// Configuration failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    Missing(&'static str),
    /// A variable is set but unparseable.
    Invalid { key: &'static str, message: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing(key) => write!(f, "required environment variable is not set: {key}"),
            Self::Invalid { key, message } => write!(f, "invalid value for {key}: {message}"),
        }
    }
}

impl Error for ConfigError {}
