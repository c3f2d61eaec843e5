//! Auth service contracts and persisted session state.
//!
//! # Responsibility
//! - Define the session/token types shared by the gate, the views, and the
//!   auth forwarding routes.
//! - Define the adapter seam for the external auth service; credential
//!   validation itself stays on that service's side.
//!
//! # Invariants
//! - A persisted token pair older than [`TOKEN_LIFETIME_DAYS`] is treated
//!   as absent, never as restorable.
//! - Restoration failures always surface as a redirect decision in the
//!   gate, never as a partial session.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::Path;

pub mod gate;
pub mod rest;

pub use gate::{enter_view, GateOutcome, SessionError};
pub use rest::RestAuthClient;

/// Fixed lifetime of a persisted token pair, matching the original cookie
/// expiry.
pub const TOKEN_LIFETIME_DAYS: i64 = 15;

/// Access/refresh token pair issued by the auth service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Token pair persisted client-side together with its issuance instant.
///
/// This is the JSON-cookie analog: one small record, fixed lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredTokenPair {
    #[serde(flatten)]
    pub tokens: TokenPair,
    pub issued_at: DateTime<Utc>,
}

impl StoredTokenPair {
    /// Wraps a pair with the instant it was issued.
    pub fn new(tokens: TokenPair, issued_at: DateTime<Utc>) -> Self {
        Self { tokens, issued_at }
    }

    /// Whether the fixed token lifetime has elapsed at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.issued_at) >= Duration::days(TOKEN_LIFETIME_DAYS)
    }

    /// Reads a persisted pair. A missing file is `None`, not an error.
    pub fn load(path: &Path) -> Result<Option<Self>, TokenFileError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(TokenFileError::Io(err)),
        };
        let stored = serde_json::from_str(&raw)?;
        Ok(Some(stored))
    }

    /// Writes the pair as JSON, replacing any previous file.
    pub fn save(&self, path: &Path) -> Result<(), TokenFileError> {
        let raw = serde_json::to_string(self)?;
        std::fs::write(path, raw)?;
        Ok(())
    }
}

/// Failure reading or writing the persisted token file.
#[derive(Debug)]
pub enum TokenFileError {
    Io(io::Error),
    Format(serde_json::Error),
}

impl Display for TokenFileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "token file access failed: {err}"),
            Self::Format(err) => write!(f, "token file is not valid JSON: {err}"),
        }
    }
}

impl Error for TokenFileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Format(err) => Some(err),
        }
    }
}

impl From<io::Error> for TokenFileError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for TokenFileError {
    fn from(value: serde_json::Error) -> Self {
        Self::Format(value)
    }
}

/// An authenticated session: the user's identity plus the token pair
/// backing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub email: String,
    #[serde(flatten)]
    pub tokens: TokenPair,
}

/// Sign-in form contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Sign-up form contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub username: String,
}

/// Failure reported by the external auth service.
#[derive(Debug)]
pub enum AuthError {
    /// The request never completed (connect, timeout, decode).
    Transport(reqwest::Error),
    /// The service answered with a non-success status.
    Rejected { status: u16, message: String },
    /// The service answered successfully but the payload was unusable.
    InvalidData(String),
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "auth request failed: {err}"),
            Self::Rejected { status, message } => {
                write!(f, "auth service rejected request with status {status}: {message}")
            }
            Self::InvalidData(message) => write!(f, "invalid auth payload: {message}"),
        }
    }
}

impl Error for AuthError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            Self::Rejected { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value)
    }
}

/// Adapter interface for the external auth service.
///
/// Only the operations this application consumes: credential exchange,
/// account creation, and session restoration from a stored pair.
#[async_trait::async_trait]
pub trait AuthClient: Send + Sync {
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthSession, AuthError>;
    async fn sign_up(&self, registration: &Registration) -> Result<(), AuthError>;
    async fn restore_session(&self, tokens: &TokenPair) -> Result<AuthSession, AuthError>;
}
