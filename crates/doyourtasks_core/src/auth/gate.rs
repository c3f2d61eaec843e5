//! Per-view session gate.
//!
//! # Responsibility
//! - Decide, on view entry, whether the view may fetch data or must send
//!   the user to sign-in.
//!
//! # Invariants
//! - No data fetch happens before the gate returns [`GateOutcome::Proceed`].
//! - A token that fails to restore always redirects; there is no degraded
//!   or partial view state.

use super::{AuthClient, AuthError, AuthSession, StoredTokenPair};
use chrono::{DateTime, Utc};
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Why the gate sent the user back to sign-in.
#[derive(Debug)]
pub enum SessionError {
    /// Neither an in-memory session nor a persisted token exists.
    NoStoredToken,
    /// A persisted token exists but its fixed lifetime has elapsed.
    TokenExpired,
    /// The auth service refused to restore a session from the token.
    RestoreRejected(AuthError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoStoredToken => write!(f, "no stored session token"),
            Self::TokenExpired => write!(f, "stored session token has expired"),
            Self::RestoreRejected(err) => write!(f, "session restore failed: {err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::RestoreRejected(err) => Some(err),
            Self::NoStoredToken | Self::TokenExpired => None,
        }
    }
}

/// Gate decision for one view entry.
#[derive(Debug)]
pub enum GateOutcome {
    /// The view may perform its initial fetch with this session.
    Proceed(AuthSession),
    /// The view must navigate to sign-in and fetch nothing.
    RedirectToSignIn(SessionError),
}

/// Runs the session gate for one view entry.
///
/// Decision order: an already-established session wins; otherwise an
/// unexpired persisted token is exchanged for a session via the auth
/// service; otherwise the user is redirected. `now` is passed in so the
/// expiry check stays deterministic.
pub async fn enter_view(
    active: Option<&AuthSession>,
    stored: Option<&StoredTokenPair>,
    auth: &dyn AuthClient,
    now: DateTime<Utc>,
) -> GateOutcome {
    if let Some(session) = active {
        return GateOutcome::Proceed(session.clone());
    }

    let Some(stored) = stored else {
        return GateOutcome::RedirectToSignIn(SessionError::NoStoredToken);
    };
    if stored.is_expired(now) {
        return GateOutcome::RedirectToSignIn(SessionError::TokenExpired);
    }

    match auth.restore_session(&stored.tokens).await {
        Ok(session) => GateOutcome::Proceed(session),
        Err(err) => {
            warn!("event=session_gate module=auth status=redirect reason={err}");
            GateOutcome::RedirectToSignIn(SessionError::RestoreRejected(err))
        }
    }
}
