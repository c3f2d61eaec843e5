use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use doyourtasks_core::{
    enter_view, AuthClient, AuthError, AuthSession, Credentials, GateOutcome, Registration,
    SessionError, StoredTokenPair, TokenPair,
};
use std::sync::atomic::{AtomicUsize, Ordering};

struct ScriptedAuth {
    restore_succeeds: bool,
    restore_calls: AtomicUsize,
}

impl ScriptedAuth {
    fn new(restore_succeeds: bool) -> Self {
        Self {
            restore_succeeds,
            restore_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl AuthClient for ScriptedAuth {
    async fn sign_in(&self, _credentials: &Credentials) -> Result<AuthSession, AuthError> {
        unreachable!("gate never signs in");
    }

    async fn sign_up(&self, _registration: &Registration) -> Result<(), AuthError> {
        unreachable!("gate never signs up");
    }

    async fn restore_session(&self, tokens: &TokenPair) -> Result<AuthSession, AuthError> {
        self.restore_calls.fetch_add(1, Ordering::SeqCst);
        if self.restore_succeeds {
            Ok(AuthSession {
                email: "a@b.com".to_string(),
                tokens: tokens.clone(),
            })
        } else {
            Err(AuthError::Rejected {
                status: 401,
                message: "session expired".to_string(),
            })
        }
    }
}

fn pair() -> TokenPair {
    TokenPair {
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
    }
}

fn session() -> AuthSession {
    AuthSession {
        email: "a@b.com".to_string(),
        tokens: pair(),
    }
}

#[tokio::test]
async fn active_session_proceeds_without_touching_the_auth_service() {
    let auth = ScriptedAuth::new(true);
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let active = session();

    let outcome = enter_view(Some(&active), None, &auth, now).await;
    assert!(matches!(outcome, GateOutcome::Proceed(ref s) if s.email == "a@b.com"));
    assert_eq!(auth.restore_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn no_session_and_no_token_redirects_without_restore_attempt() {
    let auth = ScriptedAuth::new(true);
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();

    let outcome = enter_view(None, None, &auth, now).await;
    assert!(matches!(
        outcome,
        GateOutcome::RedirectToSignIn(SessionError::NoStoredToken)
    ));
    assert_eq!(auth.restore_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unexpired_stored_token_restores_and_proceeds() {
    let auth = ScriptedAuth::new(true);
    let issued = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let stored = StoredTokenPair::new(pair(), issued);

    let outcome = enter_view(None, Some(&stored), &auth, issued + Duration::days(1)).await;
    assert!(matches!(outcome, GateOutcome::Proceed(ref s) if s.email == "a@b.com"));
    assert_eq!(auth.restore_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn expired_stored_token_redirects_without_restore_attempt() {
    let auth = ScriptedAuth::new(true);
    let issued = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let stored = StoredTokenPair::new(pair(), issued);

    let outcome = enter_view(None, Some(&stored), &auth, issued + Duration::days(15)).await;
    assert!(matches!(
        outcome,
        GateOutcome::RedirectToSignIn(SessionError::TokenExpired)
    ));
    assert_eq!(auth.restore_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn failed_restore_redirects_instead_of_degrading() {
    let auth = ScriptedAuth::new(false);
    let issued = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let stored = StoredTokenPair::new(pair(), issued);

    let outcome = enter_view(None, Some(&stored), &auth, issued + Duration::days(1)).await;
    assert!(matches!(
        outcome,
        GateOutcome::RedirectToSignIn(SessionError::RestoreRejected(_))
    ));
}
