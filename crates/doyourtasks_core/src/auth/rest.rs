//! REST binding to the hosted auth service.

use super::{AuthClient, AuthError, AuthSession, Credentials, Registration, TokenPair};
use async_trait::async_trait;
use log::{debug, warn};
use serde::Deserialize;
use serde_json::json;

const REJECTION_MESSAGE_MAX_CHARS: usize = 200;

/// Client for the hosted auth service endpoints this application consumes.
pub struct RestAuthClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Deserialize)]
struct SessionPayload {
    access_token: String,
    refresh_token: String,
    user: UserPayload,
}

#[derive(Deserialize)]
struct UserPayload {
    email: String,
}

impl RestAuthClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.trim_end_matches('/'))
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.header("apikey", &self.api_key)
    }

    async fn token_grant(&self, grant_type: &str, body: serde_json::Value) -> Result<AuthSession, AuthError> {
        let response = self
            .authed(self.http.post(self.endpoint("token")))
            .query(&[("grant_type", grant_type)])
            .json(&body)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        let payload = response.json::<SessionPayload>().await?;
        Ok(AuthSession {
            email: payload.user.email,
            tokens: TokenPair {
                access_token: payload.access_token,
                refresh_token: payload.refresh_token,
            },
        })
    }
}

#[async_trait]
impl AuthClient for RestAuthClient {
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthSession, AuthError> {
        let session = self
            .token_grant(
                "password",
                json!({
                    "email": credentials.email,
                    "password": credentials.password,
                }),
            )
            .await?;
        debug!("event=sign_in module=auth status=ok");
        Ok(session)
    }

    async fn sign_up(&self, registration: &Registration) -> Result<(), AuthError> {
        let response = self
            .authed(self.http.post(self.endpoint("signup")))
            .json(&json!({
                "email": registration.email,
                "password": registration.password,
                "data": { "username": registration.username },
            }))
            .send()
            .await?;
        ensure_success(response).await?;
        debug!("event=sign_up module=auth status=ok");
        Ok(())
    }

    async fn restore_session(&self, tokens: &TokenPair) -> Result<AuthSession, AuthError> {
        // Probe the access token first; fall back to the refresh grant when
        // the access token has gone stale.
        let response = self
            .authed(self.http.get(self.endpoint("user")))
            .bearer_auth(&tokens.access_token)
            .send()
            .await?;
        if response.status().is_success() {
            let user = response.json::<UserPayload>().await?;
            return Ok(AuthSession {
                email: user.email,
                tokens: tokens.clone(),
            });
        }

        warn!("event=session_restore module=auth status=retry reason=stale_access_token");
        self.token_grant(
            "refresh_token",
            json!({ "refresh_token": tokens.refresh_token }),
        )
        .await
    }
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, AuthError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(AuthError::Rejected {
        status: status.as_u16(),
        message: summarize(&body),
    })
}

/// Flattens and caps an upstream error body so it is safe to log and echo.
fn summarize(body: &str) -> String {
    let flat = body.replace(['\n', '\r'], " ");
    let trimmed = flat.trim();
    let mut capped: String = trimmed.chars().take(REJECTION_MESSAGE_MAX_CHARS).collect();
    if trimmed.chars().count() > REJECTION_MESSAGE_MAX_CHARS {
        capped.push_str("...");
    }
    capped
}
