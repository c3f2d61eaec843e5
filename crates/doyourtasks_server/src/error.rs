//! HTTP error mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use doyourtasks_core::{AuthError, StoreError, ValidationError};
use log::error;
use serde_json::json;
use thiserror::Error;

/// Request failure as surfaced to API clients.
///
/// The response body carries a generic message; the underlying cause is
/// logged server-side only.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Server error")]
    Store(#[from] StoreError),

    #[error("Authentication failed")]
    Auth(#[from] AuthError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(_) => StatusCode::BAD_GATEWAY,
            ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
        };
        match &self {
            ApiError::Validation(_) => {}
            ApiError::Store(inner) => {
                error!("event=api_request module=server status=error kind=store error={inner}");
            }
            ApiError::Auth(inner) => {
                error!("event=api_request module=server status=error kind=auth error={inner}");
            }
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
