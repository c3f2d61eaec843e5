//! Route handlers for the note CRUD and auth forwarding operations.
//!
//! Each handler performs exactly one adapter call; there is no
//! cross-operation coordination and nothing is retried.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::str::FromStr;
use std::sync::Arc;

use doyourtasks_core::model::note::due_date_wire;
use doyourtasks_core::{
    validate_sign_in, validate_sign_up, Category, Credentials, NoteDraft, NoteId, Registration,
    ValidationError,
};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ListParams {
    email: String,
    category: String,
}

/// GET /api/tasks: all notes matching owner and category.
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let category = Category::from_str(&params.category)?;
    let notes = state.store.list_notes(&params.email, category).await?;
    Ok(Json(notes))
}

#[derive(Deserialize)]
pub struct CreateTaskRequest {
    user_email: String,
    text: String,
    category: i64,
    #[serde(default)]
    due_date: Option<String>,
}

/// POST /api/tasks: insert one note, echoing the created row (with its
/// assigned id) back to the caller.
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateTaskRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let category = Category::from_i64(body.category)
        .ok_or_else(|| ValidationError::UnknownCategory(body.category.to_string()))?;
    let due_date = body
        .due_date
        .as_deref()
        .map(due_date_wire::parse)
        .transpose()
        .map_err(ValidationError::InvalidDueDate)?;

    let draft = NoteDraft {
        owner: body.user_email,
        text: body.text,
        category,
        due_date,
    };
    let created = state.store.insert_note(&draft).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[derive(Deserialize)]
pub struct DeleteTaskRequest {
    id: NoteId,
}

/// DELETE /api/tasks: remove one note by id. A missing id still confirms.
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    Json(body): Json<DeleteTaskRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.store.delete_note(body.id).await?;
    Ok(Json(json!({ "success": "Note deleted" })))
}

#[derive(Deserialize)]
pub struct SignInRequest {
    email: String,
    password: String,
}

/// POST /api/auth/sign_in: forward a credential exchange to the auth
/// service and return the issued session.
pub async fn sign_in(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SignInRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_sign_in(&body.email, &body.password)?;
    let session = state
        .auth
        .sign_in(&Credentials {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(Json(session))
}

#[derive(Deserialize)]
pub struct SignUpRequest {
    email: String,
    password: String,
    username: String,
}

/// POST /api/auth/sign_up: forward account creation to the auth service.
pub async fn sign_up(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SignUpRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_sign_up(&body.email, &body.password, &body.username)?;
    state
        .auth
        .sign_up(&Registration {
            email: body.email,
            password: body.password,
            username: body.username,
        })
        .await?;
    Ok(Json(json!({ "success": "Account created" })))
}
