use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use doyourtasks_core::{
    AuthClient, AuthError, AuthSession, Category, Credentials, MemoryNoteStore, Note, NoteDraft,
    NoteId, NoteStore, Registration, StoreError, TokenPair,
};
use doyourtasks_server::{app, AppState};

/// Auth stand-in for routes that never touch the auth service.
struct UnusedAuth;

#[async_trait]
impl AuthClient for UnusedAuth {
    async fn sign_in(&self, _credentials: &Credentials) -> Result<AuthSession, AuthError> {
        Err(AuthError::InvalidData("unused".to_string()))
    }

    async fn sign_up(&self, _registration: &Registration) -> Result<(), AuthError> {
        Err(AuthError::InvalidData("unused".to_string()))
    }

    async fn restore_session(&self, _tokens: &TokenPair) -> Result<AuthSession, AuthError> {
        Err(AuthError::InvalidData("unused".to_string()))
    }
}

/// Store stand-in where every operation fails upstream.
struct BrokenStore;

#[async_trait]
impl NoteStore for BrokenStore {
    async fn list_notes(&self, _owner: &str, _category: Category) -> Result<Vec<Note>, StoreError> {
        Err(StoreError::UpstreamStatus {
            status: 500,
            body: "boom".to_string(),
        })
    }

    async fn insert_note(&self, _draft: &NoteDraft) -> Result<Note, StoreError> {
        Err(StoreError::UpstreamStatus {
            status: 500,
            body: "boom".to_string(),
        })
    }

    async fn delete_note(&self, _id: NoteId) -> Result<(), StoreError> {
        Err(StoreError::UpstreamStatus {
            status: 500,
            body: "boom".to_string(),
        })
    }
}

fn app_over(store: Arc<dyn NoteStore>) -> Router {
    app(AppState::with_adapters(store, Arc::new(UnusedAuth)))
}

fn get_tasks(email: &str, category: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(format!("/api/tasks?email={email}&category={category}"))
        .body(Body::empty())
        .expect("request")
}

fn post_task(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/tasks")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn delete_task(body: Value) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri("/api/tasks")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&bytes).expect("JSON body")
}

async fn seed(store: &MemoryNoteStore, owner: &str, text: &str, category: Category) -> Note {
    store
        .insert_note(&NoteDraft {
            owner: owner.to_string(),
            text: text.to_string(),
            category,
            due_date: None,
        })
        .await
        .expect("seed note")
}

#[tokio::test]
async fn list_returns_only_notes_matching_owner_and_category() {
    let store = Arc::new(MemoryNoteStore::new());
    let mine = seed(&store, "a@b.com", "Buy milk", Category::Work).await;
    seed(&store, "a@b.com", "Call mom", Category::Personal).await;
    seed(&store, "other@b.com", "Buy milk", Category::Work).await;
    let app = app_over(store);

    let response = app.oneshot(get_tasks("a@b.com", "2")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let rows = body.as_array().expect("array body");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], mine.id);
    assert_eq!(rows[0]["user_email"], "a@b.com");
    assert_eq!(rows[0]["text"], "Buy milk");
}

#[tokio::test]
async fn create_returns_created_row_then_list_includes_it() {
    let store = Arc::new(MemoryNoteStore::new());
    let app = app_over(store);

    let response = app
        .clone()
        .oneshot(post_task(json!({
            "user_email": "a@b.com",
            "text": "Buy milk",
            "category": 2,
            "due_date": "2024-03-01T00:00:00Z",
        })))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    let id = created["id"].as_i64().expect("assigned id");
    assert!(id >= 1);
    assert_eq!(created["text"], "Buy milk");
    assert_eq!(created["category"], 2);
    assert_eq!(created["due_date"], "2024-03-01T00:00:00Z");

    let matching = app
        .clone()
        .oneshot(get_tasks("a@b.com", "2"))
        .await
        .expect("response");
    let rows = body_json(matching).await;
    assert!(rows
        .as_array()
        .expect("array body")
        .iter()
        .any(|row| row["id"] == id));

    let other_tab = app.oneshot(get_tasks("a@b.com", "3")).await.expect("response");
    assert_eq!(
        body_json(other_tab).await.as_array().expect("array body").len(),
        0
    );
}

#[tokio::test]
async fn non_numeric_category_is_rejected_with_400() {
    let store = Arc::new(MemoryNoteStore::new());
    let app = app_over(store);

    let response = app.oneshot(get_tasks("a@b.com", "x")).await.expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("category"));
}

#[tokio::test]
async fn out_of_range_category_on_create_is_rejected_with_400() {
    let store = Arc::new(MemoryNoteStore::new());
    let app = app_over(store.clone());

    let response = app
        .oneshot(post_task(json!({
            "user_email": "a@b.com",
            "text": "Buy milk",
            "category": 9,
        })))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(store.is_empty(), "rejected create must not store a row");
}

#[tokio::test]
async fn unparseable_due_date_is_rejected_with_400() {
    let store = Arc::new(MemoryNoteStore::new());
    let app = app_over(store);

    let response = app
        .oneshot(post_task(json!({
            "user_email": "a@b.com",
            "text": "Buy milk",
            "category": 2,
            "due_date": "next tuesday",
        })))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn identical_creates_yield_distinct_notes_each_deletable() {
    let store = Arc::new(MemoryNoteStore::new());
    let app = app_over(store);
    let payload = json!({
        "user_email": "a@b.com",
        "text": "Buy milk",
        "category": 2,
    });

    let first = body_json(
        app.clone()
            .oneshot(post_task(payload.clone()))
            .await
            .expect("response"),
    )
    .await;
    let second = body_json(
        app.clone()
            .oneshot(post_task(payload))
            .await
            .expect("response"),
    )
    .await;
    assert_ne!(first["id"], second["id"]);

    let response = app
        .clone()
        .oneshot(delete_task(json!({ "id": first["id"] })))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let remaining = body_json(
        app.oneshot(get_tasks("a@b.com", "2"))
            .await
            .expect("response"),
    )
    .await;
    let rows = remaining.as_array().expect("array body");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], second["id"]);
}

#[tokio::test]
async fn delete_of_missing_id_still_confirms() {
    let store = Arc::new(MemoryNoteStore::new());
    let app = app_over(store);

    let response = app
        .oneshot(delete_task(json!({ "id": 999 })))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["success"].is_string());
}

#[tokio::test]
async fn store_failures_map_uniformly_to_502() {
    let app = app_over(Arc::new(BrokenStore));

    let listed = app
        .clone()
        .oneshot(get_tasks("a@b.com", "2"))
        .await
        .expect("response");
    assert_eq!(listed.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(listed).await["error"], "Server error");

    let created = app
        .clone()
        .oneshot(post_task(json!({
            "user_email": "a@b.com",
            "text": "Buy milk",
            "category": 2,
        })))
        .await
        .expect("response");
    assert_eq!(created.status(), StatusCode::BAD_GATEWAY);

    let deleted = app
        .oneshot(delete_task(json!({ "id": 1 })))
        .await
        .expect("response");
    assert_eq!(deleted.status(), StatusCode::BAD_GATEWAY);
}
