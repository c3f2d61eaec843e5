//! REST binding to the hosted table storage.
//!
//! # Responsibility
//! - Translate store operations into equality-filtered REST calls against
//!   the managed `note` collection.
//!
//! # Invariants
//! - Every request carries the service key (`apikey` + bearer headers).
//! - Inserts ask the store to echo the created row back so callers learn
//!   the assigned id without re-listing.

use super::{NoteStore, StoreError, StoreResult};
use crate::model::note::{Category, Note, NoteDraft, NoteId};
use async_trait::async_trait;
use log::{debug, error};

const NOTE_TABLE: &str = "note";

/// Client for the hosted table-storage REST interface.
pub struct RestNoteStore {
    http: reqwest::Client,
    base_url: String,
    service_key: String,
}

impl RestNoteStore {
    /// Creates a store client for the given REST base URL (the segment the
    /// table name is appended to) and service key.
    pub fn new(base_url: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            service_key: service_key.into(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/{NOTE_TABLE}", self.base_url.trim_end_matches('/'))
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }
}

#[async_trait]
impl NoteStore for RestNoteStore {
    async fn list_notes(&self, owner: &str, category: Category) -> StoreResult<Vec<Note>> {
        let response = self
            .authed(self.http.get(self.table_url()).query(&[
                ("select", "*".to_string()),
                ("user_email", format!("eq.{owner}")),
                ("category", format!("eq.{}", category.as_i64())),
            ]))
            .send()
            .await?;
        let response = ensure_success("notes_list", response).await?;
        let notes = response.json::<Vec<Note>>().await?;
        debug!(
            "event=notes_list module=store status=ok count={}",
            notes.len()
        );
        Ok(notes)
    }

    async fn insert_note(&self, draft: &NoteDraft) -> StoreResult<Note> {
        // The store's insert takes a batch; we always send exactly one row
        // and expect exactly one echoed back.
        let response = self
            .authed(self.http.post(self.table_url()))
            .header("Prefer", "return=representation")
            .json(&[draft])
            .send()
            .await?;
        let response = ensure_success("note_insert", response).await?;
        let mut created = response.json::<Vec<Note>>().await?;
        match created.pop() {
            Some(note) if created.is_empty() => {
                debug!("event=note_insert module=store status=ok id={}", note.id);
                Ok(note)
            }
            Some(_) => Err(StoreError::InvalidData(
                "insert echoed more than one row".to_string(),
            )),
            None => Err(StoreError::InvalidData(
                "insert echoed no created row".to_string(),
            )),
        }
    }

    async fn delete_note(&self, id: NoteId) -> StoreResult<()> {
        let response = self
            .authed(
                self.http
                    .delete(self.table_url())
                    .query(&[("id", format!("eq.{id}"))]),
            )
            .send()
            .await?;
        ensure_success("note_delete", response).await?;
        debug!("event=note_delete module=store status=ok id={id}");
        Ok(())
    }
}

async fn ensure_success(
    operation: &'static str,
    response: reqwest::Response,
) -> StoreResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    error!(
        "event={operation} module=store status=error upstream_status={}",
        status.as_u16()
    );
    Err(StoreError::UpstreamStatus {
        status: status.as_u16(),
        body,
    })
}
