//! Shared notes data layer for the task-list and calendar views.
//!
//! # Responsibility
//! - Provide the one fetch/create/delete surface both views consume.
//! - Hold the in-memory copy of the active category's notes.
//! - Derive the calendar-day subset as a pure projection of that copy.
//!
//! # Invariants
//! - Switching category wholesale-replaces the in-memory set; there is no
//!   incremental merge.
//! - A failed fetch leaves the previous set in place; failed create/delete
//!   leaves state unchanged.
//! - Day selection never triggers an API call; the calendar subset is
//!   recomputed from the already-fetched base list.

use crate::model::note::{Category, Note, NoteDraft, NoteId};
use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure surfaced to the views; a single message string, per the alert
/// behavior of the presentation layer.
#[derive(Debug)]
pub enum ApiClientError {
    /// The request never completed (connect, timeout, decode).
    Transport(reqwest::Error),
    /// The API answered with an error response.
    Api { status: u16, message: String },
}

impl Display for ApiClientError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "request failed: {err}"),
            Self::Api { message, .. } => write!(f, "{message}"),
        }
    }
}

impl Error for ApiClientError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            Self::Api { .. } => None,
        }
    }
}

impl From<reqwest::Error> for ApiClientError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value)
    }
}

/// The Notes API surface as the views see it.
///
/// [`ApiClient`] is the HTTP implementation; tests substitute their own.
#[async_trait]
pub trait NotesApi: Send + Sync {
    async fn fetch_notes(&self, owner: &str, category: Category)
        -> Result<Vec<Note>, ApiClientError>;
    async fn create_note(&self, draft: &NoteDraft) -> Result<Note, ApiClientError>;
    async fn delete_note(&self, id: NoteId) -> Result<(), ApiClientError>;
}

/// HTTP client for the Notes API.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl ApiClient {
    /// Creates a client for the given server base URL (scheme + host + port).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn tasks_url(&self) -> String {
        format!("{}/api/tasks", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl NotesApi for ApiClient {
    async fn fetch_notes(
        &self,
        owner: &str,
        category: Category,
    ) -> Result<Vec<Note>, ApiClientError> {
        let response = self
            .http
            .get(self.tasks_url())
            .query(&[
                ("email", owner.to_string()),
                ("category", category.as_i64().to_string()),
            ])
            .send()
            .await?;
        let response = ensure_success(response).await?;
        Ok(response.json::<Vec<Note>>().await?)
    }

    async fn create_note(&self, draft: &NoteDraft) -> Result<Note, ApiClientError> {
        let response = self.http.post(self.tasks_url()).json(draft).send().await?;
        let response = ensure_success(response).await?;
        Ok(response.json::<Note>().await?)
    }

    async fn delete_note(&self, id: NoteId) -> Result<(), ApiClientError> {
        let response = self
            .http
            .delete(self.tasks_url())
            .json(&serde_json::json!({ "id": id }))
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => "request failed".to_string(),
    };
    Err(ApiClientError::Api {
        status: status.as_u16(),
        message,
    })
}

/// In-memory note state for one signed-in user, shared by both views.
#[derive(Debug)]
pub struct NotesData {
    owner: String,
    category: Category,
    notes: Vec<Note>,
}

impl NotesData {
    /// Creates empty state on the default (All) tab.
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            category: Category::All,
            notes: Vec::new(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// The most recently fetched list for the active category.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Switches the active tab and replaces the set from the API.
    ///
    /// On failure the previous set stays in place (the tab still switches,
    /// matching the original views' behavior).
    pub async fn switch_category<A>(
        &mut self,
        api: &A,
        category: Category,
    ) -> Result<(), ApiClientError>
    where
        A: NotesApi + ?Sized,
    {
        self.category = category;
        let fetched = api.fetch_notes(&self.owner, category).await?;
        self.notes = fetched;
        Ok(())
    }

    /// Re-fetches the active category.
    pub async fn refresh<A>(&mut self, api: &A) -> Result<(), ApiClientError>
    where
        A: NotesApi + ?Sized,
    {
        let fetched = api.fetch_notes(&self.owner, self.category).await?;
        self.notes = fetched;
        Ok(())
    }

    /// Creates a note for this owner and re-fetches the active tab.
    pub async fn create<A>(
        &mut self,
        api: &A,
        text: impl Into<String>,
        category: Category,
        due_date: Option<DateTime<Utc>>,
    ) -> Result<Note, ApiClientError>
    where
        A: NotesApi + ?Sized,
    {
        let draft = NoteDraft {
            owner: self.owner.clone(),
            text: text.into(),
            category,
            due_date,
        };
        let created = api.create_note(&draft).await?;
        self.refresh(api).await?;
        Ok(created)
    }

    /// Deletes one note and re-fetches the active tab.
    pub async fn delete<A>(&mut self, api: &A, id: NoteId) -> Result<(), ApiClientError>
    where
        A: NotesApi + ?Sized,
    {
        api.delete_note(id).await?;
        self.refresh(api).await
    }
}

/// Returns the notes whose due date falls on `day` in the viewer's local
/// time zone. Notes without a due date never match.
pub fn notes_on_day(notes: &[Note], day: NaiveDate) -> Vec<Note> {
    notes_on_day_in(notes, day, &Local)
}

/// Timezone-parameterized variant of [`notes_on_day`]; the calendar view
/// uses local time, tests pin a fixed offset.
pub fn notes_on_day_in<Tz: TimeZone>(notes: &[Note], day: NaiveDate, tz: &Tz) -> Vec<Note> {
    notes
        .iter()
        .filter(|note| {
            note.due_date
                .is_some_and(|due| due.with_timezone(tz).date_naive() == day)
        })
        .cloned()
        .collect()
}
