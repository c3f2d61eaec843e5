//! Note store contracts over the hosted table storage.
//!
//! # Responsibility
//! - Define the adapter seam for the external `note` collection: equality
//!   filtered select, insert-one, filtered delete.
//! - Keep transport details inside the adapter implementations.
//!
//! # Invariants
//! - `delete` treats zero matched rows as success.
//! - `insert` returns the created row, including its store-assigned id.
//! - No operation retries; every store failure surfaces as [`StoreError`].

use crate::model::note::{Category, Note, NoteDraft, NoteId};
use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod rest;

pub use memory::MemoryNoteStore;
pub use rest::RestNoteStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure reported by the external datastore on read, insert, or delete.
///
/// No distinction is drawn between "not found" and genuine server failure;
/// both surface through the same variant set.
#[derive(Debug)]
pub enum StoreError {
    /// The request never completed (connect, timeout, decode).
    Transport(reqwest::Error),
    /// The store answered with a non-success status.
    UpstreamStatus { status: u16, body: String },
    /// The store answered successfully but the payload was unusable.
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "store request failed: {err}"),
            Self::UpstreamStatus { status, body } => {
                write!(f, "store rejected request with status {status}: {body}")
            }
            Self::InvalidData(message) => write!(f, "invalid store payload: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            Self::UpstreamStatus { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value)
    }
}

/// Adapter interface over the external `note` collection.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Returns every note whose owner and category both match, in
    /// unspecified order. No pagination; the full matching set comes back.
    async fn list_notes(&self, owner: &str, category: Category) -> StoreResult<Vec<Note>>;

    /// Appends one row and returns it with its assigned id.
    async fn insert_note(&self, draft: &NoteDraft) -> StoreResult<Note>;

    /// Removes at most one row. Zero matches is success, not an error.
    async fn delete_note(&self, id: NoteId) -> StoreResult<()>;
}
