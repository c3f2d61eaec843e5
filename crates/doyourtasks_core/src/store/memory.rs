//! In-process note store used by tests.

use super::{NoteStore, StoreResult};
use crate::model::note::{Category, Note, NoteDraft, NoteId};
use async_trait::async_trait;
use std::sync::Mutex;

/// Note store backed by a plain in-memory vector.
///
/// Mirrors the external store's observable contract: ids are assigned on
/// insert and never reused, list is an equality filter, delete of a missing
/// id succeeds.
pub struct MemoryNoteStore {
    inner: Mutex<Inner>,
}

struct Inner {
    next_id: NoteId,
    rows: Vec<Note>,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_id: 1,
                rows: Vec::new(),
            }),
        }
    }

    /// Number of rows currently held.
    pub fn len(&self) -> usize {
        self.lock().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MemoryNoteStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NoteStore for MemoryNoteStore {
    async fn list_notes(&self, owner: &str, category: Category) -> StoreResult<Vec<Note>> {
        let inner = self.lock();
        Ok(inner
            .rows
            .iter()
            .filter(|note| note.owner == owner && note.category == category)
            .cloned()
            .collect())
    }

    async fn insert_note(&self, draft: &NoteDraft) -> StoreResult<Note> {
        let mut inner = self.lock();
        let note = Note {
            id: inner.next_id,
            owner: draft.owner.clone(),
            text: draft.text.clone(),
            category: draft.category,
            due_date: draft.due_date,
        };
        inner.next_id += 1;
        inner.rows.push(note.clone());
        Ok(note)
    }

    async fn delete_note(&self, id: NoteId) -> StoreResult<()> {
        let mut inner = self.lock();
        inner.rows.retain(|note| note.id != id);
        Ok(())
    }
}
