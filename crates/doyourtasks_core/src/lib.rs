//! Core domain logic for DoYourTasks.
//! This crate is the single source of truth for note, session, and store
//! contracts; the HTTP server and the views are thin layers over it.

pub mod auth;
pub mod client;
pub mod config;
pub mod logging;
pub mod model;
pub mod store;

pub use auth::{
    enter_view, AuthClient, AuthError, AuthSession, Credentials, GateOutcome, Registration,
    RestAuthClient, SessionError, StoredTokenPair, TokenFileError, TokenPair,
    TOKEN_LIFETIME_DAYS,
};
pub use client::{
    notes_on_day, notes_on_day_in, ApiClient, ApiClientError, NotesApi, NotesData,
};
pub use config::{Config, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Category, Note, NoteDraft, NoteId, CATEGORY_TABS};
pub use model::validate::{
    validate_note_text, validate_sign_in, validate_sign_up, ValidationError, PASSWORD_MIN_CHARS,
};
pub use store::{MemoryNoteStore, NoteStore, RestNoteStore, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
