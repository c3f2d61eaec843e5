//! Shared handler state.

use doyourtasks_core::{AuthClient, Config, NoteStore, RestAuthClient, RestNoteStore};
use std::sync::Arc;

/// Adapter handles shared by every request.
pub struct AppState {
    pub store: Arc<dyn NoteStore>,
    pub auth: Arc<dyn AuthClient>,
}

impl AppState {
    /// Wires the REST adapters against the configured hosted backend.
    pub fn from_config(config: &Config) -> Arc<Self> {
        Self::with_adapters(
            Arc::new(RestNoteStore::new(
                config.store_url(),
                config.backend_key.clone(),
            )),
            Arc::new(RestAuthClient::new(
                config.auth_url(),
                config.backend_key.clone(),
            )),
        )
    }

    /// Wires arbitrary adapter implementations; tests use this seam.
    pub fn with_adapters(store: Arc<dyn NoteStore>, auth: Arc<dyn AuthClient>) -> Arc<Self> {
        Arc::new(Self { store, auth })
    }
}
