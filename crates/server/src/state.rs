//! Application state shared across handlers.

use std::sync::Arc;

use crate::db::WaifuStore;
use crate::lookup::CharacterLookup;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// record store and the character lookup service.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: WaifuStore,
    lookup: Arc<dyn CharacterLookup>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `store` - Record store (`PostgreSQL` or in-memory)
    /// * `lookup` - Character lookup service
    #[must_use]
    pub fn new(store: WaifuStore, lookup: Arc<dyn CharacterLookup>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { store, lookup }),
        }
    }

    /// Get a reference to the record store.
    #[must_use]
    pub fn store(&self) -> &WaifuStore {
        &self.inner.store
    }

    /// Get a reference to the character lookup service.
    #[must_use]
    pub fn lookup(&self) -> &dyn CharacterLookup {
        self.inner.lookup.as_ref()
    }
}
