//! Application State
//!
//! Process-wide state shared across views: the store handle and the
//! orphan-draft marker.
//!
//! The marker records a template identifier minted during the current
//! editing session so that a later "Don't Save" can delete the orphaned
//! draft even after the editing view itself is gone. It is cleared at app
//! start and torn down on confirmed save-or-discard; it is deliberately
//! not an ambient global.

use std::sync::{Arc, Mutex, MutexGuard};

use aiscale_store::TemplateStore;

use crate::services::{CommunityBrowser, DraftController, SessionGate};

/// Marker for a draft template minted but not yet confirmed kept
#[derive(Debug, Default)]
pub struct DraftMarker {
    inner: Mutex<Option<i64>>,
}

impl DraftMarker {
    /// Create a cleared marker
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> MutexGuard<'_, Option<i64>> {
        // A poisoned lock only means a panicking thread held it; the
        // stored id is still valid.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record the identifier of a freshly minted draft
    pub fn record(&self, template_id: i64) {
        *self.guard() = Some(template_id);
    }

    /// The currently marked identifier, if any
    pub fn current(&self) -> Option<i64> {
        *self.guard()
    }

    /// Clear the marker (confirmed save-or-discard)
    pub fn clear(&self) {
        *self.guard() = None;
    }

    /// Read and clear in one step
    pub fn take(&self) -> Option<i64> {
        self.guard().take()
    }
}

/// Application state shared by all views
pub struct AppState<S: TemplateStore> {
    store: Arc<S>,
    marker: Arc<DraftMarker>,
}

impl<S: TemplateStore> AppState<S> {
    /// Create app state over a store handle; the draft marker starts
    /// cleared.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            marker: Arc::new(DraftMarker::new()),
        }
    }

    /// The store handle
    pub fn store(&self) -> Arc<S> {
        Arc::clone(&self.store)
    }

    /// The orphan-draft marker
    pub fn marker(&self) -> Arc<DraftMarker> {
        Arc::clone(&self.marker)
    }

    /// Build a draft controller bound to this state's store and marker
    pub fn draft_controller(&self) -> DraftController<S> {
        DraftController::new(self.store(), self.marker())
    }

    /// Build a session gate over this state's store
    pub fn session_gate(&self) -> SessionGate<S> {
        SessionGate::new(self.store())
    }

    /// Build a community browser over this state's store
    pub fn community_browser(&self) -> CommunityBrowser<S> {
        CommunityBrowser::new(self.store())
    }
}
