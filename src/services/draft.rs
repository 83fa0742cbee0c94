//! Draft Lifecycle Controller
//!
//! Orchestrates the life of a template draft: opening an existing
//! template for editing, the two-phase save pipeline (header upsert, then
//! concurrent item submissions, then re-fetch of server-confirmed state),
//! and discard of an orphaned draft.
//!
//! The store is the sole authority for identifiers and version numbers;
//! this controller only ever adopts the values the store returns.

use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{debug, warn};

use aiscale_store::{StoreError, TemplateForm, TemplateStore};

use crate::models::{DraftHeader, PresetScale};
use crate::services::items::ItemsEditor;
use crate::state::DraftMarker;
use crate::utils::error::{AppError, AppResult};

/// Phase of the draft lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftPhase {
    /// Nothing in flight
    Idle,
    /// Template details are being fetched
    Fetching,
    /// A save pipeline is running; further saves are rejected
    Saving,
}

/// Store-confirmed identifiers after a successful save
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveReceipt {
    pub template_id: i64,
    pub version: i64,
}

/// Controller for one template draft being edited
pub struct DraftController<S: TemplateStore> {
    store: Arc<S>,
    marker: Arc<DraftMarker>,
    header: DraftHeader,
    items: ItemsEditor,
    template_id: Option<i64>,
    version: i64,
    phase: DraftPhase,
    /// Latch: the editor is seeded at most once per fetch cycle, so a
    /// slow-resolving fetch cannot clobber edits made after seeding.
    seeded: bool,
    last_error: Option<String>,
}

impl<S: TemplateStore> DraftController<S> {
    /// Create a controller for a brand-new draft
    pub fn new(store: Arc<S>, marker: Arc<DraftMarker>) -> Self {
        Self {
            store,
            marker,
            header: DraftHeader::default(),
            items: ItemsEditor::new(),
            template_id: None,
            version: 0,
            phase: DraftPhase::Idle,
            seeded: false,
            last_error: None,
        }
    }

    /// Header fields of the form
    pub fn header(&self) -> &DraftHeader {
        &self.header
    }

    /// Mutable header fields (bound to form inputs)
    pub fn header_mut(&mut self) -> &mut DraftHeader {
        &mut self.header
    }

    /// The use-level rows
    pub fn items(&self) -> &ItemsEditor {
        &self.items
    }

    /// Mutable access to the rows
    pub fn items_mut(&mut self) -> &mut ItemsEditor {
        &mut self.items
    }

    /// Store-assigned identifier, absent until the first save
    pub fn template_id(&self) -> Option<i64> {
        self.template_id
    }

    /// Last store-confirmed version
    pub fn version(&self) -> i64 {
        self.version
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> DraftPhase {
        self.phase
    }

    /// True while a save pipeline is in flight
    pub fn is_saving(&self) -> bool {
        self.phase == DraftPhase::Saving
    }

    /// Message of the most recent failure, if any
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Load rows from a named preset, discarding the current collection
    pub fn apply_preset(&mut self, preset: &PresetScale) {
        if self.items.replace_from_preset(preset) {
            self.header.name = preset.name.clone();
        }
    }

    /// Open a template for editing.
    ///
    /// `None` means a new draft: defaults are used and no fetch is
    /// issued. `Some(id)` fetches details from the store, populates the
    /// header, and seeds the items editor exactly once per fetch cycle
    /// (the latch resets when a different identifier is opened).
    pub async fn open(&mut self, template_id: Option<i64>) -> AppResult<()> {
        let Some(id) = template_id else {
            // Fresh draft: any id still marked belongs to an earlier
            // editing session and must not be deleted from here.
            self.marker.clear();
            self.header = DraftHeader::default();
            self.items = ItemsEditor::new();
            self.template_id = None;
            self.version = 0;
            self.seeded = false;
            self.phase = DraftPhase::Idle;
            self.last_error = None;
            return Ok(());
        };

        if self.template_id != Some(id) {
            self.seeded = false;
        }
        self.phase = DraftPhase::Fetching;
        self.last_error = None;

        match self.store.template_details(id).await {
            Ok(details) => {
                self.header = DraftHeader::from_details(&details);
                self.template_id = Some(details.id);
                self.version = details.version;
                if !self.seeded {
                    self.items.seed(&details.template_items);
                    self.seeded = true;
                }
                self.phase = DraftPhase::Idle;
                Ok(())
            }
            Err(err) => {
                // Header fields keep their prior in-memory values.
                self.phase = DraftPhase::Idle;
                let message = err.to_string();
                self.last_error = Some(message.clone());
                Err(AppError::LoadFailed(message))
            }
        }
    }

    /// Run the save pipeline.
    ///
    /// Phase 1 submits the header to the upsert endpoint; a failure
    /// aborts the whole save and no item calls are issued. Phase 2
    /// submits every current row concurrently to the item-create
    /// endpoint, addressed to the identifier phase 1 returned; the save
    /// succeeds only if all of them do. Rows that did persist are not
    /// rolled back on partial failure. On full success the controller
    /// adopts the store-confirmed identifier and version and re-fetches
    /// so the editor reflects server truth rather than the local echo.
    pub async fn save(&mut self, username: &str) -> AppResult<SaveReceipt> {
        if self.is_saving() {
            return Err(AppError::SaveInFlight);
        }
        self.phase = DraftPhase::Saving;
        self.last_error = None;

        let form = TemplateForm {
            username: username.to_string(),
            template_id: self.template_id,
            name: self.header.name.clone(),
            subject_code: self.header.subject_code.clone(),
            year: self.header.year,
            semester: self.header.semester,
            version: self.version,
            scope: self.header.scope.clone(),
            description: self.header.description.clone(),
            is_publishable: self.header.is_publishable,
            is_template: self.header.is_template,
        };

        let outcome = match self.store.upsert_template(&form).await {
            Ok(outcome) => outcome,
            Err(err) => return Err(self.fail_save(err.to_string())),
        };

        debug!(
            template_id = outcome.template_id,
            version = outcome.version,
            "header saved"
        );
        self.template_id = Some(outcome.template_id);
        self.version = outcome.version;
        self.marker.record(outcome.template_id);

        let rows = self.items.snapshot_new_items();
        let store = Arc::clone(&self.store);
        let submissions = rows
            .iter()
            .map(|item| store.add_template_item(outcome.template_id, item));
        let results = join_all(submissions).await;

        let first_failure = results
            .into_iter()
            .find_map(|result| result.err().map(|err: StoreError| err.to_string()));
        if let Some(message) = first_failure {
            // Header and any succeeded items stay persisted; no
            // compensating delete is attempted.
            return Err(self.fail_save(message));
        }

        self.phase = DraftPhase::Idle;
        self.seeded = false;
        if let Err(err) = self.open(Some(outcome.template_id)).await {
            warn!("post-save refresh failed: {}", err);
        }

        Ok(SaveReceipt {
            template_id: outcome.template_id,
            version: outcome.version,
        })
    }

    /// Confirm that the saved draft is being kept ("Save & Continue").
    ///
    /// Clears the orphan marker so a later "Don't Save" cannot delete
    /// work the user chose to keep. Without this, only `discard` tears
    /// the marker down.
    pub fn confirm_kept(&mut self) {
        self.marker.clear();
    }

    /// Delete the draft recorded by the orphan marker, then clear it.
    ///
    /// Invoked when the user chooses not to keep their work. The delete
    /// is best-effort: a failure is logged, and the marker is cleared
    /// either way so the id is not deleted twice later.
    pub async fn discard(&mut self) {
        if let Some(id) = self.marker.current() {
            if let Err(err) = self.store.delete_template(id).await {
                warn!(template_id = id, "discard delete failed: {}", err);
            }
            self.marker.clear();
        }
        self.header = DraftHeader::default();
        self.items = ItemsEditor::new();
        self.template_id = None;
        self.version = 0;
        self.seeded = false;
        self.phase = DraftPhase::Idle;
        self.last_error = None;
    }

    fn fail_save(&mut self, message: String) -> AppError {
        self.phase = DraftPhase::Idle;
        self.last_error = Some(message.clone());
        AppError::SaveFailed(message)
    }
}
