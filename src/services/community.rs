//! Community Browser
//!
//! Server-side search and paging over community-shared templates, plus
//! duplication into the caller's account. At most one listing request's
//! result may be applied: issuing a new request cancels the previous one,
//! and a superseded request that resolves late is discarded before it can
//! write anything.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use aiscale_store::{CommunityQuery, StoreError, TemplateStore, TemplateSummary};

use crate::utils::error::{AppError, AppResult};

/// Default listing page size
const DEFAULT_PAGE_SIZE: u32 = 25;

/// Visible listing state
#[derive(Debug, Default)]
struct ListState {
    rows: Vec<TemplateSummary>,
    offset: u32,
    total: Option<u64>,
    query: String,
    loading: bool,
    error: Option<String>,
    inflight: Option<CancellationToken>,
}

/// Browser over the community template listing
pub struct CommunityBrowser<S: TemplateStore> {
    store: Arc<S>,
    limit: u32,
    state: Mutex<ListState>,
    /// Monotonic request counter; a resolution whose number is no longer
    /// current belongs to a superseded request and must not write.
    generation: AtomicU64,
}

impl<S: TemplateStore> CommunityBrowser<S> {
    /// Create a browser with the default page size
    pub fn new(store: Arc<S>) -> Self {
        Self::with_page_size(store, DEFAULT_PAGE_SIZE)
    }

    /// Create a browser with an explicit page size
    pub fn with_page_size(store: Arc<S>, limit: u32) -> Self {
        Self {
            store,
            limit,
            state: Mutex::new(ListState::default()),
            generation: AtomicU64::new(0),
        }
    }

    fn state(&self) -> MutexGuard<'_, ListState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// The currently visible rows
    pub fn rows(&self) -> Vec<TemplateSummary> {
        self.state().rows.clone()
    }

    /// Total matching templates, when the store has reported one
    pub fn total(&self) -> Option<u64> {
        self.state().total
    }

    /// The current listing error message, if any
    pub fn error(&self) -> Option<String> {
        self.state().error.clone()
    }

    /// True while the request owning the view is in flight
    pub fn is_loading(&self) -> bool {
        self.state().loading
    }

    /// True when another page may exist
    pub fn has_more(&self) -> bool {
        let state = self.state();
        match state.total {
            None => true,
            Some(total) => u64::from(state.offset) < total,
        }
    }

    /// Reload from the first page
    pub async fn refresh(&self) {
        self.fetch(true).await;
    }

    /// Append the next page
    pub async fn load_more(&self) {
        self.fetch(false).await;
    }

    /// Change the search term and re-query immediately from the start
    pub async fn set_query(&self, query: &str) {
        {
            let mut state = self.state();
            state.query = query.to_string();
            state.rows.clear();
            state.offset = 0;
            state.total = None;
        }
        self.fetch(true).await;
    }

    async fn fetch(&self, reset: bool) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let token = CancellationToken::new();
        let request = {
            let mut state = self.state();
            if let Some(previous) = state.inflight.replace(token.clone()) {
                previous.cancel();
            }
            state.loading = true;
            state.error = None;
            CommunityQuery {
                limit: self.limit,
                offset: if reset { 0 } else { state.offset },
                search: state.query.clone(),
            }
        };

        let result = tokio::select! {
            _ = token.cancelled() => Err(StoreError::Cancelled),
            result = self.store.list_community(&request) => result,
        };

        let mut state = self.state();
        if generation != self.generation.load(Ordering::SeqCst) {
            // Superseded while resolving; the newer request owns the
            // view, including the loading flag.
            debug!(generation, "discarding stale listing response");
            return;
        }
        state.inflight = None;
        state.loading = false;
        match result {
            Ok(page) => {
                let fetched = page.results.len() as u32;
                state.total = page.count;
                if reset {
                    state.rows = page.results;
                } else {
                    state.rows.extend(page.results);
                }
                state.offset = request.offset + fetched;
            }
            Err(err) if err.is_cancelled() => {
                // Not a failure; nothing to surface.
            }
            Err(err) => {
                // Keep the prior page visible alongside the error.
                state.error = Some(err.to_string());
            }
        }
    }

    /// Duplicate a community template into the caller's account.
    ///
    /// On success the new record is optimistically inserted at the front
    /// of the visible list, but only when it is both publishable and a
    /// template — otherwise it simply exists store-side. A failure leaves
    /// the list untouched.
    pub async fn duplicate(
        &self,
        template_id: i64,
        username: &str,
    ) -> AppResult<Option<TemplateSummary>> {
        match self.store.duplicate_template(template_id, username).await {
            Ok(new_template) => {
                if new_template.is_publishable && new_template.is_template {
                    self.state().rows.insert(0, new_template.clone());
                    Ok(Some(new_template))
                } else {
                    Ok(None)
                }
            }
            Err(err) => {
                warn!(template_id, "duplicate failed: {}", err);
                Err(AppError::Store(err))
            }
        }
    }

    /// The templates owned by the given user (dashboard listing)
    pub async fn owned_templates(&self, username: &str) -> AppResult<Vec<TemplateSummary>> {
        Ok(self.store.list_owned(username).await?)
    }
}
