//! Template Store Trait
//!
//! Defines the common interface to the remote template store. The
//! application services are written against this trait; production code
//! uses `HttpTemplateStore`, tests use in-memory mocks.

use async_trait::async_trait;

use super::types::{
    CommunityPage, CommunityQuery, NewItem, StoreError, StoreResult, TemplateDetails,
    TemplateForm, TemplateSummary, UpsertOutcome, UserInfo,
};

/// Trait implemented by anything that can act as the remote template store.
///
/// The store is the sole authority for template identifiers, version
/// numbers, and ownership attribution; implementations never synthesize
/// any of those client-side.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// Resolve the current session.
    ///
    /// Returns `Ok(None)` for any non-success status or unrecognizable
    /// body — the caller treats all of those uniformly as "not
    /// authenticated".
    async fn resolve_session(&self) -> StoreResult<Option<UserInfo>>;

    /// Ask the store to mint a CSRF token (also set as a cookie).
    ///
    /// Best-effort: returns the token when the store provided one in the
    /// response body.
    async fn issue_csrf_token(&self) -> StoreResult<Option<String>>;

    /// Invalidate the session store-side.
    async fn logout(&self) -> StoreResult<()>;

    /// Fetch full template details (header plus items) by identifier.
    async fn template_details(&self, template_id: i64) -> StoreResult<TemplateDetails>;

    /// Create or update a template header.
    ///
    /// The store decides create-vs-update from the presence of
    /// `form.template_id` and returns the identifier and the new version.
    async fn upsert_template(&self, form: &TemplateForm) -> StoreResult<UpsertOutcome>;

    /// Attach one use-level item to a persisted template.
    async fn add_template_item(&self, template_id: i64, item: &NewItem) -> StoreResult<()>;

    /// Delete a template (and its items) by identifier.
    async fn delete_template(&self, template_id: i64) -> StoreResult<()>;

    /// List community-shared templates, newest first, with server-side
    /// search and paging.
    async fn list_community(&self, query: &CommunityQuery) -> StoreResult<CommunityPage>;

    /// Duplicate a community template into the caller's account.
    async fn duplicate_template(
        &self,
        template_id: i64,
        username: &str,
    ) -> StoreResult<TemplateSummary>;

    /// List the templates owned by the given user.
    async fn list_owned(&self, username: &str) -> StoreResult<Vec<TemplateSummary>>;
}

/// Map a non-2xx response to a store error.
///
/// The store reports business failures as `{"error": "..."}` bodies; when
/// one is present its message wins, otherwise the raw status is kept.
pub fn parse_http_error(status: u16, body: &str) -> StoreError {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("error").and_then(|e| e.as_str()) {
            return StoreError::rejected(message);
        }
    }
    StoreError::Http {
        status,
        message: if body.is_empty() {
            "no response body".to_string()
        } else {
            body.to_string()
        },
    }
}
