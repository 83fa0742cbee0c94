//! HTTP Template Store
//!
//! Production implementation of `TemplateStore` over the store's HTTP JSON
//! API. The session rides on a cookie held by the client's cookie store;
//! state-mutating POSTs additionally carry the CSRF token minted by the
//! token endpoint, cached in-process after the first issue.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use url::Url;

use aiscale_core::StoreConfig;

use super::http_client::build_http_client;
use super::store::{parse_http_error, TemplateStore};
use super::types::{
    AckBody, CommunityPage, CommunityQuery, CsrfTokenBody, DuplicateBody, NewItem,
    SessionEnvelope, StoreError, StoreResult, SummaryBody, TemplateDetails, TemplateForm,
    TemplateSummary, UpsertBody, UpsertOutcome, UserInfo,
};

/// Fallback message when the upsert response carries no usable error
const UPSERT_FALLBACK: &str = "Failed to create/update template";
/// Fallback message for unacknowledged item submissions
const ITEM_FALLBACK: &str = "Failed to add template item";
/// Fallback message for unacknowledged deletes
const DELETE_FALLBACK: &str = "Failed to delete template";
/// Fallback message for failed duplications
const DUPLICATE_FALLBACK: &str = "Failed to duplicate template";

/// CSRF header expected by the store on mutating requests
const CSRF_HEADER: &str = "X-CSRFToken";
/// Marker header the store uses to distinguish AJAX requests
const REQUESTED_WITH_HEADER: &str = "X-Requested-With";

/// HTTP client for the remote template store
pub struct HttpTemplateStore {
    config: StoreConfig,
    client: reqwest::Client,
    /// CSRF token cached from the token endpoint; also present as a
    /// cookie in the client's cookie store.
    csrf_token: RwLock<Option<String>>,
}

impl HttpTemplateStore {
    /// Create a new store client for the given configuration
    pub fn new(config: StoreConfig) -> Self {
        let client = build_http_client(&config);
        Self {
            config,
            client,
            csrf_token: RwLock::new(None),
        }
    }

    /// Create a store client configured from the environment
    pub fn from_env() -> aiscale_core::CoreResult<Self> {
        Ok(Self::new(StoreConfig::from_env()?))
    }

    /// Return the cached CSRF token, asking the store for one if needed.
    ///
    /// Best-effort: a token failure is logged and mutating requests go out
    /// without the header (the store will reject them with its own error).
    async fn ensure_csrf(&self) -> Option<String> {
        if let Some(token) = self.csrf_token.read().await.clone() {
            return Some(token);
        }
        match self.issue_csrf_token().await {
            Ok(token) => token,
            Err(err) => {
                warn!("CSRF token request failed: {}", err);
                None
            }
        }
    }

    /// Issue a mutating POST with CSRF headers, returning status and body.
    async fn mutate(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> StoreResult<(u16, String)> {
        let token = self.ensure_csrf().await;
        let mut request = self
            .client
            .post(self.config.endpoint(path))
            .header(REQUESTED_WITH_HEADER, "XMLHttpRequest")
            .json(body);
        if let Some(token) = token {
            request = request.header(CSRF_HEADER, token);
        }
        let response = request.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        Ok((status, text))
    }
}

/// Build the community listing URL with server-side search and paging
fn community_url(config: &StoreConfig, query: &CommunityQuery) -> StoreResult<String> {
    let mut url = Url::parse(&config.endpoint("/templates/community/"))
        .map_err(|e| StoreError::Transport(format!("invalid store URL: {}", e)))?;
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("limit", &query.limit.to_string());
        pairs.append_pair("offset", &query.offset.to_string());
        pairs.append_pair("order", "recent");
        let term = query.search.trim();
        if !term.is_empty() {
            pairs.append_pair("q", term);
        }
    }
    Ok(url.into())
}

/// Build the template details URL for an identifier
fn details_url(config: &StoreConfig, template_id: i64) -> StoreResult<String> {
    let mut url = Url::parse(&config.endpoint("/template/details/"))
        .map_err(|e| StoreError::Transport(format!("invalid store URL: {}", e)))?;
    url.query_pairs_mut()
        .append_pair("templateId", &template_id.to_string());
    Ok(url.into())
}

/// Build the owned-template summary URL for a username
fn summary_url(config: &StoreConfig, username: &str) -> StoreResult<String> {
    let mut url = Url::parse(&config.endpoint("/template/summary/"))
        .map_err(|e| StoreError::Transport(format!("invalid store URL: {}", e)))?;
    url.query_pairs_mut().append_pair("username", username);
    Ok(url.into())
}

#[async_trait]
impl TemplateStore for HttpTemplateStore {
    async fn resolve_session(&self) -> StoreResult<Option<UserInfo>> {
        let response = self
            .client
            .get(self.config.endpoint("/session/"))
            .send()
            .await?;
        if !response.status().is_success() {
            debug!("session resolve returned {}", response.status());
            return Ok(None);
        }
        let body = response.text().await?;
        match serde_json::from_str::<SessionEnvelope>(&body) {
            Ok(envelope) => Ok(Some(envelope.into_user())),
            Err(_) => {
                // Anything without a username is uniformly "not signed in".
                debug!("session body did not contain a user");
                Ok(None)
            }
        }
    }

    async fn issue_csrf_token(&self) -> StoreResult<Option<String>> {
        let response = self
            .client
            .get(self.config.endpoint("/token/"))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Http {
                status: status.as_u16(),
                message: "token endpoint failed".to_string(),
            });
        }
        let token = response
            .json::<CsrfTokenBody>()
            .await
            .ok()
            .and_then(|body| body.csrf_token);
        if let Some(token) = &token {
            *self.csrf_token.write().await = Some(token.clone());
        }
        Ok(token)
    }

    async fn logout(&self) -> StoreResult<()> {
        let (status, body) = self.mutate("/logout/", &serde_json::json!({})).await?;
        if (200..300).contains(&status) {
            Ok(())
        } else {
            Err(parse_http_error(status, &body))
        }
    }

    async fn template_details(&self, template_id: i64) -> StoreResult<TemplateDetails> {
        debug!(template_id, "fetching template details");
        let url = details_url(&self.config, template_id)?;
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(parse_http_error(status.as_u16(), &body));
        }
        serde_json::from_str(&body)
            .map_err(|e| StoreError::schema(format!("template details: {}", e)))
    }

    async fn upsert_template(&self, form: &TemplateForm) -> StoreResult<UpsertOutcome> {
        debug!(
            template_id = ?form.template_id,
            version = form.version,
            "submitting template header"
        );
        let body = serde_json::to_value(form)
            .map_err(|e| StoreError::schema(format!("template form: {}", e)))?;
        let (status, text) = self.mutate("/template/update/", &body).await?;
        if !(200..300).contains(&status) {
            return Err(parse_http_error(status, &text));
        }
        let parsed: UpsertBody = serde_json::from_str(&text).unwrap_or_default();
        parsed.validate(UPSERT_FALLBACK)
    }

    async fn add_template_item(&self, template_id: i64, item: &NewItem) -> StoreResult<()> {
        let mut body = serde_json::to_value(item)
            .map_err(|e| StoreError::schema(format!("template item: {}", e)))?;
        body["templateId"] = serde_json::json!(template_id);
        let (status, text) = self.mutate("/templateitem/update/", &body).await?;
        if !(200..300).contains(&status) {
            return Err(parse_http_error(status, &text));
        }
        let parsed: AckBody = serde_json::from_str(&text).unwrap_or_default();
        parsed.validate(ITEM_FALLBACK)
    }

    async fn delete_template(&self, template_id: i64) -> StoreResult<()> {
        debug!(template_id, "deleting template");
        let body = serde_json::json!({ "templateId": template_id });
        let (status, text) = self.mutate("/template/delete/", &body).await?;
        if !(200..300).contains(&status) {
            return Err(parse_http_error(status, &text));
        }
        let parsed: AckBody = serde_json::from_str(&text).unwrap_or_default();
        parsed.validate(DELETE_FALLBACK)
    }

    async fn list_community(&self, query: &CommunityQuery) -> StoreResult<CommunityPage> {
        let url = community_url(&self.config, query)?;
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(parse_http_error(status.as_u16(), &body));
        }
        serde_json::from_str(&body)
            .map_err(|e| StoreError::schema(format!("community listing: {}", e)))
    }

    async fn duplicate_template(
        &self,
        template_id: i64,
        username: &str,
    ) -> StoreResult<TemplateSummary> {
        let body = serde_json::json!({ "templateId": template_id, "username": username });
        let (status, text) = self.mutate("/template/duplicate/", &body).await?;
        if !(200..300).contains(&status) {
            return Err(parse_http_error(status, &text));
        }
        let parsed: DuplicateBody = serde_json::from_str(&text).unwrap_or_default();
        parsed
            .new_template
            .ok_or_else(|| StoreError::rejected(parsed.error.unwrap_or_else(|| {
                DUPLICATE_FALLBACK.to_string()
            })))
    }

    async fn list_owned(&self, username: &str) -> StoreResult<Vec<TemplateSummary>> {
        let url = summary_url(&self.config, username)?;
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(parse_http_error(status.as_u16(), &body));
        }
        let parsed: SummaryBody = serde_json::from_str(&body)
            .map_err(|e| StoreError::schema(format!("template summaries: {}", e)))?;
        Ok(parsed.templates)
    }
}
