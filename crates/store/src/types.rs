//! Store Wire Types
//!
//! Request and response shapes for the remote template store, plus the
//! store error taxonomy. Field names are renamed to match the store's
//! JSON exactly; responses that the backend leaves loosely shaped (the
//! session envelope, the upsert acknowledgement) get an explicit schema
//! with a validating parse step instead of ad hoc shape-sniffing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Store error taxonomy.
///
/// `Cancelled` marks a superseded request; callers discard it silently
/// rather than surfacing a message.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Network-level failure (connection refused, DNS, TLS, ...)
    #[error("Network error: {0}")]
    Transport(String),

    /// The configured per-request timeout expired
    #[error("Request timed out")]
    Timeout,

    /// Non-2xx response without a store-provided message
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Business rejection carrying the store's own error message
    #[error("{message}")]
    Rejected { message: String },

    /// Response body did not match the expected schema
    #[error("Unexpected response: {0}")]
    Schema(String),

    /// Request was superseded by a newer one; not a failure
    #[error("Request superseded")]
    Cancelled,
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// Create a business-rejection error from a store message
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Create a schema error
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    /// True if this error marks a superseded request
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Authenticated user as reported by the session endpoint.
///
/// The backend serializes these fields in snake_case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserInfo {
    pub username: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Session endpoint envelope.
///
/// The store returns either `{"user": {...}}` or the user object flat;
/// both are accepted, but a `username` is required either way — anything
/// else parses as unauthenticated.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SessionEnvelope {
    Wrapped { user: UserInfo },
    Flat(UserInfo),
}

impl SessionEnvelope {
    /// Unwrap to the user object
    pub fn into_user(self) -> UserInfo {
        match self {
            Self::Wrapped { user } => user,
            Self::Flat(user) => user,
        }
    }
}

/// Body of the CSRF token endpoint (the token is also set as a cookie).
#[derive(Debug, Deserialize)]
pub struct CsrfTokenBody {
    #[serde(rename = "csrfToken")]
    pub csrf_token: Option<String>,
}

/// Subject reference embedded in template details
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubjectRef {
    pub code: String,
    #[serde(default)]
    pub name: Option<String>,
    pub semester: i32,
    pub year: i32,
}

/// One stored use-level row, as returned by the details endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemplateItemRecord {
    pub id: i64,
    #[serde(default)]
    pub task: String,
    #[serde(rename = "instructionsToStudents", default)]
    pub instructions_to_students: String,
    #[serde(default)]
    pub examples: String,
    #[serde(rename = "aiGeneratedContent", default)]
    pub ai_generated_content: String,
    #[serde(rename = "useAcknowledgement", default)]
    pub use_acknowledgement: bool,
    /// Level name; the backend exposes it through a join, hence the
    /// double-underscore field name on the wire.
    #[serde(rename = "aiUseScaleLevel__name", default)]
    pub level_name: Option<String>,
}

/// Full template record from the details endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemplateDetails {
    pub id: i64,
    pub name: String,
    pub version: i64,
    #[serde(rename = "ownerId", default)]
    pub owner_id: Option<i64>,
    pub subject: SubjectRef,
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "isPublishable", default)]
    pub is_publishable: bool,
    #[serde(rename = "isTemplate", default)]
    pub is_template: bool,
    #[serde(default)]
    pub template_items: Vec<TemplateItemRecord>,
}

/// Read-only listing projection of a template
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemplateSummary {
    #[serde(rename = "templateId")]
    pub template_id: i64,
    pub name: String,
    pub version: i64,
    #[serde(rename = "subjectCode", default)]
    pub subject_code: String,
    pub year: i32,
    pub semester: i32,
    #[serde(rename = "ownerName", default)]
    pub owner_name: String,
    #[serde(rename = "ownerUsername", default)]
    pub owner_username: Option<String>,
    #[serde(rename = "isPublishable", default)]
    pub is_publishable: bool,
    #[serde(rename = "isTemplate", default)]
    pub is_template: bool,
}

/// Header fields submitted to the upsert endpoint.
///
/// `template_id` is present only once the store has minted one; the store
/// decides create-vs-update from its presence and is the sole authority
/// for the version it returns.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TemplateForm {
    pub username: String,
    #[serde(rename = "templateId", skip_serializing_if = "Option::is_none")]
    pub template_id: Option<i64>,
    pub name: String,
    #[serde(rename = "subjectCode")]
    pub subject_code: String,
    pub year: i32,
    pub semester: i32,
    pub version: i64,
    pub scope: String,
    pub description: String,
    #[serde(rename = "isPublishable")]
    pub is_publishable: bool,
    #[serde(rename = "isTemplate")]
    pub is_template: bool,
}

/// One use-level row submitted to the item-create endpoint
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewItem {
    pub task: String,
    #[serde(rename = "aiUseScaleLevel_name")]
    pub level_name: String,
    #[serde(rename = "instructionsToStudents")]
    pub instructions_to_students: String,
    pub examples: String,
    #[serde(rename = "aiGeneratedContent")]
    pub ai_generated_content: String,
    #[serde(rename = "useAcknowledgement")]
    pub use_acknowledgement: bool,
}

/// Validated result of a successful header upsert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsertOutcome {
    pub template_id: i64,
    pub version: i64,
}

/// Raw upsert response before validation
#[derive(Debug, Deserialize, Default)]
pub struct UpsertBody {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(rename = "templateId", default)]
    pub template_id: Option<i64>,
    #[serde(default)]
    pub version: Option<i64>,
    #[serde(default)]
    pub error: Option<String>,
}

impl UpsertBody {
    /// Validate into an `UpsertOutcome`; a missing id or version is a
    /// rejection carrying the store message when one was provided.
    pub fn validate(self, fallback: &str) -> StoreResult<UpsertOutcome> {
        match (self.template_id, self.version) {
            (Some(template_id), Some(version)) => Ok(UpsertOutcome {
                template_id,
                version,
            }),
            _ => Err(StoreError::rejected(
                self.error.unwrap_or_else(|| fallback.to_string()),
            )),
        }
    }
}

/// Raw `{success, error}` acknowledgement used by item-create and delete
#[derive(Debug, Deserialize, Default)]
pub struct AckBody {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
}

impl AckBody {
    /// Validate that the store acknowledged the mutation.
    pub fn validate(self, fallback: &str) -> StoreResult<()> {
        if self.success.unwrap_or(false) {
            Ok(())
        } else {
            Err(StoreError::rejected(
                self.error.unwrap_or_else(|| fallback.to_string()),
            ))
        }
    }
}

/// Query parameters for the community listing endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommunityQuery {
    pub limit: u32,
    pub offset: u32,
    /// Search term over name, subject code, and owner; empty means all.
    pub search: String,
}

impl CommunityQuery {
    /// First page with the given page size and no search term
    pub fn first_page(limit: u32) -> Self {
        Self {
            limit,
            offset: 0,
            search: String::new(),
        }
    }
}

/// One page of community listing results
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CommunityPage {
    #[serde(default)]
    pub results: Vec<TemplateSummary>,
    #[serde(default)]
    pub count: Option<u64>,
}

/// Response of the duplicate endpoint
#[derive(Debug, Deserialize, Default)]
pub struct DuplicateBody {
    #[serde(default)]
    pub new_template: Option<TemplateSummary>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response of the owned-template summary endpoint
#[derive(Debug, Deserialize, Default)]
pub struct SummaryBody {
    #[serde(default)]
    pub templates: Vec<TemplateSummary>,
}
