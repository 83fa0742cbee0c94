//! Error Handling
//!
//! Unified error types for the application.
//! Uses thiserror for ergonomic error definitions.
//!
//! Every failure is caught at the operation boundary (fetch/save/delete)
//! and converted into one of these values; nothing is allowed to escape
//! as a panic, and nothing here is fatal to the process.

use thiserror::Error;

use aiscale_store::StoreError;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Fetching template details failed; the editor keeps its prior state
    #[error("Failed to load template: {0}")]
    LoadFailed(String),

    /// The save pipeline failed; editor fields remain intact for retry
    #[error("{0}")]
    SaveFailed(String),

    /// A save was requested while another one is still in flight
    #[error("A save is already in progress")]
    SaveInFlight,

    /// Store errors (auto-converted from StoreError)
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a load-failure error
    pub fn load_failed(msg: impl Into<String>) -> Self {
        Self::LoadFailed(msg.into())
    }

    /// Create a save-failure error
    pub fn save_failed(msg: impl Into<String>) -> Self {
        Self::SaveFailed(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// The user-facing message for this error
    pub fn message(&self) -> String {
        self.to_string()
    }
}
