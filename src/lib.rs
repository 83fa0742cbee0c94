//! AI Use Scales Application Core
//!
//! Application logic behind the AI Use Guidelines builder: a form-driven
//! editor for tables of AI use levels attached to versioned template
//! records, persisted through the remote template store.
//!
//! ## Module Organization
//!
//! - `models` - Draft rows, header fields, and built-in preset scales
//! - `services` - Items editor, draft lifecycle controller, session gate,
//!   community browser
//! - `state` - Process-wide application state (orphan-draft marker)
//! - `utils` - Application error types

pub mod models;
pub mod services;
pub mod state;
pub mod utils;

pub use services::{CommunityBrowser, DraftController, ItemsEditor, SessionGate};
pub use state::{AppState, DraftMarker};
pub use utils::error::{AppError, AppResult};

// Store wiring for the rendering shell
pub use aiscale_core::StoreConfig;
pub use aiscale_store::{HttpTemplateStore, TemplateStore};
