//! AI Scale Core
//!
//! Foundational error types and store configuration for the AI Use Scales
//! workspace. This crate has zero dependencies on application-level code
//! (HTTP client, services, state).
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `config` - Remote store configuration (`StoreConfig`)
//!
//! ## Design Principles
//!
//! 1. **Zero external dependencies beyond serde/thiserror** - keeps build times minimal
//! 2. **Unidirectional dependency** - this crate depends on nothing else in the workspace

pub mod config;
pub mod error;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Store Configuration ────────────────────────────────────────────────
pub use config::StoreConfig;
