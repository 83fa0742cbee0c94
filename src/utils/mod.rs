//! Utilities
//!
//! Shared helpers for the application crate.

pub mod error;
