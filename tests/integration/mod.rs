//! Integration Tests Module
//!
//! End-to-end tests over the application services wired to a behavioral
//! in-memory template store. Tests cover the full draft lifecycle (open,
//! save pipeline, re-save, discard), session resolution and logout, and
//! community listing with search, paging, and duplication.
//!
//! No network calls are made. Tests use the real services over the
//! `TemplateStore` trait with an in-memory store that enforces the same
//! rules the backend does (store-minted identifiers, store-incremented
//! versions, append-only item writes).

// Shared in-memory store fake
mod support;

// Draft lifecycle tests: open, save, re-save, discard
mod draft_flow_test;

// Session gate tests: bootstrap, refresh, logout
mod session_test;
