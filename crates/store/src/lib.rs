//! AI Scale Store
//!
//! Client for the remote template store: the HTTP JSON API that persists
//! templates and their use-level items and that is the sole authority for
//! template identifiers and version numbers.
//!
//! The `TemplateStore` trait is the seam the application services are
//! written (and tested) against; `HttpTemplateStore` is the production
//! implementation over `reqwest`, carrying the session cookie and the
//! CSRF token the store requires on state-mutating requests.

pub mod http;
pub mod http_client;
pub mod store;
pub mod types;

// Re-export main types
pub use http::HttpTemplateStore;
pub use http_client::build_http_client;
pub use store::{parse_http_error, TemplateStore};
pub use types::*;
