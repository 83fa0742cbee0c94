//! HTTP Client Factory
//!
//! Provides a factory function for building reqwest clients configured for
//! the template store: a cookie store for the session cookie and an
//! explicit per-request timeout.

use aiscale_core::StoreConfig;

/// Build a `reqwest::Client` for the given store configuration.
///
/// - cookie store enabled, so the session cookie set at login/token time
///   is carried on every subsequent request
/// - the configured request timeout applied to every call
pub fn build_http_client(config: &StoreConfig) -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .timeout(config.request_timeout())
        .build()
        .expect("failed to build reqwest client")
}
