//! Session Gate Integration Tests
//!
//! Gate behavior against the in-memory store: bootstrap adopts the
//! signed-in user, an anonymous store requires login once resolution
//! completes, and logout clears the session on both sides.

use std::sync::Arc;

use aiscale_app::AppState;

use crate::support::InMemoryStore;

#[tokio::test]
async fn test_bootstrap_adopts_signed_in_user() {
    let state = AppState::new(Arc::new(InMemoryStore::with_user("coord1")));
    let mut gate = state.session_gate();
    assert!(gate.is_resolving());

    gate.bootstrap().await;
    assert_eq!(gate.username(), Some("coord1"));
    assert!(!gate.requires_login());
    assert_eq!(
        gate.current_user().and_then(|user| user.role.as_deref()),
        Some("COORDINATOR")
    );
}

#[tokio::test]
async fn test_anonymous_store_requires_login() {
    let state = AppState::new(Arc::new(InMemoryStore::new()));
    let mut gate = state.session_gate();
    // Unresolved: no redirect yet.
    assert!(!gate.requires_login());

    gate.bootstrap().await;
    assert!(gate.requires_login());
}

#[tokio::test]
async fn test_logout_invalidates_store_session() {
    let store = Arc::new(InMemoryStore::with_user("coord1"));
    let state = AppState::new(Arc::clone(&store));
    let mut gate = state.session_gate();
    gate.bootstrap().await;
    assert_eq!(gate.username(), Some("coord1"));

    gate.logout().await;
    assert!(gate.requires_login());

    // A second gate over the same store also sees no session.
    let mut fresh = state.session_gate();
    fresh.refresh().await;
    assert!(fresh.requires_login());
}
