//! Session Gate
//!
//! Resolves the current user identity once per app load and on demand,
//! and gates protected views. Any failure to resolve — network error,
//! expired session, malformed response — uniformly reads as "not
//! authenticated"; the gate does not distinguish why.

use std::sync::Arc;

use tracing::{debug, warn};

use aiscale_store::{TemplateStore, UserInfo};

/// Gate over the authenticated user for the current session
pub struct SessionGate<S: TemplateStore> {
    store: Arc<S>,
    user: Option<UserInfo>,
    /// True while the first (or a requested) resolution is in flight;
    /// redirect checks must not fire until it clears.
    resolving: bool,
}

impl<S: TemplateStore> SessionGate<S> {
    /// Create an unresolved gate; `requires_login` stays false until the
    /// first refresh completes.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            user: None,
            resolving: true,
        }
    }

    /// Prime the CSRF token cookie, then resolve the session.
    ///
    /// Token priming is best-effort; a failure is logged and the session
    /// resolution proceeds regardless.
    pub async fn bootstrap(&mut self) {
        if let Err(err) = self.store.issue_csrf_token().await {
            debug!("CSRF token priming failed: {}", err);
        }
        self.refresh().await;
    }

    /// Query the session endpoint and adopt the result.
    pub async fn refresh(&mut self) {
        self.resolving = true;
        self.user = match self.store.resolve_session().await {
            Ok(user) => user,
            Err(err) => {
                debug!("session resolve failed: {}", err);
                None
            }
        };
        self.resolving = false;
    }

    /// The authenticated user, if resolved
    pub fn current_user(&self) -> Option<&UserInfo> {
        self.user.as_ref()
    }

    /// The authenticated username, if resolved
    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.username.as_str())
    }

    /// True while a resolution is in flight
    pub fn is_resolving(&self) -> bool {
        self.resolving
    }

    /// True when resolution has completed and nobody is signed in.
    ///
    /// Pages redirect to the login entry point on this; it never fires
    /// mid-resolution, so there is no flash-redirect on first paint.
    pub fn requires_login(&self) -> bool {
        !self.resolving && self.user.is_none()
    }

    /// Invalidate the session store-side and clear the local user.
    ///
    /// The store call is best-effort; the local user is cleared either
    /// way and the caller is expected to navigate to the login entry.
    pub async fn logout(&mut self) {
        if let Err(err) = self.store.logout().await {
            warn!("logout request failed: {}", err);
        }
        self.user = None;
    }
}
