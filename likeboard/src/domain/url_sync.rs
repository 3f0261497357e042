//! Keeps the URL in step with the selected user.
//!
//! A selection that differs from the URL user triggers one navigation. Until
//! the router reports the new location, further renders of the same
//! selection do not navigate again.

use super::route::{RouteMatch, user_path};
use super::user::{User, UserName};

/// One-shot URL reconciliation state.
#[derive(Debug, Default)]
pub struct UrlSync {
    pending: Option<UserName>,
}

impl UrlSync {
    /// Create a reconciler with nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Path to navigate to, if the selection and the URL disagree.
    pub fn reconcile(&mut self, selected: Option<&User>, route: &RouteMatch) -> Option<String> {
        let Some(user) = selected else {
            self.pending = None;
            return None;
        };
        if route.user() == Some(user.name().as_str()) {
            self.pending = None;
            return None;
        }
        if self.pending.as_ref() == Some(user.name()) {
            return None;
        }
        self.pending = Some(user.name().clone());
        Some(user_path(user.name()))
    }
}
