//! User selector stage.
//!
//! Each incoming [`LoadedProps`] restarts the selection from the URL user
//! (or the first list entry when the URL names nobody). Manual selections
//! made through the [`UserSelect`] handle override it until the next props
//! arrive.

use tracing::debug;

use super::pipeline::{EventSender, PipelineEvent};
use super::props::LoadedProps;
use super::user::User;

/// Handle used by display components to select a user manually.
#[derive(Debug, Clone)]
pub struct UserSelect {
    sender: EventSender,
}

impl UserSelect {
    pub(crate) fn new(sender: EventSender) -> Self {
        Self { sender }
    }

    /// Request that `user` becomes the selected user.
    pub fn select(&self, user: impl Into<String>) {
        self.sender
            .send(PipelineEvent::UserSelected { user: user.into() });
    }
}

/// Selector output.
#[derive(Debug, Clone)]
pub struct SelectedProps {
    /// Loader output this selection was derived from.
    pub loaded: LoadedProps,
    /// The selected entry of the list in view.
    pub selected_user: Option<User>,
    /// Handle for manual selection.
    pub user_select: UserSelect,
}

/// Selector state machine. Owns the single [`UserSelect`] handle.
#[derive(Debug)]
pub struct UserSelector {
    handle: UserSelect,
    current: Option<LoadedProps>,
}

impl UserSelector {
    /// Create a selector that hands out `handle` with every emission.
    #[must_use]
    pub fn new(handle: UserSelect) -> Self {
        Self {
            handle,
            current: None,
        }
    }

    /// The manual-selection handle.
    #[must_use]
    pub const fn handle(&self) -> &UserSelect {
        &self.handle
    }

    /// Accept new props and restart from the initial selection.
    pub fn on_props(&mut self, loaded: LoadedProps) -> SelectedProps {
        let selected_user = initial_selection(&loaded);
        self.current = Some(loaded.clone());
        SelectedProps {
            loaded,
            selected_user,
            user_select: self.handle.clone(),
        }
    }

    /// Apply a manual selection against the current list.
    ///
    /// Returns `None` before any props have arrived or when `name` is not in
    /// the list.
    pub fn on_select(&mut self, name: &str) -> Option<SelectedProps> {
        let Some(loaded) = self.current.as_ref() else {
            debug!(user = name, "ignoring selection before any props");
            return None;
        };
        let Some(user) = loaded.users_in_view().find(name) else {
            debug!(user = name, "ignoring selection of unknown user");
            return None;
        };
        Some(SelectedProps {
            loaded: loaded.clone(),
            selected_user: Some(user.clone()),
            user_select: self.handle.clone(),
        })
    }
}

fn initial_selection(loaded: &LoadedProps) -> Option<User> {
    let users = loaded.users_in_view();
    match loaded.props.route.user() {
        Some(name) => users.find(name).cloned(),
        None => users.first().cloned(),
    }
}
