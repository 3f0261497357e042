//! Selection context handed to nested display components.
//!
//! Purpose: bundle the selected user with the mutation handlers so display
//! components receive both explicitly with every render.

use super::handlers::UpdateFunctions;
use super::selector::SelectedProps;
use super::user::User;

/// The selected user plus the mutation handlers.
#[derive(Debug, Clone)]
pub struct SelectionContext {
    /// The selected user, if any.
    pub user: Option<User>,
    /// Handlers for like and dislike mutations.
    pub update_functions: UpdateFunctions,
}

/// Build the context published alongside a render.
#[must_use]
pub fn publish_context(
    selected: &SelectedProps,
    update_functions: &UpdateFunctions,
) -> SelectionContext {
    SelectionContext {
        user: selected.selected_user.clone(),
        update_functions: update_functions.clone(),
    }
}
