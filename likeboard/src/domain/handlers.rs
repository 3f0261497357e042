//! State and handlers provider.
//!
//! [`UserListStore`] owns the list. [`UpdateFunctions`] is the handle display
//! components use to request like and dislike mutations. A mutation first
//! goes to the [`UserDirectory`]; only a confirmed mutation becomes a
//! [`ListPatch`] applied to the store.

use tracing::info;

use super::error::Error;
use super::pipeline::{EventSender, PipelineEvent};
use super::ports::UserDirectory;
use super::reaction::{Reaction, ReactionId, ReactionKind, ReactionPayload};
use super::user::UserName;
use super::user_list::UserList;

/// Owner of the current user list.
#[derive(Debug, Clone, Default)]
pub struct UserListStore {
    users: UserList,
    revision: u64,
}

impl UserListStore {
    /// Create a store holding `users`.
    #[must_use]
    pub fn new(users: UserList) -> Self {
        Self { users, revision: 0 }
    }

    /// Current list.
    #[must_use]
    pub const fn users(&self) -> &UserList {
        &self.users
    }

    /// Number of changes applied since creation.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Functional setter: replace the list with `transform(current)`.
    pub fn update(&mut self, transform: impl FnOnce(&UserList) -> UserList) {
        let next = transform(&self.users);
        self.replace(next);
    }

    /// Unconditionally replace the list.
    pub fn set_user_list(&mut self, users: UserList) {
        self.replace(users);
    }

    fn replace(&mut self, users: UserList) {
        self.users = users;
        self.revision += 1;
    }
}

/// A requested like or dislike change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Create a record.
    Add {
        /// Owner of the collection.
        user: UserName,
        /// Target collection.
        kind: ReactionKind,
        /// Record body without an id.
        payload: ReactionPayload,
    },
    /// Delete a record.
    Delete {
        /// Owner of the collection.
        user: UserName,
        /// Target collection.
        kind: ReactionKind,
        /// Record to delete.
        id: ReactionId,
    },
}

impl Mutation {
    /// User whose collection changes.
    #[must_use]
    pub const fn user(&self) -> &UserName {
        match self {
            Self::Add { user, .. } | Self::Delete { user, .. } => user,
        }
    }

    /// Collection that changes.
    #[must_use]
    pub const fn kind(&self) -> ReactionKind {
        match self {
            Self::Add { kind, .. } | Self::Delete { kind, .. } => *kind,
        }
    }

    /// Verb used in user-facing messages.
    #[must_use]
    pub const fn verb(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Delete { .. } => "delete",
        }
    }

    /// Banner text for a failed mutation.
    ///
    /// ```
    /// use likeboard::domain::{Error, Mutation, ReactionId, ReactionKind, UserName};
    ///
    /// let mutation = Mutation::Delete {
    ///     user: UserName::new("carol").expect("valid name"),
    ///     kind: ReactionKind::Like,
    ///     id: ReactionId::new(7),
    /// };
    /// assert_eq!(
    ///     mutation.failure_message(&Error::not_found("gone")),
    ///     "Could not delete like for carol: gone"
    /// );
    /// ```
    #[must_use]
    pub fn failure_message(&self, err: &Error) -> String {
        format!(
            "Could not {verb} {kind} for {user}: {message}",
            verb = self.verb(),
            kind = self.kind(),
            user = self.user(),
            message = err.message()
        )
    }
}

/// A confirmed change to apply to the local list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListPatch {
    /// Append a server-confirmed record.
    Append {
        /// Owner of the collection.
        user: UserName,
        /// Target collection.
        kind: ReactionKind,
        /// Record as returned by the directory.
        reaction: Reaction,
    },
    /// Remove the record with a matching id.
    Remove {
        /// Owner of the collection.
        user: UserName,
        /// Target collection.
        kind: ReactionKind,
        /// Id of the removed record.
        id: ReactionId,
    },
}

impl ListPatch {
    /// Return the patched list; other users and entries are unchanged.
    #[must_use]
    pub fn apply(&self, users: &UserList) -> UserList {
        match self {
            Self::Append {
                user,
                kind,
                reaction,
            } => users.with_user_patched(user, |u| u.with_reaction_added(*kind, reaction.clone())),
            Self::Remove { user, kind, id } => {
                users.with_user_patched(user, |u| u.with_reaction_removed(*kind, *id))
            }
        }
    }
}

/// Perform `mutation` against the directory and describe the confirmed
/// change.
///
/// Additions use the record returned by the directory, so the local list
/// carries the server-assigned id.
pub async fn apply_mutation(
    directory: &dyn UserDirectory,
    mutation: &Mutation,
) -> Result<ListPatch, Error> {
    match mutation {
        Mutation::Add {
            user,
            kind,
            payload,
        } => {
            let reaction = match kind {
                ReactionKind::Like => directory.add_user_like(user, payload).await,
                ReactionKind::Dislike => directory.add_user_dislike(user, payload).await,
            }?;
            info!(user = %user, kind = %kind, id = %reaction.id(), "record added");
            Ok(ListPatch::Append {
                user: user.clone(),
                kind: *kind,
                reaction,
            })
        }
        Mutation::Delete { user, kind, id } => {
            let deleted = match kind {
                ReactionKind::Like => directory.delete_user_like(user, *id).await,
                ReactionKind::Dislike => directory.delete_user_dislike(user, *id).await,
            };
            deleted?;
            info!(user = %user, kind = %kind, id = %id, "record deleted");
            Ok(ListPatch::Remove {
                user: user.clone(),
                kind: *kind,
                id: *id,
            })
        }
    }
}

/// Mutation handlers handed to display components.
#[derive(Debug, Clone)]
pub struct UpdateFunctions {
    sender: EventSender,
}

impl UpdateFunctions {
    pub(crate) fn new(sender: EventSender) -> Self {
        Self { sender }
    }

    /// Add a like record with `payload` for `user`.
    pub fn add_like(&self, user: &UserName, payload: ReactionPayload) {
        self.add(user, ReactionKind::Like, payload);
    }

    /// Add a dislike record with `payload` for `user`.
    pub fn add_dislike(&self, user: &UserName, payload: ReactionPayload) {
        self.add(user, ReactionKind::Dislike, payload);
    }

    /// Delete `reaction` from the likes of `user`.
    pub fn delete_like(&self, user: &UserName, reaction: &Reaction) {
        self.delete(user, ReactionKind::Like, reaction.id());
    }

    /// Delete `reaction` from the dislikes of `user`.
    pub fn delete_dislike(&self, user: &UserName, reaction: &Reaction) {
        self.delete(user, ReactionKind::Dislike, reaction.id());
    }

    fn add(&self, user: &UserName, kind: ReactionKind, payload: ReactionPayload) {
        self.sender.send(PipelineEvent::Mutate(Mutation::Add {
            user: user.clone(),
            kind,
            payload,
        }));
    }

    fn delete(&self, user: &UserName, kind: ReactionKind, id: ReactionId) {
        self.sender.send(PipelineEvent::Mutate(Mutation::Delete {
            user: user.clone(),
            kind,
            id,
        }));
    }
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;
