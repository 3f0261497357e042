//! In-memory user directory.
//!
//! Backs the demo when no service URL is configured. New record ids are
//! `max + 1` within the target collection.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{UserDirectory, UserDirectoryError};
use crate::domain::{Reaction, ReactionId, ReactionKind, ReactionPayload, UserList, UserName};

/// Directory holding its users behind a mutex.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: Mutex<UserList>,
}

impl InMemoryUserDirectory {
    /// Serve `users`.
    #[must_use]
    pub fn new(users: UserList) -> Self {
        Self {
            users: Mutex::new(users),
        }
    }

    /// Snapshot of the stored users.
    #[must_use]
    pub fn snapshot(&self) -> UserList {
        self.users
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn add(
        &self,
        user: &UserName,
        kind: ReactionKind,
        payload: &ReactionPayload,
    ) -> Result<Reaction, UserDirectoryError> {
        let mut users = self.users.lock().unwrap_or_else(PoisonError::into_inner);
        let current = users
            .find(user.as_str())
            .ok_or_else(|| UserDirectoryError::not_found(format!("user {user}")))?;
        let next_id = current
            .reactions(kind)
            .iter()
            .map(|reaction| reaction.id().get())
            .max()
            .map_or(1, |max| max + 1);
        let reaction = Reaction::new(ReactionId::new(next_id), payload.clone());
        *users = users.with_user_patched(user, |u| u.with_reaction_added(kind, reaction.clone()));
        Ok(reaction)
    }

    fn delete(
        &self,
        user: &UserName,
        kind: ReactionKind,
        id: ReactionId,
    ) -> Result<(), UserDirectoryError> {
        let mut users = self.users.lock().unwrap_or_else(PoisonError::into_inner);
        ensure_record(&users, user, kind, id)?;
        *users = users.with_user_patched(user, |u| u.with_reaction_removed(kind, id));
        Ok(())
    }

    fn put(
        &self,
        user: &UserName,
        kind: ReactionKind,
        id: ReactionId,
        payload: &ReactionPayload,
    ) -> Result<Reaction, UserDirectoryError> {
        let mut users = self.users.lock().unwrap_or_else(PoisonError::into_inner);
        ensure_record(&users, user, kind, id)?;
        let reaction = Reaction::new(id, payload.clone());
        *users = users.with_user_patched(user, |u| u.with_reaction_added(kind, reaction.clone()));
        Ok(reaction)
    }
}

fn ensure_record(
    users: &UserList,
    user: &UserName,
    kind: ReactionKind,
    id: ReactionId,
) -> Result<(), UserDirectoryError> {
    let current = users
        .find(user.as_str())
        .ok_or_else(|| UserDirectoryError::not_found(format!("user {user}")))?;
    current
        .find_reaction(kind, id)
        .map(|_| ())
        .ok_or_else(|| UserDirectoryError::not_found(format!("{kind} {id} for {user}")))
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn fetch_users(&self) -> Result<UserList, UserDirectoryError> {
        Ok(self.snapshot())
    }

    async fn add_user_like(
        &self,
        user: &UserName,
        payload: &ReactionPayload,
    ) -> Result<Reaction, UserDirectoryError> {
        self.add(user, ReactionKind::Like, payload)
    }

    async fn add_user_dislike(
        &self,
        user: &UserName,
        payload: &ReactionPayload,
    ) -> Result<Reaction, UserDirectoryError> {
        self.add(user, ReactionKind::Dislike, payload)
    }

    async fn delete_user_like(
        &self,
        user: &UserName,
        id: ReactionId,
    ) -> Result<(), UserDirectoryError> {
        self.delete(user, ReactionKind::Like, id)
    }

    async fn delete_user_dislike(
        &self,
        user: &UserName,
        id: ReactionId,
    ) -> Result<(), UserDirectoryError> {
        self.delete(user, ReactionKind::Dislike, id)
    }

    async fn put_user_like(
        &self,
        user: &UserName,
        id: ReactionId,
        payload: &ReactionPayload,
    ) -> Result<Reaction, UserDirectoryError> {
        self.put(user, ReactionKind::Like, id, payload)
    }

    async fn put_user_dislike(
        &self,
        user: &UserName,
        id: ReactionId,
        payload: &ReactionPayload,
    ) -> Result<Reaction, UserDirectoryError> {
        self.put(user, ReactionKind::Dislike, id, payload)
    }
}
