//! Driven port for the user data service.
//!
//! The pipeline fetches the user list and mutates like and dislike records
//! through this port. Production backs it with the HTTP adapter; the demo
//! and tests use in-memory implementations.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{
    Error, Reaction, ReactionId, ReactionPayload, User, UserList, UserName,
};

define_port_error! {
    /// Errors raised by user directory adapters.
    pub enum UserDirectoryError {
        /// The request did not produce a response.
        Transport {
            /// Description of the transport failure.
            message: String,
        } =>
            "user directory transport failed: {message}",
        /// The service answered with a non-success status.
        Status {
            /// HTTP status code.
            status: u16,
            /// Response body preview or canonical reason.
            message: String,
        } =>
            "user directory returned status {status}: {message}",
        /// The response body could not be decoded.
        Decode {
            /// Description of the decode failure.
            message: String,
        } =>
            "user directory returned an invalid payload: {message}",
        /// The user or record does not exist.
        NotFound {
            /// What was missing, e.g. `like 7 of carol`.
            message: String,
        } =>
            "user directory has no {message}",
    }
}

impl From<UserDirectoryError> for Error {
    fn from(value: UserDirectoryError) -> Self {
        let message = value.to_string();
        match value {
            UserDirectoryError::Transport { .. } => Self::service_unavailable(message),
            UserDirectoryError::Status { status, .. } if (400..500).contains(&status) => {
                Self::invalid_request(message)
            }
            UserDirectoryError::Status { .. } => Self::service_unavailable(message),
            UserDirectoryError::Decode { .. } => Self::internal(message),
            UserDirectoryError::NotFound { .. } => Self::not_found(message),
        }
    }
}

/// Port for reading users and changing their records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch the full user list.
    async fn fetch_users(&self) -> Result<UserList, UserDirectoryError>;

    /// Create a like record and return it with its assigned id.
    async fn add_user_like(
        &self,
        user: &UserName,
        payload: &ReactionPayload,
    ) -> Result<Reaction, UserDirectoryError>;

    /// Create a dislike record and return it with its assigned id.
    async fn add_user_dislike(
        &self,
        user: &UserName,
        payload: &ReactionPayload,
    ) -> Result<Reaction, UserDirectoryError>;

    /// Delete a like record.
    async fn delete_user_like(
        &self,
        user: &UserName,
        id: ReactionId,
    ) -> Result<(), UserDirectoryError>;

    /// Delete a dislike record.
    async fn delete_user_dislike(
        &self,
        user: &UserName,
        id: ReactionId,
    ) -> Result<(), UserDirectoryError>;

    /// Replace the payload of a like record.
    async fn put_user_like(
        &self,
        user: &UserName,
        id: ReactionId,
        payload: &ReactionPayload,
    ) -> Result<Reaction, UserDirectoryError>;

    /// Replace the payload of a dislike record.
    async fn put_user_dislike(
        &self,
        user: &UserName,
        id: ReactionId,
        payload: &ReactionPayload,
    ) -> Result<Reaction, UserDirectoryError>;
}

/// Fixture directory serving two fixed users and accepting every mutation.
///
/// Additions are echoed back with id 1; nothing is stored.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserDirectory;

#[async_trait]
impl UserDirectory for FixtureUserDirectory {
    async fn fetch_users(&self) -> Result<UserList, UserDirectoryError> {
        const FIXTURE_USERS: [&str; 2] = ["ada", "grace"];

        let users = FIXTURE_USERS
            .iter()
            .map(|name| {
                UserName::new(*name)
                    .map(User::named)
                    .map_err(|err| UserDirectoryError::decode(format!("fixture user: {err}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        UserList::new(users).map_err(|err| UserDirectoryError::decode(err.to_string()))
    }

    async fn add_user_like(
        &self,
        _user: &UserName,
        payload: &ReactionPayload,
    ) -> Result<Reaction, UserDirectoryError> {
        Ok(Reaction::new(ReactionId::new(1), payload.clone()))
    }

    async fn add_user_dislike(
        &self,
        _user: &UserName,
        payload: &ReactionPayload,
    ) -> Result<Reaction, UserDirectoryError> {
        Ok(Reaction::new(ReactionId::new(1), payload.clone()))
    }

    async fn delete_user_like(
        &self,
        _user: &UserName,
        _id: ReactionId,
    ) -> Result<(), UserDirectoryError> {
        Ok(())
    }

    async fn delete_user_dislike(
        &self,
        _user: &UserName,
        _id: ReactionId,
    ) -> Result<(), UserDirectoryError> {
        Ok(())
    }

    async fn put_user_like(
        &self,
        _user: &UserName,
        id: ReactionId,
        payload: &ReactionPayload,
    ) -> Result<Reaction, UserDirectoryError> {
        Ok(Reaction::new(id, payload.clone()))
    }

    async fn put_user_dislike(
        &self,
        _user: &UserName,
        id: ReactionId,
        payload: &ReactionPayload,
    ) -> Result<Reaction, UserDirectoryError> {
        Ok(Reaction::new(id, payload.clone()))
    }
}
