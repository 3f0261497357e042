//! DTOs for decoding user directory JSON responses.
//!
//! The adapter decodes into these transport DTOs first, then maps into domain
//! users and records in one pass so validation failures carry context.

use serde::Deserialize;

use crate::domain::{Reaction, ReactionId, ReactionPayload, User, UserList, UserName};

#[derive(Debug, Deserialize)]
pub(super) struct UserDto {
    pub(super) user: String,
    #[serde(default)]
    pub(super) likes: Vec<ReactionDto>,
    #[serde(default)]
    pub(super) dislikes: Vec<ReactionDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ReactionDto {
    pub(super) id: u64,
    #[serde(flatten)]
    pub(super) payload: ReactionPayload,
}

impl ReactionDto {
    pub(super) fn into_domain(self) -> Reaction {
        Reaction::new(ReactionId::new(self.id), self.payload)
    }
}

impl UserDto {
    fn into_domain(self) -> Result<User, String> {
        let name = UserName::new(self.user.clone())
            .map_err(|err| format!("user {:?} is invalid: {err}", self.user))?;
        Ok(User::new(
            name,
            self.likes.into_iter().map(ReactionDto::into_domain).collect(),
            self.dislikes
                .into_iter()
                .map(ReactionDto::into_domain)
                .collect(),
        ))
    }
}

pub(super) fn into_user_list(dtos: Vec<UserDto>) -> Result<UserList, String> {
    let users = dtos
        .into_iter()
        .map(UserDto::into_domain)
        .collect::<Result<Vec<_>, _>>()?;
    UserList::new(users).map_err(|err| err.to_string())
}
