//! Ordered user collection with unique identifiers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::user::{User, UserName};

/// Errors raised when building a [`UserList`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserListError {
    /// Two entries share the same identifier.
    #[error("duplicate user '{user}' in list")]
    DuplicateUser {
        /// The repeated name.
        user: UserName,
    },
}

/// Ordered list of users, unique by [`UserName`].
///
/// # Examples
/// ```
/// use likeboard::domain::{User, UserList, UserName};
///
/// let alice = User::named(UserName::new("alice").expect("valid name"));
/// let list = UserList::new(vec![alice]).expect("unique users");
/// assert_eq!(list.first().map(|u| u.name().as_str()), Some("alice"));
/// assert!(list.find("bob").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<User>", into = "Vec<User>")]
pub struct UserList(Vec<User>);

impl UserList {
    /// Validate uniqueness and wrap the users.
    pub fn new(users: Vec<User>) -> Result<Self, UserListError> {
        for (index, user) in users.iter().enumerate() {
            if users
                .iter()
                .take(index)
                .any(|earlier| earlier.name() == user.name())
            {
                return Err(UserListError::DuplicateUser {
                    user: user.name().clone(),
                });
            }
        }
        Ok(Self(users))
    }

    /// An empty list; the loader treats it as "not yet loaded".
    #[must_use]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// True when the list holds no users.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// First user, if any.
    #[must_use]
    pub fn first(&self) -> Option<&User> {
        self.0.first()
    }

    /// Find a user by identifier.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&User> {
        self.0.iter().find(|user| user.name().as_str() == name)
    }

    /// Iterate users in order.
    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, User> {
        self.0.iter()
    }

    /// Return a copy where the user named `name` is replaced by `patch(user)`.
    ///
    /// The patch must keep the user's name; other users are carried over
    /// unchanged and in order. An unknown name yields an unchanged copy.
    #[must_use]
    pub fn with_user_patched(&self, name: &UserName, patch: impl FnOnce(&User) -> User) -> Self {
        let mut users = self.0.clone();
        if let Some(slot) = users.iter_mut().find(|user| user.name() == name) {
            let next = patch(slot);
            debug_assert_eq!(next.name(), slot.name());
            *slot = next;
        }
        Self(users)
    }
}

impl TryFrom<Vec<User>> for UserList {
    type Error = UserListError;

    fn try_from(value: Vec<User>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserList> for Vec<User> {
    fn from(value: UserList) -> Self {
        value.0
    }
}

impl<'a> IntoIterator for &'a UserList {
    type Item = &'a User;
    type IntoIter = std::slice::Iter<'a, User>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
