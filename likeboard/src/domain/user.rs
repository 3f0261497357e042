//! User data model.
//!
//! Purpose: define the users shown in the list together with their like and
//! dislike records. A `UserName` doubles as the URL path segment for the
//! selected user, so it is validated on construction.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::reaction::{Reaction, ReactionId, ReactionKind};

/// Validation errors returned by [`UserName::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// The name is empty.
    EmptyName,
    /// The name contains a path separator.
    ContainsSlash,
    /// The name is `.` or `..`, which URLs resolve as dot segments.
    DotSegment,
    /// The name starts or ends with whitespace.
    SurroundingWhitespace,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "user name must not be empty"),
            Self::ContainsSlash => write!(f, "user name must not contain '/'"),
            Self::DotSegment => write!(f, "user name must not be '.' or '..'"),
            Self::SurroundingWhitespace => {
                write!(f, "user name must not start or end with whitespace")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Unique user identifier, usable as a single URL path segment.
///
/// ## Invariants
/// - Non-empty.
/// - Contains no `/`.
/// - Is neither `.` nor `..`.
/// - Has no leading or trailing whitespace.
///
/// # Examples
/// ```
/// use likeboard::domain::UserName;
///
/// let name = UserName::new("alice").expect("valid name");
/// assert_eq!(name.as_ref(), "alice");
/// assert!(UserName::new("a/b").is_err());
/// assert!(UserName::new("..").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Validate and construct a [`UserName`].
    pub fn new(raw: impl Into<String>) -> Result<Self, UserValidationError> {
        let value = raw.into();
        if value.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        if value.contains('/') {
            return Err(UserValidationError::ContainsSlash);
        }
        if value == "." || value == ".." {
            return Err(UserValidationError::DotSegment);
        }
        if value.trim() != value {
            return Err(UserValidationError::SurroundingWhitespace);
        }
        Ok(Self(value))
    }

    /// Borrow the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for UserName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

/// A user with ordered like and dislike records.
///
/// Users are never mutated in place; the `with_*` methods return a patched
/// copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    user: UserName,
    #[serde(default)]
    likes: Vec<Reaction>,
    #[serde(default)]
    dislikes: Vec<Reaction>,
}

impl User {
    /// Build a user from its name and record collections.
    #[must_use]
    pub fn new(user: UserName, likes: Vec<Reaction>, dislikes: Vec<Reaction>) -> Self {
        Self {
            user,
            likes,
            dislikes,
        }
    }

    /// Build a user with no records.
    #[must_use]
    pub fn named(user: UserName) -> Self {
        Self::new(user, Vec::new(), Vec::new())
    }

    /// Unique user identifier.
    #[must_use]
    pub const fn name(&self) -> &UserName {
        &self.user
    }

    /// Liked records in insertion order.
    #[must_use]
    pub fn likes(&self) -> &[Reaction] {
        &self.likes
    }

    /// Disliked records in insertion order.
    #[must_use]
    pub fn dislikes(&self) -> &[Reaction] {
        &self.dislikes
    }

    /// Records of the given kind.
    #[must_use]
    pub fn reactions(&self, kind: ReactionKind) -> &[Reaction] {
        match kind {
            ReactionKind::Like => &self.likes,
            ReactionKind::Dislike => &self.dislikes,
        }
    }

    /// Find a record of the given kind by id.
    #[must_use]
    pub fn find_reaction(&self, kind: ReactionKind, id: ReactionId) -> Option<&Reaction> {
        self.reactions(kind).iter().find(|reaction| reaction.id() == id)
    }

    /// Return a copy with `reaction` appended to the `kind` collection.
    ///
    /// A record already present with the same id is replaced in place so ids
    /// stay unique within the collection.
    #[must_use]
    pub fn with_reaction_added(&self, kind: ReactionKind, reaction: Reaction) -> Self {
        let mut next = self.clone();
        let collection = next.reactions_mut(kind);
        match collection
            .iter_mut()
            .find(|existing| existing.id() == reaction.id())
        {
            Some(existing) => *existing = reaction,
            None => collection.push(reaction),
        }
        next
    }

    /// Return a copy without the `kind` record matching `id`.
    #[must_use]
    pub fn with_reaction_removed(&self, kind: ReactionKind, id: ReactionId) -> Self {
        let mut next = self.clone();
        next.reactions_mut(kind).retain(|reaction| reaction.id() != id);
        next
    }

    fn reactions_mut(&mut self, kind: ReactionKind) -> &mut Vec<Reaction> {
        match kind {
            ReactionKind::Like => &mut self.likes,
            ReactionKind::Dislike => &mut self.dislikes,
        }
    }
}
