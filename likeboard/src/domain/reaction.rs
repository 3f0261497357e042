//! Like and dislike records.
//!
//! A record is an identifier plus an arbitrary JSON object payload. On the
//! wire the id sits alongside the payload fields: `{"id": 7, "topic": "jazz"}`.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Arbitrary JSON object carried by a record.
pub type ReactionPayload = Map<String, Value>;

/// Record identifier, unique within its parent collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReactionId(u64);

impl ReactionId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ReactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Selects the `likes` or `dislikes` collection of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactionKind {
    /// The `likes` collection.
    Like,
    /// The `dislikes` collection.
    Dislike,
}

impl ReactionKind {
    /// Singular lowercase label, e.g. `like`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }

    /// Collection name, also used as the HTTP path segment.
    #[must_use]
    pub const fn collection(self) -> &'static str {
        match self {
            Self::Like => "likes",
            Self::Dislike => "dislikes",
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single like or dislike record.
///
/// # Examples
/// ```
/// use likeboard::domain::{Reaction, ReactionId};
///
/// let reaction: Reaction =
///     serde_json::from_str(r#"{"id": 7, "topic": "jazz"}"#).expect("decode");
/// assert_eq!(reaction.id(), ReactionId::new(7));
/// assert_eq!(reaction.payload()["topic"], "jazz");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    id: ReactionId,
    #[serde(flatten)]
    payload: ReactionPayload,
}

impl Reaction {
    /// Build a record. An `id` key inside `payload` is discarded in favour of
    /// the explicit identifier.
    #[must_use]
    pub fn new(id: ReactionId, mut payload: ReactionPayload) -> Self {
        payload.remove("id");
        Self { id, payload }
    }

    /// Record identifier.
    #[must_use]
    pub const fn id(&self) -> ReactionId {
        self.id
    }

    /// Payload fields, excluding the id.
    #[must_use]
    pub const fn payload(&self) -> &ReactionPayload {
        &self.payload
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.id, Value::Object(self.payload.clone()))
    }
}
