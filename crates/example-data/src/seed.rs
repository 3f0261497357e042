//! Generated user seed types.
//!
//! These mirror the shape of the application's users and reaction records
//! without depending on them.

use serde::{Deserialize, Serialize};

/// A generated like or dislike record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleReactionSeed {
    /// Identifier, unique within the owning collection.
    pub id: u64,
    /// Topic the user reacted to.
    pub topic: String,
}

/// A generated example user.
///
/// # Example
///
/// ```
/// use example_data::{ExampleReactionSeed, ExampleUserSeed};
///
/// let user = ExampleUserSeed {
///     user: "ada_lovelace".to_owned(),
///     likes: vec![ExampleReactionSeed { id: 1, topic: "chess".to_owned() }],
///     dislikes: vec![],
/// };
///
/// assert_eq!(user.likes.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleUserSeed {
    /// Unique handle used as the user identifier.
    pub user: String,
    /// Liked topics, ids counting up from 1.
    pub likes: Vec<ExampleReactionSeed>,
    /// Disliked topics, ids counting up from 1.
    pub dislikes: Vec<ExampleReactionSeed>,
}
