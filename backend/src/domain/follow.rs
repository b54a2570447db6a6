//! Follow relationships between users.
//!
//! A follow edge is directed: `follower` follows `followed`. At most one edge
//! exists per ordered pair. Cycles are allowed; self-loops are rejected by
//! the social access service before anything reaches storage.

use std::fmt;

use super::{User, UserId};

/// Store-generated follow edge identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FollowId(i64);

impl FollowId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for FollowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Directed follow edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FollowEdge {
    /// Edge identifier.
    pub id: FollowId,
    /// User being followed.
    pub followed: UserId,
    /// User doing the following.
    pub follower: UserId,
}

/// Outcome of inserting a follow edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowInsertOutcome {
    /// A new edge was stored.
    Inserted(FollowEdge),
    /// The ordered pair already had an edge; nothing changed.
    AlreadyExists,
}

/// A follow edge joined with the follower's profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowerEntry {
    /// Stored edge.
    pub edge: FollowEdge,
    /// The follower.
    pub follower: User,
}

/// One row of a followers listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowerSummary {
    /// Edge identifier.
    pub follow_id: FollowId,
    /// Follower identifier.
    pub user_id: UserId,
    /// Follower display name.
    pub name: String,
}

impl From<FollowerEntry> for FollowerSummary {
    fn from(value: FollowerEntry) -> Self {
        Self {
            follow_id: value.edge.id,
            user_id: value.follower.id(),
            name: value.follower.name().to_string(),
        }
    }
}

/// Followers of a user with their count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowersOverview {
    /// Number of entries in `content`.
    pub followers_count: usize,
    /// Followers in insertion order.
    pub content: Vec<FollowerSummary>,
}

impl FollowersOverview {
    /// Build an overview, deriving the count from the entries.
    #[must_use]
    pub fn from_entries(entries: Vec<FollowerEntry>) -> Self {
        let content: Vec<FollowerSummary> = entries.into_iter().map(Into::into).collect();
        Self {
            followers_count: content.len(),
            content,
        }
    }
}
