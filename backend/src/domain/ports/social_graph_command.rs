//! Driving port for social graph mutations.

use async_trait::async_trait;

use crate::domain::{Error, Post, PostText, UserId};

/// Domain use-case port for follow, unfollow and post creation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SocialGraphCommand: Send + Sync {
    /// Make `follower` follow `target`.
    ///
    /// Idempotent: following again succeeds without adding an edge.
    /// Following yourself is a conflict regardless of prior state.
    async fn follow_user(&self, target: UserId, follower: UserId) -> Result<(), Error>;

    /// Remove the edge `follower -> target` if present.
    ///
    /// Only the target is required to exist.
    async fn unfollow_user(&self, target: UserId, follower: UserId) -> Result<(), Error>;

    /// Create a post owned by `owner`.
    async fn create_post(&self, owner: UserId, text: PostText) -> Result<Post, Error>;
}
