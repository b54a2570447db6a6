//! Driving port for social graph reads.

use async_trait::async_trait;

use crate::domain::{Error, FollowersOverview, UserId, VisiblePost};

/// Domain use-case port for follower listings and visibility-gated posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SocialGraphQuery: Send + Sync {
    /// List the followers of `target`.
    async fn list_followers(&self, target: UserId) -> Result<FollowersOverview, Error>;

    /// List `owner`'s posts, newest first, if `viewer` follows `owner`.
    ///
    /// `viewer` is `None` when the caller did not identify itself.
    async fn list_visible_posts(
        &self,
        owner: UserId,
        viewer: Option<UserId>,
    ) -> Result<Vec<VisiblePost>, Error>;
}
