//! Social access service.
//!
//! Owns the follow graph rules and the visibility gate on posts. Every
//! operation runs inside one [`SocialUnitOfWork`] so existence checks and the
//! writes that depend on them observe the same transaction.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::FutureExt as _;
use tracing::{debug, info};

use crate::domain::ports::{
    SocialGraphCommand, SocialGraphQuery, SocialStore, SocialStoreError, SocialUnitOfWork,
};
use crate::domain::{
    Error, FollowInsertOutcome, FollowersOverview, Post, PostText, User, UserId, VisiblePost,
};

/// Message returned when a user tries to follow themselves.
pub const SELF_FOLLOW_MESSAGE: &str = "You can't follow yourself!";
/// Message returned when a post listing omits the viewer identifier.
pub const MISSING_VIEWER_MESSAGE: &str =
    "You forgot to send 'followerId' on the request Header!";
/// Message returned when the viewer identifier names no user.
pub const UNKNOWN_VIEWER_MESSAGE: &str = "Inexistent 'followerId'!";
/// Message returned when the viewer does not follow the post owner.
pub const NOT_A_FOLLOWER_MESSAGE: &str = "You can't see these posts!";

/// Social access service implementing [`SocialGraphCommand`] and
/// [`SocialGraphQuery`].
#[derive(Clone)]
pub struct SocialAccessService<U> {
    unit_of_work: Arc<U>,
}

impl<U> SocialAccessService<U> {
    /// Create a new service over the given unit of work.
    pub fn new(unit_of_work: Arc<U>) -> Self {
        Self { unit_of_work }
    }
}

async fn require_user(
    store: &mut dyn SocialStore,
    id: UserId,
    role: &str,
) -> Result<User, Error> {
    store
        .find_user(id)
        .await
        .map_err(SocialStoreError::into_domain)?
        .ok_or_else(|| Error::not_found(format!("{role} {id} not found")))
}

#[async_trait]
impl<U> SocialGraphCommand for SocialAccessService<U>
where
    U: SocialUnitOfWork,
{
    async fn follow_user(&self, target: UserId, follower: UserId) -> Result<(), Error> {
        if target == follower {
            return Err(Error::conflict(SELF_FOLLOW_MESSAGE));
        }

        let outcome = self
            .unit_of_work
            .run(move |store| {
                async move {
                    require_user(store, target, "user").await?;
                    require_user(store, follower, "follower").await?;
                    if store.follow_exists(follower, target).await? {
                        return Ok(FollowInsertOutcome::AlreadyExists);
                    }
                    Ok(store.insert_follow(follower, target).await?)
                }
                .boxed()
            })
            .await?;

        match outcome {
            FollowInsertOutcome::Inserted(edge) => {
                info!(follow_id = %edge.id, %follower, %target, "follow edge created");
            }
            FollowInsertOutcome::AlreadyExists => {
                debug!(%follower, %target, "follow edge already present");
            }
        }
        Ok(())
    }

    async fn unfollow_user(&self, target: UserId, follower: UserId) -> Result<(), Error> {
        let removed = self
            .unit_of_work
            .run(move |store| {
                async move {
                    require_user(store, target, "user").await?;
                    Ok(store.delete_follow(follower, target).await?)
                }
                .boxed()
            })
            .await?;

        if removed {
            info!(%follower, %target, "follow edge removed");
        } else {
            debug!(%follower, %target, "no follow edge to remove");
        }
        Ok(())
    }

    async fn create_post(&self, owner: UserId, text: PostText) -> Result<Post, Error> {
        let post = self
            .unit_of_work
            .run(move |store| {
                async move {
                    require_user(store, owner, "user").await?;
                    Ok(store.insert_post(owner, &text).await?)
                }
                .boxed()
            })
            .await?;

        info!(post_id = %post.id, %owner, "post created");
        Ok(post)
    }
}

#[async_trait]
impl<U> SocialGraphQuery for SocialAccessService<U>
where
    U: SocialUnitOfWork,
{
    async fn list_followers(&self, target: UserId) -> Result<FollowersOverview, Error> {
        self.unit_of_work
            .run(move |store| {
                async move {
                    require_user(store, target, "user").await?;
                    let entries = store.list_followers(target).await?;
                    Ok(FollowersOverview::from_entries(entries))
                }
                .boxed()
            })
            .await
    }

    async fn list_visible_posts(
        &self,
        owner: UserId,
        viewer: Option<UserId>,
    ) -> Result<Vec<VisiblePost>, Error> {
        self.unit_of_work
            .run(move |store| {
                async move {
                    require_user(store, owner, "user").await?;
                    let viewer =
                        viewer.ok_or_else(|| Error::invalid_request(MISSING_VIEWER_MESSAGE))?;
                    if store.find_user(viewer).await?.is_none() {
                        return Err(Error::invalid_request(UNKNOWN_VIEWER_MESSAGE));
                    }
                    if !store.follow_exists(viewer, owner).await? {
                        return Err(Error::forbidden(NOT_A_FOLLOWER_MESSAGE));
                    }
                    let posts = store.posts_by_owner(owner).await?;
                    Ok(posts.into_iter().map(VisiblePost::from).collect())
                }
                .boxed()
            })
            .await
    }
}

#[cfg(test)]
#[path = "social_access_service_tests.rs"]
mod tests;
