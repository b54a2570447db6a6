//! Driven ports for the social graph: users, follow edges and posts.
//!
//! The social access service needs all three stores inside one transaction,
//! so they are exposed as a single [`SocialStore`] handed out by a
//! [`SocialUnitOfWork`]. Adapters commit the unit when the work returns `Ok`
//! and roll it back otherwise.

use async_trait::async_trait;
use futures_util::future::BoxFuture;

use crate::domain::{
    Error, FollowEdge, FollowInsertOutcome, FollowerEntry, Post, PostText, User, UserId,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by social store adapters.
    pub enum SocialStoreError {
        /// The store could not be reached.
        Connection { message: String } => "social store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "social store query failed: {message}",
        /// A referenced user vanished between lookup and write.
        MissingReference { message: String } => "social store reference missing: {message}",
    }
}

/// Transaction-scoped access to users, follow edges and posts.
#[async_trait]
pub trait SocialStore: Send {
    /// Fetch a user by identifier.
    async fn find_user(&mut self, id: UserId) -> Result<Option<User>, SocialStoreError>;

    /// Whether `follower` currently follows `followed`.
    async fn follow_exists(
        &mut self,
        follower: UserId,
        followed: UserId,
    ) -> Result<bool, SocialStoreError>;

    /// Store an edge. A duplicate ordered pair is reported as
    /// [`FollowInsertOutcome::AlreadyExists`], not as an error.
    async fn insert_follow(
        &mut self,
        follower: UserId,
        followed: UserId,
    ) -> Result<FollowInsertOutcome, SocialStoreError>;

    /// Remove the edge for the ordered pair if present; returns whether a row
    /// was removed.
    async fn delete_follow(
        &mut self,
        follower: UserId,
        followed: UserId,
    ) -> Result<bool, SocialStoreError>;

    /// Edges pointing at `followed`, joined with each follower, in insertion
    /// order.
    async fn list_followers(
        &mut self,
        followed: UserId,
    ) -> Result<Vec<FollowerEntry>, SocialStoreError>;

    /// Persist a post; the store assigns the identifier and timestamp.
    async fn insert_post(&mut self, owner: UserId, text: &PostText)
    -> Result<Post, SocialStoreError>;

    /// Posts owned by `owner`, newest first.
    async fn posts_by_owner(&mut self, owner: UserId) -> Result<Vec<Post>, SocialStoreError>;
}

/// Transactional boundary for social operations.
#[async_trait]
pub trait SocialUnitOfWork: Send + Sync {
    /// Run `work` inside one transaction.
    ///
    /// The transaction commits when `work` returns `Ok` and rolls back when it
    /// returns `Err`. Store failures raised while opening or committing the
    /// transaction are converted into domain errors.
    async fn run<R, F>(&self, work: F) -> Result<R, Error>
    where
        R: Send + 'static,
        F: for<'t> FnOnce(&'t mut dyn SocialStore) -> BoxFuture<'t, Result<R, Error>>
            + Send
            + 'static;
}

impl SocialStoreError {
    /// Translate a store failure into a domain error.
    ///
    /// Connection failures surface as unavailable, a vanished reference as
    /// not found, and anything else as internal.
    pub fn into_domain(self) -> Error {
        match self {
            Self::Connection { message } => {
                Error::service_unavailable(format!("social store unavailable: {message}"))
            }
            Self::MissingReference { message } => Error::not_found(message),
            Self::Query { message } => Error::internal(format!("social store error: {message}")),
        }
    }
}

impl From<SocialStoreError> for Error {
    fn from(value: SocialStoreError) -> Self {
        value.into_domain()
    }
}

/// Edge lookup helper shared by adapters that keep edges in memory.
#[must_use]
pub fn matches_pair(edge: &FollowEdge, follower: UserId, followed: UserId) -> bool {
    edge.follower == follower && edge.followed == followed
}
