//! In-process social store.
//!
//! Used when no database is configured and by tests. Mirrors the PostgreSQL
//! schema rules: one edge per ordered pair, foreign keys on every user
//! reference, and cascading deletes when a user is removed.
//!
//! Units of work are serialised behind a single async mutex and write to the
//! shared state directly. Every write records an undo entry; a failed unit
//! replays the entries in reverse, so reads never copy the state.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use futures_util::future::BoxFuture;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::ports::{
    SocialStore, SocialStoreError, SocialUnitOfWork, UserPersistenceError, UserRepository,
    matches_pair,
};
use crate::domain::{
    Error, FollowEdge, FollowId, FollowInsertOutcome, FollowerEntry, NewUser, Post, PostId,
    PostText, User, UserId,
};

#[derive(Debug, Default)]
struct SocialState {
    users: BTreeMap<UserId, User>,
    follows: Vec<FollowEdge>,
    posts: Vec<Post>,
    last_user_id: i64,
    last_follow_id: i64,
    last_post_id: i64,
}

impl SocialState {
    fn missing_user(id: UserId) -> SocialStoreError {
        SocialStoreError::missing_reference(format!("user {id} not found"))
    }

    fn require_user(&self, id: UserId) -> Result<(), SocialStoreError> {
        if self.users.contains_key(&id) {
            Ok(())
        } else {
            Err(Self::missing_user(id))
        }
    }

    fn remove_user(&mut self, id: UserId) -> bool {
        if self.users.remove(&id).is_none() {
            return false;
        }
        self.follows
            .retain(|edge| edge.follower != id && edge.followed != id);
        self.posts.retain(|post| post.owner != id);
        true
    }
}

/// In-memory implementation of the social and user ports.
#[derive(Debug, Default)]
pub struct InMemorySocialStore {
    state: Mutex<SocialState>,
}

impl InMemorySocialStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Reversal of a single write made inside a unit of work.
#[derive(Debug)]
enum Undo {
    FollowInserted,
    FollowDeleted { index: usize, edge: FollowEdge },
    PostInserted,
}

/// Live view of the locked state handed to a unit of work.
struct MemoryTransaction<'a> {
    state: &'a mut SocialState,
    undo: Vec<Undo>,
}

impl<'a> MemoryTransaction<'a> {
    fn new(state: &'a mut SocialState) -> Self {
        Self {
            state,
            undo: Vec::new(),
        }
    }

    /// Keep every write made so far.
    fn commit(mut self) {
        self.undo.clear();
    }

    /// Revert every recorded write, newest first.
    fn roll_back(&mut self) -> usize {
        let entries = std::mem::take(&mut self.undo);
        let reverted = entries.len();
        for entry in entries.into_iter().rev() {
            match entry {
                Undo::FollowInserted => {
                    self.state.follows.pop();
                    self.state.last_follow_id -= 1;
                }
                Undo::FollowDeleted { index, edge } => self.state.follows.insert(index, edge),
                Undo::PostInserted => {
                    self.state.posts.pop();
                    self.state.last_post_id -= 1;
                }
            }
        }
        reverted
    }
}

// A unit of work dropped before completion leaves no partial writes behind.
impl Drop for MemoryTransaction<'_> {
    fn drop(&mut self) {
        self.roll_back();
    }
}

#[async_trait]
impl SocialStore for MemoryTransaction<'_> {
    async fn find_user(&mut self, id: UserId) -> Result<Option<User>, SocialStoreError> {
        Ok(self.state.users.get(&id).cloned())
    }

    async fn follow_exists(
        &mut self,
        follower: UserId,
        followed: UserId,
    ) -> Result<bool, SocialStoreError> {
        Ok(self
            .state
            .follows
            .iter()
            .any(|edge| matches_pair(edge, follower, followed)))
    }

    async fn insert_follow(
        &mut self,
        follower: UserId,
        followed: UserId,
    ) -> Result<FollowInsertOutcome, SocialStoreError> {
        self.state.require_user(follower)?;
        self.state.require_user(followed)?;
        if self
            .state
            .follows
            .iter()
            .any(|edge| matches_pair(edge, follower, followed))
        {
            return Ok(FollowInsertOutcome::AlreadyExists);
        }
        self.state.last_follow_id += 1;
        let edge = FollowEdge {
            id: FollowId::new(self.state.last_follow_id),
            followed,
            follower,
        };
        self.state.follows.push(edge);
        self.undo.push(Undo::FollowInserted);
        Ok(FollowInsertOutcome::Inserted(edge))
    }

    async fn delete_follow(
        &mut self,
        follower: UserId,
        followed: UserId,
    ) -> Result<bool, SocialStoreError> {
        let Some(index) = self
            .state
            .follows
            .iter()
            .position(|edge| matches_pair(edge, follower, followed))
        else {
            return Ok(false);
        };
        let edge = self.state.follows.remove(index);
        self.undo.push(Undo::FollowDeleted { index, edge });
        Ok(true)
    }

    async fn list_followers(
        &mut self,
        followed: UserId,
    ) -> Result<Vec<FollowerEntry>, SocialStoreError> {
        let state = &self.state;
        state
            .follows
            .iter()
            .filter(|edge| edge.followed == followed)
            .map(|edge| {
                state
                    .users
                    .get(&edge.follower)
                    .cloned()
                    .map(|follower| FollowerEntry {
                        edge: *edge,
                        follower,
                    })
                    .ok_or_else(|| SocialState::missing_user(edge.follower))
            })
            .collect()
    }

    async fn insert_post(
        &mut self,
        owner: UserId,
        text: &PostText,
    ) -> Result<Post, SocialStoreError> {
        self.state.require_user(owner)?;
        self.state.last_post_id += 1;
        let post = Post {
            id: PostId::new(self.state.last_post_id),
            owner,
            text: text.clone(),
            created_at: Utc::now(),
        };
        self.state.posts.push(post.clone());
        self.undo.push(Undo::PostInserted);
        Ok(post)
    }

    async fn posts_by_owner(&mut self, owner: UserId) -> Result<Vec<Post>, SocialStoreError> {
        let mut posts: Vec<Post> = self
            .state
            .posts
            .iter()
            .filter(|post| post.owner == owner)
            .cloned()
            .collect();
        posts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(posts)
    }
}

#[async_trait]
impl SocialUnitOfWork for InMemorySocialStore {
    async fn run<R, F>(&self, work: F) -> Result<R, Error>
    where
        R: Send + 'static,
        F: for<'t> FnOnce(&'t mut dyn SocialStore) -> BoxFuture<'t, Result<R, Error>>
            + Send
            + 'static,
    {
        let mut guard = self.state.lock().await;
        let mut transaction = MemoryTransaction::new(&mut guard);
        let result = work(&mut transaction).await;
        match &result {
            Ok(_) => transaction.commit(),
            Err(error) => {
                let reverted = transaction.roll_back();
                debug!(code = ?error.code(), reverted, "in-memory unit of work rolled back");
            }
        }
        result
    }
}

#[async_trait]
impl UserRepository for InMemorySocialStore {
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut state = self.state.lock().await;
        state.last_user_id += 1;
        let created = User::new(
            UserId::new(state.last_user_id),
            user.name.clone(),
            user.age,
        );
        state.users.insert(created.id(), created.clone());
        Ok(created)
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.state.lock().await.users.values().cloned().collect())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.state.lock().await.users.get(&id).cloned())
    }

    async fn update(
        &self,
        id: UserId,
        profile: &NewUser,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut state = self.state.lock().await;
        let Some(existing) = state.users.remove(&id) else {
            return Ok(None);
        };
        let updated = existing.with_profile(profile.clone());
        state.users.insert(id, updated.clone());
        Ok(Some(updated))
    }

    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        Ok(self.state.lock().await.remove_user(id))
    }
}
