//! PostgreSQL-backed social store and unit of work.
//!
//! Every unit of work checks out one pooled connection and runs inside a
//! single transaction at the default `READ COMMITTED` level. Duplicate follow
//! edges are absorbed by the `(follower_id, user_id)` unique constraint, so
//! two concurrent follow requests for the same pair store one row.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use futures_util::future::BoxFuture;
use tracing::debug;

use crate::domain::ports::{SocialStore, SocialStoreError, SocialUnitOfWork};
use crate::domain::{
    Error, FollowEdge, FollowInsertOutcome, FollowerEntry, Post, PostText, User, UserId,
};

use super::diesel_helpers::{map_social_diesel_error, map_social_pool_error};
use super::models::{FollowerRow, NewFollowerRow, NewPostRow, PostRow, UserRow};
use super::pool::DbPool;
use super::schema::{followers, posts, users};

/// [`SocialStore`] bound to a connection with an open transaction.
pub struct DieselSocialStore<'c> {
    conn: &'c mut AsyncPgConnection,
}

impl<'c> DieselSocialStore<'c> {
    fn new(conn: &'c mut AsyncPgConnection) -> Self {
        Self { conn }
    }

    fn conn(&mut self) -> &mut AsyncPgConnection {
        self.conn
    }
}

fn row_to_user(row: UserRow) -> Result<User, SocialStoreError> {
    let id = row.id;
    User::try_from(row).map_err(|err| SocialStoreError::query(format!("user {id} is invalid: {err}")))
}

fn row_to_post(row: PostRow) -> Result<Post, SocialStoreError> {
    Post::try_from(row).map_err(SocialStoreError::query)
}

fn pair_filter(
    follower: UserId,
    followed: UserId,
) -> diesel::dsl::And<
    diesel::dsl::Eq<followers::follower_id, i64>,
    diesel::dsl::Eq<followers::user_id, i64>,
> {
    followers::follower_id
        .eq(follower.get())
        .and(followers::user_id.eq(followed.get()))
}

#[async_trait]
impl SocialStore for DieselSocialStore<'_> {
    async fn find_user(&mut self, id: UserId) -> Result<Option<User>, SocialStoreError> {
        let row: Option<UserRow> = users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(self.conn())
            .await
            .optional()
            .map_err(|err| map_social_diesel_error(err, "find user"))?;

        row.map(row_to_user).transpose()
    }

    async fn follow_exists(
        &mut self,
        follower: UserId,
        followed: UserId,
    ) -> Result<bool, SocialStoreError> {
        diesel::select(diesel::dsl::exists(
            followers::table.filter(pair_filter(follower, followed)),
        ))
        .get_result(self.conn())
        .await
        .map_err(|err| map_social_diesel_error(err, "check follow"))
    }

    async fn insert_follow(
        &mut self,
        follower: UserId,
        followed: UserId,
    ) -> Result<FollowInsertOutcome, SocialStoreError> {
        let new_edge = NewFollowerRow {
            user_id: followed.get(),
            follower_id: follower.get(),
        };

        let inserted: Option<FollowerRow> = diesel::insert_into(followers::table)
            .values(&new_edge)
            .on_conflict((followers::follower_id, followers::user_id))
            .do_nothing()
            .returning(FollowerRow::as_returning())
            .get_result(self.conn())
            .await
            .optional()
            .map_err(|err| map_social_diesel_error(err, "insert follow"))?;

        Ok(match inserted {
            Some(row) => FollowInsertOutcome::Inserted(FollowEdge::from(row)),
            None => {
                debug!(%follower, %followed, "follow edge already stored");
                FollowInsertOutcome::AlreadyExists
            }
        })
    }

    async fn delete_follow(
        &mut self,
        follower: UserId,
        followed: UserId,
    ) -> Result<bool, SocialStoreError> {
        let removed = diesel::delete(followers::table.filter(pair_filter(follower, followed)))
            .execute(self.conn())
            .await
            .map_err(|err| map_social_diesel_error(err, "delete follow"))?;

        Ok(removed > 0)
    }

    async fn list_followers(
        &mut self,
        followed: UserId,
    ) -> Result<Vec<FollowerEntry>, SocialStoreError> {
        let rows: Vec<(FollowerRow, UserRow)> = followers::table
            .inner_join(users::table.on(users::id.eq(followers::follower_id)))
            .filter(followers::user_id.eq(followed.get()))
            .order(followers::id.asc())
            .select((FollowerRow::as_select(), UserRow::as_select()))
            .load(self.conn())
            .await
            .map_err(|err| map_social_diesel_error(err, "list followers"))?;

        rows.into_iter()
            .map(|(edge, follower)| {
                Ok(FollowerEntry {
                    edge: edge.into(),
                    follower: row_to_user(follower)?,
                })
            })
            .collect()
    }

    async fn insert_post(
        &mut self,
        owner: UserId,
        text: &PostText,
    ) -> Result<Post, SocialStoreError> {
        let new_post = NewPostRow {
            post_text: text.as_ref(),
            user_id: owner.get(),
        };

        let row: PostRow = diesel::insert_into(posts::table)
            .values(&new_post)
            .returning(PostRow::as_returning())
            .get_result(self.conn())
            .await
            .map_err(|err| map_social_diesel_error(err, "insert post"))?;

        row_to_post(row)
    }

    async fn posts_by_owner(&mut self, owner: UserId) -> Result<Vec<Post>, SocialStoreError> {
        let rows: Vec<PostRow> = posts::table
            .filter(posts::user_id.eq(owner.get()))
            .order((posts::created_at.desc(), posts::id.desc()))
            .select(PostRow::as_select())
            .load(self.conn())
            .await
            .map_err(|err| map_social_diesel_error(err, "list posts"))?;

        rows.into_iter().map(row_to_post).collect()
    }
}

/// Failure raised inside a Diesel transaction.
#[derive(Debug)]
enum TransactionFailure {
    /// Opening, committing or rolling back the transaction failed.
    Database(diesel::result::Error),
    /// The unit of work itself returned an error.
    Domain(Error),
}

impl From<diesel::result::Error> for TransactionFailure {
    fn from(value: diesel::result::Error) -> Self {
        Self::Database(value)
    }
}

impl TransactionFailure {
    fn into_domain(self) -> Error {
        match self {
            Self::Database(err) => map_social_diesel_error(err, "social transaction").into(),
            Self::Domain(err) => err,
        }
    }
}

/// Diesel-backed implementation of the `SocialUnitOfWork` port.
#[derive(Clone)]
pub struct DieselSocialUnitOfWork {
    pool: DbPool,
}

impl DieselSocialUnitOfWork {
    /// Create a unit of work factory over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SocialUnitOfWork for DieselSocialUnitOfWork {
    async fn run<R, F>(&self, work: F) -> Result<R, Error>
    where
        R: Send + 'static,
        F: for<'t> FnOnce(&'t mut dyn SocialStore) -> BoxFuture<'t, Result<R, Error>>
            + Send
            + 'static,
    {
        let mut pooled = self.pool.get().await.map_err(map_social_pool_error)?;
        let conn: &mut AsyncPgConnection = &mut pooled;

        conn.transaction::<R, TransactionFailure, _>(|conn| {
            async move {
                let mut store = DieselSocialStore::new(conn);
                work(&mut store).await.map_err(TransactionFailure::Domain)
            }
            .scope_boxed()
        })
        .await
        .map_err(TransactionFailure::into_domain)
    }
}
