//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    FollowEdge, FollowId, Post, PostId, PostText, User, UserId, UserValidationError,
};

use super::schema::{followers, posts, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub name: String,
    pub age: i32,
}

impl TryFrom<UserRow> for User {
    type Error = UserValidationError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Self::try_from_parts(row.id, row.name, i64::from(row.age))
    }
}

/// Insertable and changeset struct for user profile fields.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserProfileRow<'a> {
    pub name: &'a str,
    pub age: i32,
}

/// Row struct for reading from the posts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PostRow {
    pub id: i64,
    pub post_text: String,
    pub created_at: DateTime<Utc>,
    pub user_id: i64,
}

impl TryFrom<PostRow> for Post {
    type Error = String;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        let text = PostText::new(row.post_text)
            .map_err(|err| format!("post {} has invalid text: {err}", row.id))?;
        Ok(Self {
            id: PostId::new(row.id),
            owner: UserId::new(row.user_id),
            text,
            created_at: row.created_at,
        })
    }
}

/// Insertable struct for new posts; `created_at` is left to the database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = posts)]
pub(crate) struct NewPostRow<'a> {
    pub post_text: &'a str,
    pub user_id: i64,
}

/// Row struct for reading from the followers table.
#[derive(Debug, Clone, Copy, Queryable, Selectable)]
#[diesel(table_name = followers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FollowerRow {
    pub id: i64,
    pub user_id: i64,
    pub follower_id: i64,
}

impl From<FollowerRow> for FollowEdge {
    fn from(row: FollowerRow) -> Self {
        Self {
            id: FollowId::new(row.id),
            followed: UserId::new(row.user_id),
            follower: UserId::new(row.follower_id),
        }
    }
}

/// Insertable struct for new follow edges.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = followers)]
pub(crate) struct NewFollowerRow {
    pub user_id: i64,
    pub follower_id: i64,
}
