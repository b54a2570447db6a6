//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Deleting a user relies on the `ON DELETE CASCADE` foreign keys declared in
//! the migrations to remove their posts and follow edges.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserId};

use super::diesel_helpers::{map_user_diesel_error, map_user_pool_error};
use super::models::{UserProfileRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn profile_row(user: &NewUser) -> UserProfileRow<'_> {
    UserProfileRow {
        name: user.name.as_ref(),
        age: user.age.get(),
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let id = row.id;
    User::try_from(row)
        .map_err(|err| UserPersistenceError::query(format!("user {id} is invalid: {err}")))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_user_pool_error)?;

        let row: UserRow = diesel::insert_into(users::table)
            .values(&profile_row(user))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_user_diesel_error(err, "create user"))?;

        row_to_user(row)
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_user_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .order(users::id.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_user_diesel_error(err, "list users"))?;

        rows.into_iter().map(row_to_user).collect()
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_user_pool_error)?;

        let row: Option<UserRow> = users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_user_diesel_error(err, "find user"))?;

        row.map(row_to_user).transpose()
    }

    async fn update(
        &self,
        id: UserId,
        profile: &NewUser,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_user_pool_error)?;

        let row: Option<UserRow> = diesel::update(users::table.find(id.get()))
            .set(&profile_row(profile))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_user_diesel_error(err, "update user"))?;

        row.map(row_to_user).transpose()
    }

    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_user_pool_error)?;

        let removed = diesel::delete(users::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(|err| map_user_diesel_error(err, "delete user"))?;

        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn valid_rows_convert_to_users() {
        let user = row_to_user(UserRow {
            id: 7,
            name: "Ada".to_owned(),
            age: 36,
        })
        .expect("valid row");

        assert_eq!(user.id(), UserId::new(7));
        assert_eq!(user.name().as_ref(), "Ada");
        assert_eq!(user.age().get(), 36);
    }

    #[rstest]
    #[case("", 20)]
    #[case("Ada", -1)]
    fn corrupt_rows_are_query_errors(#[case] name: &str, #[case] age: i32) {
        let err = row_to_user(UserRow {
            id: 3,
            name: name.to_owned(),
            age,
        })
        .expect_err("corrupt row");

        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }
}
