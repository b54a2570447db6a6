//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{NewUser, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Driven port for user records.
///
/// Each method is a single statement; deleting a user also removes the posts
/// they own and every follow edge touching them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user and return it with its generated identifier.
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Return every user ordered by identifier.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Replace a user's profile fields; `None` when the user does not exist.
    async fn update(
        &self,
        id: UserId,
        profile: &NewUser,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Remove a user; `false` when the user does not exist.
    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError>;
}
