//! Driving port for user mutations.

use async_trait::async_trait;

use crate::domain::{Error, NewUser, User, UserId};

/// Domain use-case port for creating, replacing and removing users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Create a user from validated profile fields.
    async fn create_user(&self, user: NewUser) -> Result<User, Error>;

    /// Replace the profile fields of an existing user.
    async fn update_user(&self, id: UserId, profile: NewUser) -> Result<User, Error>;

    /// Delete a user together with their posts and follow edges.
    async fn delete_user(&self, id: UserId) -> Result<(), Error>;
}
