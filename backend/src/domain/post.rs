//! Posts authored by users.

use std::fmt;

use chrono::{DateTime, Utc};

use super::UserId;

/// Validation errors for post content.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PostValidationError {
    /// Text is empty once trimmed.
    #[error("text must not be blank")]
    BlankText,
}

/// Store-generated post identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PostId(i64);

impl PostId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Post body; never blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostText(String);

impl PostText {
    /// Validate and construct [`PostText`].
    ///
    /// # Examples
    /// ```
    /// use social_backend::domain::PostText;
    ///
    /// assert!(PostText::new("hello").is_ok());
    /// assert!(PostText::new("  ").is_err());
    /// ```
    pub fn new(text: impl Into<String>) -> Result<Self, PostValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(PostValidationError::BlankText);
        }
        Ok(Self(text))
    }
}

impl AsRef<str> for PostText {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Persisted post. Immutable once created.
///
/// `created_at` is assigned by the store when the post is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// Post identifier.
    pub id: PostId,
    /// Owning user.
    pub owner: UserId,
    /// Post body.
    pub text: PostText,
    /// Store-assigned creation time.
    pub created_at: DateTime<Utc>,
}

/// Projection of a post returned to an authorised viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisiblePost {
    /// Post body.
    pub text: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl From<Post> for VisiblePost {
    fn from(value: Post) -> Self {
        Self {
            text: value.text.0,
            created_at: value.created_at,
        }
    }
}
