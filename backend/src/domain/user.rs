//! User data model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Name is empty once trimmed.
    #[error("name must not be blank")]
    BlankName,
    /// Age is below zero.
    #[error("age must not be negative")]
    NegativeAge,
    /// Age does not fit the stored integer range.
    #[error("age must be at most {max}")]
    AgeOutOfRange {
        /// Largest accepted age.
        max: i32,
    },
}

/// Store-generated user identifier.
///
/// # Examples
/// ```
/// use social_backend::domain::UserId;
///
/// let id = UserId::new(7);
/// assert_eq!(id.get(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
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

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Human readable user name; never blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Validate and construct a [`UserName`].
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(UserValidationError::BlankName);
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Non-negative user age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i32")]
pub struct Age(i32);

impl Age {
    /// Validate and construct an [`Age`] from any integer input.
    ///
    /// # Examples
    /// ```
    /// use social_backend::domain::{Age, UserValidationError};
    ///
    /// assert_eq!(Age::new(21).map(Age::get), Ok(21));
    /// assert_eq!(Age::new(-1), Err(UserValidationError::NegativeAge));
    /// ```
    pub fn new(age: i64) -> Result<Self, UserValidationError> {
        if age < 0 {
            return Err(UserValidationError::NegativeAge);
        }
        i32::try_from(age)
            .map(Self)
            .map_err(|_| UserValidationError::AgeOutOfRange { max: i32::MAX })
    }

    /// Raw age value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl From<Age> for i32 {
    fn from(value: Age) -> Self {
        value.0
    }
}

impl TryFrom<i64> for Age {
    type Error = UserValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Validated profile fields used to create or replace a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Display name.
    pub name: UserName,
    /// Age in years.
    pub age: Age,
}

/// Application user.
///
/// ## Invariants
/// - `name` is non-blank and `age` is non-negative, enforced by the field
///   types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: UserName,
    age: Age,
}

impl User {
    /// Build a new [`User`] from validated components.
    #[must_use]
    pub fn new(id: UserId, name: UserName, age: Age) -> Self {
        Self { id, name, age }
    }

    /// Build a [`User`] from raw values read back from storage.
    pub fn try_from_parts(
        id: i64,
        name: impl Into<String>,
        age: i64,
    ) -> Result<Self, UserValidationError> {
        Ok(Self::new(UserId::new(id), UserName::new(name)?, Age::new(age)?))
    }

    /// Stable user identifier.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Age in years.
    #[must_use]
    pub fn age(&self) -> Age {
        self.age
    }

    /// Replace the profile fields, keeping the identifier.
    #[must_use]
    pub fn with_profile(self, profile: NewUser) -> Self {
        Self::new(self.id, profile.name, profile.age)
    }
}
