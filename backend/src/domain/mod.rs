//! Domain primitives, aggregates and services.
//!
//! Purpose: define the strongly typed entities shared by the HTTP and
//! persistence layers, and the services that enforce the follow graph and
//! post visibility rules. Invariants and serde contracts live in each type's
//! Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable error identifier.
//! - User, UserId, UserName, Age, NewUser: user identity and profile.
//! - Post, PostId, PostText, VisiblePost: posts and their public view.
//! - FollowEdge, FollowersOverview and friends: the follow graph.
//! - UserService, SocialAccessService: driving port implementations.

pub mod error;
pub mod follow;
pub mod ports;
pub mod post;
pub mod social_access_service;
pub mod trace_id;
pub mod user;
pub mod user_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::follow::{
    FollowEdge, FollowId, FollowInsertOutcome, FollowerEntry, FollowerSummary, FollowersOverview,
};
pub use self::post::{Post, PostId, PostText, PostValidationError, VisiblePost};
pub use self::social_access_service::{
    MISSING_VIEWER_MESSAGE, NOT_A_FOLLOWER_MESSAGE, SELF_FOLLOW_MESSAGE, SocialAccessService,
    UNKNOWN_VIEWER_MESSAGE,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Age, NewUser, User, UserId, UserName, UserValidationError};
pub use self::user_service::UserService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use social_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
