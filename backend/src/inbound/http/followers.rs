//! Follow graph handlers.
//!
//! ```text
//! PUT    /api/v1/users/{id}/followers                {"followerId":2}
//! GET    /api/v1/users/{id}/followers
//! DELETE /api/v1/users/{id}/followers?followerId=2
//! ```

use actix_web::{HttpResponse, delete, get, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, FollowerSummary, FollowersOverview, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, field_error, parse_follower_id};

const FOLLOWER_ID: FieldName = FieldName::new("followerId");

/// Body for `PUT /users/{id}/followers`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FollowRequest {
    /// The user who starts following.
    #[schema(example = 2)]
    pub follower_id: Option<i64>,
}

/// Query string for `DELETE /users/{id}/followers`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UnfollowQuery {
    /// The user who stops following.
    #[serde(rename = "followerId")]
    #[param(value_type = Option<i64>)]
    pub follower_id: Option<String>,
}

/// One follower in a listing.
#[derive(Debug, Deserialize, Serialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FollowerResponse {
    /// Follow edge identifier.
    #[schema(example = 1)]
    pub follow_id: i64,
    /// Follower identifier.
    #[schema(example = 2)]
    pub user_id: i64,
    /// Follower display name.
    #[schema(example = "Bea")]
    pub name: String,
}

impl From<FollowerSummary> for FollowerResponse {
    fn from(value: FollowerSummary) -> Self {
        Self {
            follow_id: value.follow_id.get(),
            user_id: value.user_id.get(),
            name: value.name,
        }
    }
}

/// Followers of a user with their count.
#[derive(Debug, Deserialize, Serialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FollowersResponse {
    /// Number of entries in `content`.
    #[schema(example = 1)]
    pub followers_count: usize,
    /// Followers in the order they started following.
    pub content: Vec<FollowerResponse>,
}

impl From<FollowersOverview> for FollowersResponse {
    fn from(value: FollowersOverview) -> Self {
        Self {
            followers_count: value.followers_count,
            content: value.content.into_iter().map(Into::into).collect(),
        }
    }
}

/// Make `followerId` follow the user in the path.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}/followers",
    params(("id" = i64, Path, description = "User to follow")),
    request_body = FollowRequest,
    responses(
        (status = 204, description = "Following, including when already following"),
        (status = 404, description = "Unknown user or follower", body = ErrorSchema),
        (status = 409, description = "Self follow", body = ErrorSchema),
        (status = 422, description = "Malformed body", body = ErrorSchema)
    ),
    tags = ["followers"],
    operation_id = "followUser"
)]
#[put("/users/{id}/followers")]
pub async fn follow_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<FollowRequest>,
) -> ApiResult<HttpResponse> {
    let follower = payload
        .into_inner()
        .follower_id
        .ok_or_else(|| field_error(FOLLOWER_ID, "followerId is required"))?;
    state
        .social_command
        .follow_user(UserId::new(path.into_inner()), UserId::new(follower))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// List the followers of a user.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/followers",
    params(("id" = i64, Path, description = "Followed user")),
    responses(
        (status = 200, description = "Followers", body = FollowersResponse),
        (status = 404, description = "Unknown user", body = ErrorSchema)
    ),
    tags = ["followers"],
    operation_id = "listFollowers"
)]
#[get("/users/{id}/followers")]
pub async fn list_followers(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<FollowersResponse>> {
    let overview = state
        .social_query
        .list_followers(UserId::new(path.into_inner()))
        .await?;
    Ok(web::Json(overview.into()))
}

/// Stop `followerId` following the user in the path.
///
/// Succeeds when no edge exists.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}/followers",
    params(("id" = i64, Path, description = "Followed user"), UnfollowQuery),
    responses(
        (status = 204, description = "Not following"),
        (status = 400, description = "Missing or invalid followerId", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema)
    ),
    tags = ["followers"],
    operation_id = "unfollowUser"
)]
#[delete("/users/{id}/followers")]
pub async fn unfollow_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    query: web::Query<UnfollowQuery>,
) -> ApiResult<HttpResponse> {
    let raw = query
        .into_inner()
        .follower_id
        .ok_or_else(|| Error::invalid_request("'followerId' query parameter is required"))?;
    let follower = parse_follower_id(FOLLOWER_ID, &raw)?;
    state
        .social_command
        .unfollow_user(UserId::new(path.into_inner()), follower)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
