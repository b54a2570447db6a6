//! Post handlers.
//!
//! ```text
//! POST /api/v1/users/{id}/posts   {"text":"hello"}
//! GET  /api/v1/users/{id}/posts   followerId: 2
//! ```
//!
//! Reading posts requires the viewer to identify itself with the `followerId`
//! header and to follow the owner.

use actix_web::{HttpRequest, HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Post, PostText, UserId, VisiblePost};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldErrors, FieldName, parse_follower_id};

/// Header naming the viewer of a post listing. Header names are
/// case-insensitive, so clients may send `followerId`.
pub const FOLLOWER_ID_HEADER: &str = "followerid";

const TEXT: FieldName = FieldName::new("text");
const FOLLOWER_ID: FieldName = FieldName::new("followerId");

/// Body for `POST /users/{id}/posts`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    /// Post body; must not be blank.
    #[schema(example = "hello")]
    pub text: Option<String>,
}

impl CreatePostRequest {
    fn into_text(self) -> ApiResult<PostText> {
        let mut errors = FieldErrors::new();
        errors
            .require(TEXT, self.text)
            .and_then(|raw| errors.check(TEXT, PostText::new(raw)))
            .ok_or_else(|| errors.into_error())
    }
}

/// Post as returned after creation.
#[derive(Debug, Deserialize, Serialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    /// Store-generated identifier.
    #[schema(example = 1)]
    pub id: i64,
    /// Post body.
    #[schema(example = "hello")]
    pub text: String,
    /// Creation time.
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    /// Owner identifier.
    #[schema(example = 1)]
    pub user_id: i64,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.get(),
            text: post.text.as_ref().to_owned(),
            created_at: post.created_at,
            user_id: post.owner.get(),
        }
    }
}

/// Post as shown to a follower.
#[derive(Debug, Deserialize, Serialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VisiblePostResponse {
    /// Post body.
    #[schema(example = "hello")]
    pub text: String,
    /// Creation time.
    #[schema(value_type = String, format = DateTime)]
    pub date_time: DateTime<Utc>,
}

impl From<VisiblePost> for VisiblePostResponse {
    fn from(post: VisiblePost) -> Self {
        Self {
            text: post.text,
            date_time: post.created_at,
        }
    }
}

/// Read the optional viewer identifier from the request headers.
fn viewer_from_headers(req: &HttpRequest) -> ApiResult<Option<UserId>> {
    let Some(value) = req.headers().get(FOLLOWER_ID_HEADER) else {
        return Ok(None);
    };
    let raw = value
        .to_str()
        .map_err(|_| Error::invalid_request("'followerId' header must be an integer"))?;
    parse_follower_id(FOLLOWER_ID, raw).map(Some)
}

/// Publish a post for the user in the path.
#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/posts",
    params(("id" = i64, Path, description = "Post owner")),
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created", body = PostResponse),
        (status = 404, description = "Unknown owner", body = ErrorSchema),
        (status = 422, description = "Validation failed", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "createPost"
)]
#[post("/users/{id}/posts")]
pub async fn create_post(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<CreatePostRequest>,
) -> ApiResult<HttpResponse> {
    let text = payload.into_inner().into_text()?;
    let post = state
        .social_command
        .create_post(UserId::new(path.into_inner()), text)
        .await?;
    Ok(HttpResponse::Created().json(PostResponse::from(post)))
}

/// List the owner's posts, newest first, for a follower.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/posts",
    params(
        ("id" = i64, Path, description = "Post owner"),
        ("followerId" = Option<i64>, Header, description = "Viewer; must follow the owner")
    ),
    responses(
        (status = 200, description = "Posts, newest first", body = [VisiblePostResponse]),
        (status = 400, description = "Missing or unknown viewer", body = ErrorSchema),
        (status = 403, description = "Viewer does not follow the owner", body = ErrorSchema),
        (status = 404, description = "Unknown owner", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "listPosts"
)]
#[get("/users/{id}/posts")]
pub async fn list_posts(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    req: HttpRequest,
) -> ApiResult<web::Json<Vec<VisiblePostResponse>>> {
    let viewer = viewer_from_headers(&req)?;
    let posts = state
        .social_query
        .list_visible_posts(UserId::new(path.into_inner()), viewer)
        .await?;
    Ok(web::Json(posts.into_iter().map(Into::into).collect()))
}
