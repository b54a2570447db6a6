//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint (users, followers, posts and
//! health) together with the error schema wrappers from
//! [`crate::inbound::http::schemas`]. The document is served by Swagger UI in
//! debug builds and exported via `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Social backend API",
        description = "Users, follow graph and follower-only posts."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::followers::follow_user,
        crate::inbound::http::followers::list_followers,
        crate::inbound::http::followers::unfollow_user,
        crate::inbound::http::posts::create_post,
        crate::inbound::http::posts::list_posts,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "users", description = "User registration and profiles"),
        (name = "followers", description = "The follow graph"),
        (name = "posts", description = "Posts visible to followers"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
