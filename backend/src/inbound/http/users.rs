//! Users API handlers.
//!
//! ```text
//! POST   /api/v1/users        {"name":"Ada","age":36}
//! GET    /api/v1/users
//! GET    /api/v1/users/{id}
//! PUT    /api/v1/users/{id}   {"name":"Ada","age":37}
//! DELETE /api/v1/users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Age, NewUser, User, UserId, UserName};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldErrors, FieldName};

const NAME: FieldName = FieldName::new("name");
const AGE: FieldName = FieldName::new("age");

/// Body for `POST /users` and `PUT /users/{id}`.
///
/// Both fields are optional at the wire level so that missing and invalid
/// values are reported together.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    /// Display name; must not be blank.
    #[schema(example = "Ada")]
    pub name: Option<String>,
    /// Age in years; must not be negative.
    #[schema(example = 36)]
    pub age: Option<i64>,
}

impl UserRequest {
    /// Validate every field, collecting all failures.
    fn into_new_user(self) -> ApiResult<NewUser> {
        let mut errors = FieldErrors::new();
        let name = errors
            .require(NAME, self.name)
            .and_then(|raw| errors.check(NAME, UserName::new(raw)));
        let age = errors
            .require(AGE, self.age)
            .and_then(|raw| errors.check(AGE, Age::new(raw)));

        match (name, age) {
            (Some(name), Some(age)) => Ok(NewUser { name, age }),
            _ => Err(errors.into_error()),
        }
    }
}

/// User as returned by the API.
#[derive(Debug, Deserialize, Serialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Store-generated identifier.
    #[schema(example = 1)]
    pub id: i64,
    /// Display name.
    #[schema(example = "Ada")]
    pub name: String,
    /// Age in years.
    #[schema(example = 36)]
    pub age: i32,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id().get(),
            name: user.name().to_string(),
            age: user.age().get(),
        }
    }
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = UserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 422, description = "Validation failed", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserRequest>,
) -> ApiResult<HttpResponse> {
    let new_user = payload.into_inner().into_new_user()?;
    let user = state.users_command.create_user(new_user).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// List every user ordered by identifier.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Users", body = [UserResponse]),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let users = state.users_query.list_users().await?;
    Ok(web::Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Fetch a single user.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 404, description = "Unknown user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<UserResponse>> {
    let user = state
        .users_query
        .get_user(UserId::new(path.into_inner()))
        .await?;
    Ok(web::Json(user.into()))
}

/// Replace a user's name and age.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    request_body = UserRequest,
    responses(
        (status = 204, description = "User updated"),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 422, description = "Validation failed", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<UserRequest>,
) -> ApiResult<HttpResponse> {
    let profile = payload.into_inner().into_new_user()?;
    state
        .users_command
        .update_user(UserId::new(path.into_inner()), profile)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a user together with their posts and follow edges.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "Unknown user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .users_command
        .delete_user(UserId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests;
