//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod followers;
pub mod health;
pub mod posts;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register the API handlers and extractor error mapping.
///
/// Mount inside the `/api/v1` scope; the handlers expect [`state::HttpState`]
/// as application data.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use social_backend::inbound::http::configure;
///
/// let _app = App::new().service(web::scope("/api/v1").configure(configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .app_data(validation::path_config())
        .app_data(validation::query_config())
        .service(users::create_user)
        .service(users::list_users)
        .service(users::get_user)
        .service(users::update_user)
        .service(users::delete_user)
        .service(followers::follow_user)
        .service(followers::list_followers)
        .service(followers::unfollow_user)
        .service(posts::create_post)
        .service(posts::list_posts);
}
