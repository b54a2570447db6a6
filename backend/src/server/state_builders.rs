//! Builders wiring domain services to their outbound adapters.

use std::sync::Arc;

use actix_web::web;

use social_backend::domain::ports::{SocialUnitOfWork, UserRepository};
use social_backend::domain::{SocialAccessService, UserService};
use social_backend::inbound::http::state::{HttpState, HttpStatePorts};
use social_backend::outbound::memory::InMemorySocialStore;
use social_backend::outbound::persistence::{
    DbPool, DieselSocialUnitOfWork, DieselUserRepository,
};

/// Build handler state over PostgreSQL when a pool is available, otherwise
/// over a shared in-memory store.
///
/// The user service and the social service always share one backing store so
/// users created through `/users` are visible to the follow graph.
pub fn build_http_state(db_pool: Option<&DbPool>) -> web::Data<HttpState> {
    let ports = match db_pool {
        Some(pool) => ports_for(
            Arc::new(UserService::new(Arc::new(DieselUserRepository::new(
                pool.clone(),
            )))),
            Arc::new(SocialAccessService::new(Arc::new(
                DieselSocialUnitOfWork::new(pool.clone()),
            ))),
        ),
        None => {
            let store = Arc::new(InMemorySocialStore::new());
            ports_for(
                Arc::new(UserService::new(Arc::clone(&store))),
                Arc::new(SocialAccessService::new(store)),
            )
        }
    };
    web::Data::new(HttpState::new(ports))
}

fn ports_for<R, U>(
    users: Arc<UserService<R>>,
    social: Arc<SocialAccessService<U>>,
) -> HttpStatePorts
where
    R: UserRepository + 'static,
    U: SocialUnitOfWork + 'static,
{
    HttpStatePorts {
        users_command: users.clone(),
        users_query: users,
        social_command: social.clone(),
        social_query: social,
    }
}
