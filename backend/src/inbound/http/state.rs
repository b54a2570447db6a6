//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{SocialGraphCommand, SocialGraphQuery, UsersCommand, UsersQuery};

/// Parameter object bundling the port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub users_command: Arc<dyn UsersCommand>,
    pub users_query: Arc<dyn UsersQuery>,
    pub social_command: Arc<dyn SocialGraphCommand>,
    pub social_query: Arc<dyn SocialGraphQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users_command: Arc<dyn UsersCommand>,
    pub users_query: Arc<dyn UsersQuery>,
    pub social_command: Arc<dyn SocialGraphCommand>,
    pub social_query: Arc<dyn SocialGraphQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use social_backend::domain::{SocialAccessService, UserService};
    /// use social_backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use social_backend::outbound::memory::InMemorySocialStore;
    ///
    /// let store = Arc::new(InMemorySocialStore::new());
    /// let users = Arc::new(UserService::new(Arc::clone(&store)));
    /// let social = Arc::new(SocialAccessService::new(store));
    /// let state = HttpState::new(HttpStatePorts {
    ///     users_command: users.clone(),
    ///     users_query: users,
    ///     social_command: social.clone(),
    ///     social_query: social,
    /// });
    /// let _query = state.users_query.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            users_command,
            users_query,
            social_command,
            social_query,
        } = ports;
        Self {
            users_command,
            users_query,
            social_command,
            social_query,
        }
    }
}
