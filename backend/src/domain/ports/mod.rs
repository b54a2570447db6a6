//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`UsersCommand`, `UsersQuery`, `SocialGraphCommand`,
//! `SocialGraphQuery`) are what inbound adapters call. Driven ports
//! (`UserRepository`, `SocialStore`, `SocialUnitOfWork`) are what outbound
//! adapters implement. Each driven port exposes a strongly typed error.

mod macros;
pub(crate) use macros::define_port_error;

mod social_graph_command;
mod social_graph_query;
mod social_store;
mod user_repository;
mod users_command;
mod users_query;

pub use social_graph_command::SocialGraphCommand;
#[cfg(test)]
pub use social_graph_command::MockSocialGraphCommand;
#[cfg(test)]
pub use social_graph_query::MockSocialGraphQuery;
pub use social_graph_query::SocialGraphQuery;
pub use social_store::{SocialStore, SocialStoreError, SocialUnitOfWork, matches_pair};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::UsersCommand;
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
