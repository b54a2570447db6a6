//! Shared Diesel error mapping for the persistence adapters.
//!
//! Each port has its own error enum, so the helpers take the constructors
//! to use for connection and query failures.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::{SocialStoreError, UserPersistenceError};

use super::pool::PoolError;

/// Extract a readable message from a pool error.
pub(crate) fn pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

fn log_diesel_error(error: &DieselError, operation: &str) {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), %operation, "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(error),
            %operation,
            "diesel operation failed"
        ),
    }
}

/// Map common Diesel error variants into query/connection constructors.
pub(crate) fn map_basic_diesel_error<E, Q, C>(
    error: DieselError,
    operation: &str,
    query: Q,
    connection: C,
) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    log_diesel_error(&error, operation);

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => connection("database connection error"),
        _ => query("database error"),
    }
}

/// Map pool errors to user repository errors.
pub(crate) fn map_user_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(pool_error_message(error))
}

/// Map Diesel errors to user repository errors.
pub(crate) fn map_user_diesel_error(error: DieselError, operation: &str) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        operation,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

/// Map pool errors to social store errors.
pub(crate) fn map_social_pool_error(error: PoolError) -> SocialStoreError {
    SocialStoreError::connection(pool_error_message(error))
}

/// Map Diesel errors to social store errors.
///
/// Foreign key violations mean a referenced user was removed concurrently and
/// surface as [`SocialStoreError::MissingReference`].
pub(crate) fn map_social_diesel_error(error: DieselError, operation: &str) -> SocialStoreError {
    if let DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) = &error {
        debug!(
            message = info.message(),
            constraint = ?info.constraint_name(),
            %operation,
            "foreign key violation"
        );
        return SocialStoreError::missing_reference("referenced user not found");
    }
    map_basic_diesel_error(
        error,
        operation,
        SocialStoreError::query,
        SocialStoreError::connection,
    )
}
