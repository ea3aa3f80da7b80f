//! Shared Diesel and pool error mapping for the repository adapters.
//!
//! Each repository port has its own `Connection`/`Query` error enum; these
//! helpers classify the failure once and let the caller pick the variant.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Storage failure classification shared by every repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FailureKind {
    Connection,
    Query,
}

/// Classify a pool failure. Every pool failure is a connection problem.
pub(crate) fn classify_pool_error(error: &PoolError) -> (FailureKind, String) {
    (FailureKind::Connection, error.message().to_owned())
}

/// Classify a Diesel failure, logging driver details at debug level.
///
/// Messages returned here are generic so constraint names and SQL fragments
/// never leave the adapter.
pub(crate) fn classify_diesel_error(error: &DieselError) -> (FailureKind, String) {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    let (kind, message) = match error {
        DieselError::NotFound => (FailureKind::Query, "record not found"),
        DieselError::QueryBuilderError(_) => (FailureKind::Query, "database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => {
            (FailureKind::Connection, "database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            (FailureKind::Query, "unique constraint violated")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            (FailureKind::Query, "foreign key constraint violated")
        }
        _ => (FailureKind::Query, "database error"),
    };
    (kind, message.to_owned())
}

/// Build a port error from a classification using the port's constructors.
pub(crate) fn to_port_error<E>(
    (kind, message): (FailureKind, String),
    connection: impl FnOnce(String) -> E,
    query: impl FnOnce(String) -> E,
) -> E {
    match kind {
        FailureKind::Connection => connection(message),
        FailureKind::Query => query(message),
    }
}
