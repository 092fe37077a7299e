//! Classification of Diesel failures shared by every repository.
//!
//! Each repository owns its error enum, so this module reduces a Diesel error
//! to a [`DbFailure`] that the repository then maps onto its own variants.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

/// PostgreSQL SQLSTATE for `undefined_table`.
const UNDEFINED_TABLE: &str = "42P01";

/// Backend-neutral view of a failed statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DbFailure {
    Connection(String),
    UniqueViolation(String),
    MissingRelation(String),
    Query(String),
}

/// Reduce a Diesel error to a [`DbFailure`], logging the raw detail at debug.
pub(crate) fn classify(error: DieselError) -> DbFailure {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
            let message = info.message().to_owned();
            match kind {
                DatabaseErrorKind::ClosedConnection => DbFailure::Connection(message),
                DatabaseErrorKind::UniqueViolation => DbFailure::UniqueViolation(
                    info.constraint_name().unwrap_or("unique constraint").to_owned(),
                ),
                _ if is_missing_relation(&message) => {
                    DbFailure::MissingRelation(relation_name(&message))
                }
                _ => DbFailure::Query("database error".to_owned()),
            }
        }
        DieselError::NotFound => DbFailure::Query("record not found".to_owned()),
        DieselError::QueryBuilderError(_) => DbFailure::Query("database query error".to_owned()),
        other => {
            debug!(error = %other, "diesel operation failed");
            DbFailure::Query("database error".to_owned())
        }
    }
}

/// Whether a server message reports an undefined table.
///
/// Diesel does not expose the SQLSTATE through its error kind, so the code is
/// also matched when the server includes it in the message.
fn is_missing_relation(message: &str) -> bool {
    message.contains(UNDEFINED_TABLE)
        || (message.starts_with("relation ") && message.ends_with("does not exist"))
}

fn relation_name(message: &str) -> String {
    message
        .split('"')
        .nth(1)
        .unwrap_or("unknown")
        .to_owned()
}
