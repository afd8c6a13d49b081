//! Diesel and pool error mapping for the letter store.

use std::time::Duration;

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::LetterStoreError;

use super::pool::PoolError;

/// Message PostgreSQL attaches to SQLSTATE 57014 raised by `statement_timeout`.
///
/// Diesel does not expose the SQLSTATE, and the text is translated when the
/// server runs with a non-English `lc_messages`. [`reclassify_elapsed_timeout`]
/// covers that case from the measured duration.
const STATEMENT_TIMEOUT_MESSAGE: &str = "canceling statement due to statement timeout";

/// Pool failures always mean the store is unreachable.
pub fn map_pool_error(error: PoolError) -> LetterStoreError {
    LetterStoreError::connection(error.into_message())
}

/// Classify a Diesel error into a store error.
pub fn map_diesel_error(error: DieselError) -> LetterStoreError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            LetterStoreError::connection("database connection closed")
        }
        DieselError::DatabaseError(
            DatabaseErrorKind::CheckViolation | DatabaseErrorKind::NotNullViolation,
            info,
        ) => LetterStoreError::constraint(info.message().to_owned()),
        DieselError::DatabaseError(_, info) if info.message().contains(STATEMENT_TIMEOUT_MESSAGE) => {
            LetterStoreError::timeout("statement exceeded the configured timeout")
        }
        DieselError::DeserializationError(err) => {
            LetterStoreError::query(format!("undecodable row: {err}"))
        }
        DieselError::DatabaseError(_, info) => LetterStoreError::query(info.message().to_owned()),
        other => LetterStoreError::query(other.to_string()),
    }
}

/// Treat a query failure as a timeout once the transaction has run for at
/// least `limit`, whatever language the server reported it in.
pub fn reclassify_elapsed_timeout(
    error: LetterStoreError,
    elapsed: Duration,
    limit: Duration,
) -> LetterStoreError {
    match error {
        LetterStoreError::Query { message } if elapsed >= limit => {
            debug!(%message, ?elapsed, "query failed at the statement timeout");
            LetterStoreError::timeout("statement exceeded the configured timeout")
        }
        other => other,
    }
}
