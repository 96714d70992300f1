//! Shared helpers for Diesel repository implementations.
//!
//! Captures the error mapping and row-decoding steps every adapter repeats:
//! pool failures become connection errors, Diesel failures become query or
//! connection errors, and stored status text is decoded back into the
//! domain vocabulary.

use tracing::{debug, warn};

use crate::domain::RecordStatus;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub(crate) fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map common Diesel error variants into query/connection constructors.
///
/// Constraint violations carrying dedicated port variants (duplicate invoice
/// numbers, unknown award references) must be intercepted by the caller
/// before falling through to this helper.
pub(crate) fn map_basic_diesel_error<E, Q, C>(
    error: diesel::result::Error,
    query: Q,
    connection: C,
) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

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
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::DatabaseError(_, _) => query("database error"),
        _ => query("database error"),
    }
}

/// Decode a stored status value, defaulting on unrecognised text.
///
/// The status columns carry CHECK constraints, so this only fires when the
/// database and application vocabularies drift. The row stays readable
/// rather than failing the whole listing.
pub(crate) fn decode_status(value: &str, table: &'static str, id: i32) -> RecordStatus {
    value.parse().unwrap_or_else(|_| {
        warn!(value, table, id, "unrecognised status value, defaulting");
        RecordStatus::default()
    })
}

#[cfg(test)]
mod tests {
    use diesel::result::Error as DieselError;
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::AwardPersistenceError;

    #[rstest]
    fn pool_errors_become_connection_errors() {
        let mapped: AwardPersistenceError = map_basic_pool_error(
            PoolError::checkout("refused"),
            AwardPersistenceError::connection,
        );
        assert_eq!(mapped, AwardPersistenceError::connection("refused"));
    }

    #[rstest]
    fn not_found_becomes_a_query_error() {
        let mapped: AwardPersistenceError = map_basic_diesel_error(
            DieselError::NotFound,
            AwardPersistenceError::query,
            AwardPersistenceError::connection,
        );
        assert_eq!(mapped, AwardPersistenceError::query("record not found"));
    }

    #[rstest]
    #[case("planned", RecordStatus::Planned)]
    #[case("received", RecordStatus::Received)]
    fn known_status_text_decodes(#[case] value: &str, #[case] expected: RecordStatus) {
        assert_eq!(decode_status(value, "awards", 1), expected);
    }

    #[rstest]
    fn unknown_status_text_defaults_to_planned() {
        assert_eq!(decode_status("shipped", "awards", 1), RecordStatus::Planned);
    }
}
