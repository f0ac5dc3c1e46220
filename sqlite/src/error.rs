//! Error types for contact store operations.
//!
//! Splits SQLite failures into the cases callers handle differently:
//! uniqueness violations and bad field names are recoverable and reported,
//! connectivity failures abort the operation in flight.

use rusqlite::ErrorCode;
use thiserror::Error;

/// Errors that can occur during contact store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Insert or update would give two contacts the same phone number.
    #[error("duplicate entry: phone number '{phone_number}' already exists")]
    DuplicateEntry { phone_number: String },

    /// Field name is not `first_name` or `phone_number`.
    #[error("invalid field '{0}': must be first_name or phone_number")]
    InvalidField(String),

    /// The database could not be opened or stopped responding.
    #[error("connectivity failure: {0}")]
    Connectivity(#[source] rusqlite::Error),

    /// Any other SQLite failure.
    #[error("database error: {0}")]
    Database(#[source] rusqlite::Error),

    /// Reading an import source failed.
    #[error(transparent)]
    Core(#[from] phonebook_core::CoreError),
}

impl StoreError {
    /// Returns `true` for failures that leave the store usable and only need
    /// reporting.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            StoreError::DuplicateEntry { .. } | StoreError::InvalidField(_)
        )
    }

    /// Maps a failed write, turning a uniqueness violation into
    /// [`DuplicateEntry`](Self::DuplicateEntry) for `phone_number`.
    pub(crate) fn from_write(err: rusqlite::Error, phone_number: &str) -> Self {
        if is_unique_violation(&err) {
            StoreError::DuplicateEntry {
                phone_number: phone_number.to_string(),
            }
        } else {
            err.into()
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        if is_connectivity_failure(&err) {
            StoreError::Connectivity(err)
        } else {
            StoreError::Database(err)
        }
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == ErrorCode::ConstraintViolation
                && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

fn is_connectivity_failure(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, _) => matches!(
            e.code,
            ErrorCode::CannotOpen
                | ErrorCode::NotADatabase
                | ErrorCode::DatabaseBusy
                | ErrorCode::DatabaseLocked
                | ErrorCode::SystemIoFailure
                | ErrorCode::PermissionDenied
                | ErrorCode::ReadOnly
                | ErrorCode::DiskFull
                | ErrorCode::FileLockingProtocolFailed
        ),
        rusqlite::Error::InvalidPath(_) => true,
        _ => false,
    }
}

/// Convenience alias for results with [`StoreError`].
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn sqlite_failure(code: std::os::raw::c_int) -> rusqlite::Error {
        rusqlite::Error::SqliteFailure(rusqlite::ffi::Error::new(code), None)
    }

    #[test]
    fn test_unique_violation_becomes_duplicate_entry() {
        let err = StoreError::from_write(
            sqlite_failure(rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE),
            "222",
        );
        assert!(matches!(err, StoreError::DuplicateEntry { ref phone_number } if phone_number == "222"));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_not_null_violation_is_not_duplicate() {
        let err = StoreError::from_write(
            sqlite_failure(rusqlite::ffi::SQLITE_CONSTRAINT_NOTNULL),
            "222",
        );
        assert!(matches!(err, StoreError::Database(_)));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_open_failures_are_connectivity() {
        for code in [
            rusqlite::ffi::SQLITE_CANTOPEN,
            rusqlite::ffi::SQLITE_NOTADB,
            rusqlite::ffi::SQLITE_BUSY,
            rusqlite::ffi::SQLITE_IOERR,
        ] {
            let err: StoreError = sqlite_failure(code).into();
            assert!(matches!(err, StoreError::Connectivity(_)), "code {code}");
        }
    }

    #[test]
    fn test_other_failures_are_database_errors() {
        let err: StoreError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, StoreError::Database(_)));
    }
}
