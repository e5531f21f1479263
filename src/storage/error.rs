//! Storage Errors
//!
//! Error types for storage-backed operations.

use std::time::Duration;

use crate::domain::DomainError;

/// Result type for storage-backed operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in a storage-backed operation
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Business rule or lookup failure
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Unclassified database fault
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The storage call did not finish before its deadline
    #[error("Storage operation '{operation}' timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },
}

impl StorageError {
    /// Check if this is a storage fault rather than a domain outcome
    pub fn is_storage_failure(&self) -> bool {
        matches!(self, StorageError::Database(_) | StorageError::Timeout { .. })
    }
}

/// Check whether a database error is a uniqueness violation (SQLSTATE 23505)
pub fn unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_are_not_storage_failures() {
        let err: StorageError = DomainError::DuplicateSlug("dune".into()).into();
        assert!(!err.is_storage_failure());
        assert!(matches!(err, StorageError::Domain(DomainError::DuplicateSlug(_))));
    }

    #[test]
    fn test_timeout_is_storage_failure() {
        let err = StorageError::Timeout {
            operation: "movies.list",
            after: Duration::from_secs(5),
        };
        assert!(err.is_storage_failure());
        assert!(err.to_string().contains("movies.list"));
    }

    #[test]
    fn test_row_not_found_is_not_unique_violation() {
        assert!(!unique_violation(&sqlx::Error::RowNotFound));
    }
}
