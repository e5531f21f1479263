//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use thiserror::Error;

use super::email::EmailError;
use super::slug::SlugError;

/// Booking and catalog errors
///
/// These errors represent business rule violations and lookups that missed.
/// They are independent of the web/infrastructure layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Lookup by identifier or slug found nothing
    #[error("{resource} not found: {key}")]
    NotFound { resource: &'static str, key: String },

    /// Another movie already owns this slug
    #[error("A movie with slug '{0}' already exists")]
    DuplicateSlug(String),

    /// Another client already registered this email
    #[error("A client with email '{0}' already exists")]
    DuplicateEmail(String),

    /// Malformed email, missing required field, or empty derived slug
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl DomainError {
    pub fn not_found(resource: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            resource,
            key: key.to_string(),
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl From<EmailError> for DomainError {
    fn from(err: EmailError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

impl From<SlugError> for DomainError {
    fn from(err: SlugError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let err = DomainError::not_found("Movie", "dune");
        assert_eq!(err.to_string(), "Movie not found: dune");
    }

    #[test]
    fn test_duplicate_error_messages() {
        assert_eq!(
            DomainError::DuplicateSlug("dune".into()).to_string(),
            "A movie with slug 'dune' already exists"
        );
        assert!(DomainError::DuplicateEmail("a@b.com".into())
            .to_string()
            .contains("a@b.com"));
    }

    #[test]
    fn test_validation_errors_map_to_invalid_input() {
        let err: DomainError = EmailError::InvalidAtSymbol.into();
        assert!(matches!(err, DomainError::InvalidInput(_)));

        let err: DomainError = SlugError::Empty.into();
        assert!(err.to_string().contains("letter or digit"));
    }
}
