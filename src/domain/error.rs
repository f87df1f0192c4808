//! Domain errors

use thiserror::Error;

/// Repository-level failures surfaced to the domain.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Already exists: {0}")]
    Conflict(String),
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
