//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent business logic violations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid org unit: {value:?} ({reason})")]
    InvalidOrgUnit { value: String, reason: String },

    #[error("path separator must not be empty")]
    EmptySeparator,
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
