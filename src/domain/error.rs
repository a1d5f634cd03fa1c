//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the tree rules.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid tree length {length}: must be at least 2")]
    InvalidLength { length: usize },

    #[error("invalid tree: {reason}")]
    InvalidTree { reason: String },

    #[error("invalid tree symbol: {0:?} (expected N, L or R)")]
    InvalidSymbol(char),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
