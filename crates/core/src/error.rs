//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Only deterministic input failures live here. Running out of stock is a
/// business outcome and is reported through the return value instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The caller passed an argument the ledger cannot act on
    /// (non-positive quantity, empty identifier, overflowing restock).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl DomainError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Whether the failure was caused by the caller's input.
    ///
    /// Request-handling layers use this to pick a client-error response.
    pub fn is_client_error(&self) -> bool {
        matches!(self, DomainError::InvalidArgument(_))
    }
}
