//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every mutator in the domain returns `DomainResult<()>`; a failure leaves the
/// state it was called on unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (negative quantity, malformed date, ...).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant would be violated by the operation.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested resource was not found.
    #[error("not found")]
    NotFound,

    /// A positional lookup fell outside the owned sequence.
    #[error("index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// The operation is not meaningful for the target's current mode.
    #[error("unsupported: {0}")]
    Unsupported(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_out_of_range_reports_both_bounds() {
        let err = DomainError::index_out_of_range(4, 2);
        assert_eq!(err.to_string(), "index 4 out of range (len 2)");
    }

    #[test]
    fn helpers_build_matching_variants() {
        assert_eq!(
            DomainError::validation("quantity"),
            DomainError::Validation("quantity".to_string())
        );
        assert!(matches!(DomainError::unsupported("x"), DomainError::Unsupported(_)));
        assert_eq!(DomainError::not_found().to_string(), "not found");
    }
}
