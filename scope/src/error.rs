//! Scope error types.

use thiserror::Error;

/// Scope errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    /// The scope (or one of its ancestors) was cancelled.
    #[error("scope cancelled")]
    Cancelled,

    /// No participant was bound under the key.
    #[error("{key} transaction not found")]
    NotFound { key: String },

    /// A participant is bound under the key but has another concrete type.
    #[error("{key} transaction is not of type {expected}")]
    TypeMismatch { key: String, expected: &'static str },
}

impl ScopeError {
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    pub fn type_mismatch(key: impl Into<String>, expected: &'static str) -> Self {
        Self::TypeMismatch {
            key: key.into(),
            expected,
        }
    }

    /// Returns true for the cancellation kind.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Result type for scope operations.
pub type ScopeResult<T> = Result<T, ScopeError>;
