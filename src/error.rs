//! Error types for path traversal and accessor construction.

use thiserror::Error;

/// Result type alias for dotquill operations.
pub type Result<T> = std::result::Result<T, DottyError>;

/// Errors that can occur while walking or mutating a nested structure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DottyError {
    /// A map-like container lacks the requested key.
    #[error("Key '{key}' not found")]
    KeyNotFound { key: String },

    /// A sequence-like container was indexed past its end.
    #[error("Index {index} out of range for sequence of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Tokens remain but the current node is a leaf value.
    #[error("Cannot descend into leaf value with token '{token}'")]
    NotTraversable { token: String },

    /// A token does not fit the container it was applied to.
    #[error("Token '{token}' cannot be used here, expected {expected}")]
    TypeMismatch { token: String, expected: String },

    /// The accessor was built from a root that is not map-like.
    #[error("Root must be a map-like container, found {found}")]
    Construction { found: String },

    /// A write or delete was attempted with no tokens at all.
    #[error("Path has no segments")]
    EmptyPath,

    /// Accessor configuration is unusable.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl DottyError {
    /// Returns true for the kinds that default-bearing lookups swallow.
    pub fn is_missing(&self) -> bool {
        matches!(
            self,
            DottyError::KeyNotFound { .. } | DottyError::IndexOutOfRange { .. }
        )
    }

    pub(crate) fn key_not_found(key: &str) -> Self {
        DottyError::KeyNotFound {
            key: key.to_string(),
        }
    }

    pub(crate) fn type_mismatch(token: &str, expected: &str) -> Self {
        DottyError::TypeMismatch {
            token: token.to_string(),
            expected: expected.to_string(),
        }
    }
}
