//! Error taxonomy
//!
//! Failures travel as [`anyhow::Error`] chains with a `CoreError` planted at
//! the point of diagnosis. Callers that need to branch on the category pull
//! it back out with [`CoreError::find_in`].

use thiserror::Error;

/// Machine-matchable failure categories.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The requested object or file does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Stored bytes that cannot be interpreted: bad magic, bad header,
    /// truncated entries, undecompressable content.
    #[error("corrupt data: {0}")]
    Corrupt(String),

    /// A ref name outside the accepted namespace, or an address that does
    /// not resolve to the required object kind.
    #[error("invalid reference: {0}")]
    InvalidReference(String),

    /// A file mode other than 100644 or 100755.
    #[error("invalid mode: {0}")]
    InvalidMode(String),

    /// The target already exists and cannot be created again.
    #[error("already exists: {0}")]
    AlreadyExists(String),
}

impl CoreError {
    /// Walk an error chain looking for the `CoreError` that started it.
    pub fn find_in(error: &anyhow::Error) -> Option<&CoreError> {
        error.chain().find_map(|cause| cause.downcast_ref())
    }
}
