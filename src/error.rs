//! Error types for the docindex library.
//!
//! All errors are represented by the [`DocIndexError`] enum. Structural
//! violations of the search index contract are reported as
//! [`DocIndexError::MalformedIndex`]; loading is all-or-nothing, so a
//! malformed input never yields a partial collection.
//!
//! # Examples
//!
//! ```
//! use docindex::error::{DocIndexError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(DocIndexError::malformed("record 3", "missing field `category`"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for docindex operations.
#[derive(Error, Debug)]
pub enum DocIndexError {
    /// The input does not follow the search index data contract.
    #[error("Malformed index at {position}: {reason}")]
    MalformedIndex { position: String, reason: String },

    /// I/O errors (reading or writing index files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid argument passed to an operation
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type alias for operations that may fail with DocIndexError.
pub type Result<T> = std::result::Result<T, DocIndexError>;

impl DocIndexError {
    /// Create a new malformed index error.
    pub fn malformed<P: Into<String>, R: Into<String>>(position: P, reason: R) -> Self {
        DocIndexError::MalformedIndex {
            position: position.into(),
            reason: reason.into(),
        }
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        DocIndexError::InvalidConfig(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        DocIndexError::InvalidArgument(msg.into())
    }

    /// Returns true if this error is a structural contract violation.
    pub fn is_malformed(&self) -> bool {
        matches!(self, DocIndexError::MalformedIndex { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = DocIndexError::malformed("record 0", "missing field `page`");
        assert_eq!(
            error.to_string(),
            "Malformed index at record 0: missing field `page`"
        );
        assert!(error.is_malformed());

        let error = DocIndexError::invalid_config("bad variable name");
        assert_eq!(error.to_string(), "Invalid configuration: bad variable name");
        assert!(!error.is_malformed());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = DocIndexError::from(io_error);

        match error {
            DocIndexError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
