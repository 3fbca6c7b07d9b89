//! Error types for contactbook

use std::collections::TryReserveError;
use std::path::PathBuf;
use thiserror::Error;

/// A field value that failed validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid phone number '{0}': expected 10 digits not starting with 0")]
    InvalidPhone(String),

    #[error("Invalid age '{0}': expected a whole number from 1 to 150")]
    InvalidAge(String),

    #[error("Invalid {field}: {reason}")]
    InvalidText { field: &'static str, reason: &'static str },
}

/// Errors returned by store and file operations
///
/// Whenever one of these is returned the store is left as it was before the call.
#[derive(Debug, Error)]
pub enum BookError {
    #[error("Index {index} out of range (contacts: {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Address book is empty")]
    Empty,

    #[error("Address book is full ({limit} contacts)")]
    CapacityExceeded { limit: usize },

    #[error("Memory allocation failed: {0}")]
    Allocation(#[from] TryReserveError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("File not found: {}", .path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed contact count line: {line:?}")]
    MalformedCount { line: String },

    #[error("Truncated contact file: expected {expected} contacts, read {found}")]
    Truncated { expected: usize, found: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store and file operations
pub type BookResult<T> = std::result::Result<T, BookError>;
