//! Error types for the data store
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Store Error Enum ==
/// Unified error type for the data store.
///
/// Malformed input is the only hard failure: operations on a missing or
/// expired key report through their `bool`/`Option` return values instead,
/// and `undo`/`redo` on an empty stack simply return `false`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A key or value argument violated its contract
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

// == Result Type Alias ==
/// Convenience Result type for the data store.
pub type Result<T> = std::result::Result<T, StoreError>;
