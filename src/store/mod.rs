//! Store Module
//!
//! In-memory key/value storage with TTL expiry and undo/redo history.

mod entry;
mod history;
mod stats;
mod store;


// Re-export public types
pub use entry::{Entry, Expiry};
pub use history::{Operation, OperationLog};
pub use stats::StoreStats;
pub use store::DataStore;

// == Public Constants ==
/// Default maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Default maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB
