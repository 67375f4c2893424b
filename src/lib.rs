//! Revkv - An in-memory key/value store with reversible history
//!
//! Provides per-key TTL expiry and a linear undo/redo log of mutating
//! operations. Expiry is deliberately outside the reversible history:
//! expired entries decay lazily on access or through an on-demand sweep,
//! and neither path can be undone.
//!
//! Time is read through an injected [`Clock`], so TTL behavior is
//! deterministic under test via [`ManualClock`].

pub mod clock;
pub mod config;
pub mod error;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use store::{DataStore, StoreStats};
