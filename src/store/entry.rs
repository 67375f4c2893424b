//! Store Entry Module
//!
//! Defines the immutable value object held per key, with its expiry instant.

use std::time::Instant;

// == Expiry ==
/// Absolute expiry of an entry.
///
/// An explicit variant instead of a sentinel timestamp, so "never expires"
/// can never be confused with a real instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    /// The entry never expires
    Never,
    /// The entry expires strictly after the given instant
    At(Instant),
}

impl Expiry {
    /// Checks whether this expiry has passed at `now`.
    ///
    /// The comparison is strict: an entry whose expiry equals `now` is still
    /// live, and only becomes expired once `now` moves past it.
    pub fn is_expired(&self, now: Instant) -> bool {
        match self {
            Expiry::Never => false,
            Expiry::At(at) => now > *at,
        }
    }
}

// == Entry ==
/// A single stored value with its expiry.
///
/// Immutable once constructed; every mutation of a key produces a new entry
/// rather than editing one in place, so entries captured in the operation
/// log stay exact snapshots of prior state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The stored value
    pub value: String,
    /// When the entry stops being logically present
    pub expires_at: Expiry,
}

impl Entry {
    /// Creates a new entry.
    pub fn new(value: String, expires_at: Expiry) -> Self {
        Self { value, expires_at }
    }

    /// Checks if the entry has expired at `now`.
    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_expired(now)
    }
}
