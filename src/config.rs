//! Configuration Module
//!
//! Limits applied to keys and values before any mutation is accepted.

use crate::store::{MAX_KEY_LENGTH, MAX_VALUE_SIZE};

/// Store configuration parameters.
///
/// Defaults allow 256-byte keys and 1 MB values; both limits can be
/// adjusted with the builder-style setters.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Maximum allowed key length in bytes
    pub max_key_length: usize,
    /// Maximum allowed value size in bytes
    pub max_value_size: usize,
}

impl StoreConfig {
    /// Sets the maximum key length in bytes.
    pub fn with_max_key_length(mut self, max_key_length: usize) -> Self {
        self.max_key_length = max_key_length;
        self
    }

    /// Sets the maximum value size in bytes.
    pub fn with_max_value_size(mut self, max_value_size: usize) -> Self {
        self.max_value_size = max_value_size;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_key_length: MAX_KEY_LENGTH,
            max_value_size: MAX_VALUE_SIZE,
        }
    }
}
