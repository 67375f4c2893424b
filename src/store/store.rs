//! Data Store Module
//!
//! Main store engine combining the key/value mapping, TTL expiry, and the
//! undo/redo operation log behind one lock.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::clock::{Clock, SystemClock};
use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::store::{Entry, Expiry, Operation, OperationLog, StoreStats};

// == Store Inner ==
/// Composite state guarded as a single unit.
///
/// Undo/redo correctness requires the mapping and the log to change together
/// atomically relative to other callers, so they live under one mutex rather
/// than behind independently synchronized structures.
struct StoreInner {
    entries: HashMap<String, Entry>,
    log: OperationLog,
    stats: StoreStats,
}

// == Data Store ==
/// In-memory key/value store with per-key TTL expiry and a linear undo/redo
/// history of mutating operations.
///
/// Every mutating call (`set`, `update`, `delete`) records the old/new entry
/// pair on the undo stack and clears the redo stack. Expiry is never part of
/// that history: stale entries decay out lazily when a read or mutation finds
/// them, or in bulk through [`DataStore::cleanup_expired_keys`], and neither
/// path can be undone.
///
/// All operations serialize through one internal lock, so the store can be
/// shared across threads directly (or behind an `Arc`). Time comes from an
/// injected [`Clock`], which keeps TTL behavior deterministic under test.
pub struct DataStore {
    inner: Mutex<StoreInner>,
    clock: Arc<dyn Clock>,
    config: StoreConfig,
}

impl DataStore {
    // == Constructors ==
    /// Creates a store with default limits, reading the system clock.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Creates a store with custom limits, reading the system clock.
    pub fn with_config(config: StoreConfig) -> Self {
        Self::with_config_and_clock(config, Arc::new(SystemClock))
    }

    /// Creates a store with default limits and an injected clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self::with_config_and_clock(StoreConfig::default(), clock)
    }

    /// Creates a store with custom limits and an injected clock.
    pub fn with_config_and_clock(config: StoreConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                entries: HashMap::new(),
                log: OperationLog::new(),
                stats: StoreStats::new(),
            }),
            clock,
            config,
        }
    }

    // == Set ==
    /// Stores a key/value pair that never expires.
    ///
    /// Overwrites any existing entry, live or stale, and records the
    /// operation on the undo stack.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let now = self.clock.now();
        self.set_internal(now, key, value, Expiry::Never)
    }

    // == Set With TTL ==
    /// Stores a key/value pair that expires `ttl` after now.
    ///
    /// A zero `ttl` means the entry never expires.
    pub fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let now = self.clock.now();
        self.set_internal(now, key, value, expiry_for(now, ttl))
    }

    fn set_internal(&self, now: Instant, key: &str, value: &str, expires_at: Expiry) -> Result<()> {
        self.validate_key(key)?;
        self.validate_value(value)?;

        let mut inner = self.inner.lock();

        // A physically present but already-expired entry does not count as
        // prior state; undoing this set must not resurrect it.
        let before = inner
            .entries
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .cloned();

        let after = Entry::new(value.to_string(), expires_at);
        inner.entries.insert(key.to_string(), after.clone());
        inner.log.record(Operation::Set {
            key: key.to_string(),
            before,
            after,
        });

        let total = inner.entries.len();
        inner.stats.set_total_entries(total);
        debug!(key, "set entry");
        Ok(())
    }

    // == Get ==
    /// Retrieves the value for a key.
    ///
    /// Returns `None` if the key is absent or expired. A stale entry found
    /// here is removed from the mapping as a side effect, without touching
    /// the operation log: expiry is passive decay, not a user action.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        self.validate_key(key)?;
        let now = self.clock.now();

        let mut inner = self.inner.lock();
        if let Some(entry) = inner.entries.get(key) {
            if entry.is_expired(now) {
                inner.entries.remove(key);
                inner.stats.record_expired(1);
                inner.stats.record_miss();
                let total = inner.entries.len();
                inner.stats.set_total_entries(total);
                trace!(key, "removed expired entry on read");
                return Ok(None);
            }

            let value = entry.value.clone();
            inner.stats.record_hit();
            Ok(Some(value))
        } else {
            inner.stats.record_miss();
            Ok(None)
        }
    }

    // == Update ==
    /// Replaces the value of a live key, keeping its current expiry.
    ///
    /// Returns `false` without logging if the key is absent or expired;
    /// a stale entry is opportunistically removed.
    pub fn update(&self, key: &str, value: &str) -> Result<bool> {
        self.update_internal(key, value, None)
    }

    // == Update With TTL ==
    /// Replaces the value of a live key and recomputes its expiry as `ttl`
    /// from now. A zero `ttl` makes the entry never expire.
    pub fn update_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<bool> {
        self.update_internal(key, value, Some(ttl))
    }

    fn update_internal(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<bool> {
        self.validate_key(key)?;
        self.validate_value(value)?;
        let now = self.clock.now();

        let mut inner = self.inner.lock();
        let before = match inner.entries.get(key) {
            None => return Ok(false),
            Some(entry) if entry.is_expired(now) => {
                inner.entries.remove(key);
                inner.stats.record_expired(1);
                let total = inner.entries.len();
                inner.stats.set_total_entries(total);
                trace!(key, "removed expired entry on update");
                return Ok(false);
            }
            Some(entry) => entry.clone(),
        };

        let expires_at = match ttl {
            None => before.expires_at,
            Some(ttl) => expiry_for(now, ttl),
        };

        let after = Entry::new(value.to_string(), expires_at);
        inner.entries.insert(key.to_string(), after.clone());
        inner.log.record(Operation::Update {
            key: key.to_string(),
            before,
            after,
        });
        debug!(key, "updated entry");
        Ok(true)
    }

    // == Delete ==
    /// Removes a key.
    ///
    /// Logical expiry counts as absence: deleting a live entry logs the
    /// operation and returns `true`, while a physically present but expired
    /// entry is still removed (lazy expiry) but returns `false` with no log
    /// record, exactly like an absent key.
    pub fn delete(&self, key: &str) -> Result<bool> {
        self.validate_key(key)?;
        let now = self.clock.now();

        let mut inner = self.inner.lock();
        let Some(entry) = inner.entries.get(key) else {
            return Ok(false);
        };

        if entry.is_expired(now) {
            inner.entries.remove(key);
            inner.stats.record_expired(1);
            let total = inner.entries.len();
            inner.stats.set_total_entries(total);
            trace!(key, "removed expired entry on delete");
            return Ok(false);
        }

        let before = entry.clone();
        inner.entries.remove(key);
        inner.log.record(Operation::Delete {
            key: key.to_string(),
            before,
        });
        let total = inner.entries.len();
        inner.stats.set_total_entries(total);
        debug!(key, "deleted entry");
        Ok(true)
    }

    // == Scan ==
    /// Returns all logically live keys, in no particular order.
    pub fn scan(&self) -> Vec<String> {
        let now = self.clock.now();
        let inner = self.inner.lock();
        inner
            .entries
            .iter()
            .filter(|(_, entry)| !entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect()
    }

    // == Scan By Prefix ==
    /// Returns all logically live keys starting with the given literal
    /// prefix. The empty prefix matches every live key.
    pub fn scan_by_prefix(&self, prefix: &str) -> Vec<String> {
        let now = self.clock.now();
        let inner = self.inner.lock();
        inner
            .entries
            .iter()
            .filter(|(key, entry)| key.starts_with(prefix) && !entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect()
    }

    // == Cleanup Expired ==
    /// Eagerly removes every physically present, expired entry.
    ///
    /// Returns the number of entries removed. Never logs operations, so
    /// expired data can never come back through undo/redo. An external
    /// scheduler may call this periodically; the store spawns no timers of
    /// its own.
    pub fn cleanup_expired_keys(&self) -> usize {
        let now = self.clock.now();
        let mut inner = self.inner.lock();

        let expired_keys: Vec<String> = inner
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();
        for key in expired_keys {
            inner.entries.remove(&key);
        }

        inner.stats.record_expired(count as u64);
        let total = inner.entries.len();
        inner.stats.set_total_entries(total);

        if count > 0 {
            debug!(removed = count, "expired entry sweep");
        } else {
            trace!("expired entry sweep found nothing");
        }
        count
    }

    // == Undo ==
    /// Reverts the most recent logged mutation.
    ///
    /// Returns `false` if there is nothing to undo. The reverted operation
    /// moves to the redo stack.
    pub fn undo(&self) -> bool {
        let mut inner = self.inner.lock();
        let Some(op) = inner.log.pop_undo() else {
            return false;
        };

        match &op {
            Operation::Set { key, before, .. } => match before {
                Some(prev) => {
                    inner.entries.insert(key.clone(), prev.clone());
                }
                None => {
                    inner.entries.remove(key);
                }
            },
            Operation::Update { key, before, .. } | Operation::Delete { key, before } => {
                inner.entries.insert(key.clone(), before.clone());
            }
        }

        debug!(key = op.key(), "undid operation");
        inner.log.push_redo(op);
        let total = inner.entries.len();
        inner.stats.set_total_entries(total);
        true
    }

    // == Redo ==
    /// Replays the most recently undone mutation.
    ///
    /// Returns `false` if there is nothing to redo, which includes any point
    /// after a fresh mutation has invalidated the redo history. The replayed
    /// operation moves back to the undo stack.
    pub fn redo(&self) -> bool {
        let mut inner = self.inner.lock();
        let Some(op) = inner.log.pop_redo() else {
            return false;
        };

        match &op {
            Operation::Set { key, after, .. } | Operation::Update { key, after, .. } => {
                inner.entries.insert(key.clone(), after.clone());
            }
            Operation::Delete { key, .. } => {
                inner.entries.remove(key);
            }
        }

        debug!(key = op.key(), "redid operation");
        inner.log.push_undo(op);
        let total = inner.entries.len();
        inner.stats.set_total_entries(total);
        true
    }

    // == Depths ==
    /// Number of operations available to undo.
    pub fn undo_depth(&self) -> usize {
        self.inner.lock().log.undo_depth()
    }

    /// Number of operations available to redo.
    pub fn redo_depth(&self) -> usize {
        self.inner.lock().log.redo_depth()
    }

    // == Stats ==
    /// Returns current store statistics.
    pub fn stats(&self) -> StoreStats {
        let inner = self.inner.lock();
        let mut stats = inner.stats.clone();
        stats.set_total_entries(inner.entries.len());
        stats
    }

    // == Length ==
    /// Returns the number of physically present entries, expired or not.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    // == Is Empty ==
    /// Returns true if no entries are physically present.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    // == Validation ==
    fn validate_key(&self, key: &str) -> Result<()> {
        if key.is_empty() {
            return Err(StoreError::InvalidArgument("key cannot be empty".to_string()));
        }
        if key.len() > self.config.max_key_length {
            return Err(StoreError::InvalidArgument(format!(
                "key exceeds maximum length of {} bytes",
                self.config.max_key_length
            )));
        }
        Ok(())
    }

    fn validate_value(&self, value: &str) -> Result<()> {
        if value.len() > self.config.max_value_size {
            return Err(StoreError::InvalidArgument(format!(
                "value exceeds maximum size of {} bytes",
                self.config.max_value_size
            )));
        }
        Ok(())
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts a relative ttl into an absolute expiry. Zero means never.
fn expiry_for(now: Instant, ttl: Duration) -> Expiry {
    if ttl.is_zero() {
        Expiry::Never
    } else {
        Expiry::At(now + ttl)
    }
}
