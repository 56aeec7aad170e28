//! TTL Store Module
//!
//! Main key-value engine: a HashMap of entries behind a single RwLock, with
//! per-entry expiration and NX/XX conditional writes.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use crate::error::{KvError, Result};
use crate::store::{validate_key, StoreEntry, StoreStats, StoreStatsSnapshot, MAX_VALUE_SIZE};

// == Set Condition ==
/// Precondition attached to a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SetCondition {
    /// Unconditional overwrite
    #[default]
    None,
    /// Write only when no live entry exists (NX)
    IfNotExists,
    /// Write only when a live entry exists (XX)
    IfExists,
}

impl SetCondition {
    /// Whether the write may proceed given the liveness of the current entry.
    pub fn permits(self, live_entry_exists: bool) -> bool {
        match self {
            SetCondition::None => true,
            SetCondition::IfNotExists => !live_entry_exists,
            SetCondition::IfExists => live_entry_exists,
        }
    }
}

// == Set Outcome ==
/// Result of a write that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    Written,
    /// The condition was not met; nothing changed
    Skipped,
}

// == TTL Store ==
/// Thread-safe key-value store with optional per-key expiration.
///
/// Reads share the lock. Writes, and reads that find an expired entry to
/// reclaim, take it exclusively.
#[derive(Debug, Default)]
pub struct TtlStore {
    /// Key-value storage
    entries: RwLock<HashMap<String, StoreEntry>>,
    /// Read/write counters
    stats: StoreStats,
}

impl TtlStore {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Set ==
    /// Stores a value under `key`, subject to `condition`.
    ///
    /// The liveness check, the condition and the insert all run under one
    /// write-lock acquisition.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl` - Optional time-to-live; None means the entry never expires
    /// * `condition` - NX/XX precondition, or `SetCondition::None`
    pub async fn set(
        &self,
        key: String,
        value: String,
        ttl: Option<Duration>,
        condition: SetCondition,
    ) -> Result<SetOutcome> {
        validate_key(&key)?;
        if value.len() > MAX_VALUE_SIZE {
            return Err(KvError::InvalidArgument(format!(
                "Value exceeds maximum size of {} bytes",
                MAX_VALUE_SIZE
            )));
        }

        let mut entries = self.entries.write().await;
        let now = Instant::now();
        let live = entries.get(&key).is_some_and(|entry| entry.is_live_at(now));

        if !condition.permits(live) {
            debug!(key = %key, ?condition, live, "conditional set skipped");
            self.stats.record_skipped_write();
            return Ok(SetOutcome::Skipped);
        }

        entries.insert(key, StoreEntry::new(value, ttl, now));
        Ok(SetOutcome::Written)
    }

    // == Get ==
    /// Retrieves the live value for `key`.
    ///
    /// An expired entry is removed on sight and reported as `Expired`.
    pub async fn get(&self, key: &str) -> Result<String> {
        self.get_entry(key).await.map(|entry| entry.value)
    }

    /// Like `get`, but returns the whole entry so callers can report its TTL.
    pub async fn get_entry(&self, key: &str) -> Result<StoreEntry> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => {
                    self.stats.record_miss();
                    return Err(KvError::NotFound(key.to_string()));
                }
                Some(entry) if entry.is_live_at(Instant::now()) => {
                    self.stats.record_hit();
                    return Ok(entry.clone());
                }
                Some(_) => {}
            }
        }

        // Expired under the read lock; re-check exclusively since a set or the
        // sweeper may have run in between.
        let mut entries = self.entries.write().await;
        match entries.get(key) {
            Some(entry) if entry.is_live_at(Instant::now()) => {
                self.stats.record_hit();
                Ok(entry.clone())
            }
            Some(_) => {
                entries.remove(key);
                self.stats.record_expired(1);
                self.stats.record_miss();
                Err(KvError::Expired(key.to_string()))
            }
            None => {
                self.stats.record_miss();
                Err(KvError::Expired(key.to_string()))
            }
        }
    }

    // == Delete ==
    /// Removes an entry by key.
    pub async fn delete(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        match entries.remove(key) {
            Some(_) => Ok(()),
            None => Err(KvError::NotFound(key.to_string())),
        }
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Returns the number of entries removed.
    pub async fn cleanup_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let now = Instant::now();
        let before = entries.len();
        entries.retain(|_, entry| entry.is_live_at(now));

        let removed = before - entries.len();
        self.stats.record_expired(removed);
        removed
    }

    // == Stats ==
    /// Returns current store statistics.
    pub async fn stats(&self) -> StoreStatsSnapshot {
        let total_entries = self.entries.read().await.len();
        self.stats.snapshot(total_entries)
    }

    // == Length ==
    /// Returns the number of entries, including expired ones not yet reclaimed.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
