//! Store Statistics Module
//!
//! Tracks read and write outcomes. Counters are atomic so that reads running
//! under the shared lock can still record hits and misses.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Store Stats ==
/// Live counters owned by a `TtlStore`.
#[derive(Debug, Default)]
pub struct StoreStats {
    hits: AtomicU64,
    misses: AtomicU64,
    expired: AtomicU64,
    skipped_writes: AtomicU64,
}

/// Point-in-time copy of the store counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StoreStatsSnapshot {
    /// Reads that returned a live value
    pub hits: u64,
    /// Reads that found no live value (missing or expired)
    pub misses: u64,
    /// Entries removed because their TTL lapsed
    pub expired: u64,
    /// Conditional writes whose condition was not met
    pub skipped_writes: u64,
    /// Current number of entries, including not-yet-reclaimed expired ones
    pub total_entries: usize,
}

impl StoreStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Records `count` reclaimed entries.
    pub fn record_expired(&self, count: usize) {
        self.expired.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_skipped_write(&self) {
        self.skipped_writes.fetch_add(1, Ordering::Relaxed);
    }

    // == Snapshot ==
    /// Copies the counters together with the current entry count.
    pub fn snapshot(&self, total_entries: usize) -> StoreStatsSnapshot {
        StoreStatsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            expired: self.expired.load(Ordering::Relaxed),
            skipped_writes: self.skipped_writes.load(Ordering::Relaxed),
            total_entries,
        }
    }
}

impl StoreStatsSnapshot {
    // == Hit Rate ==
    /// Calculates hits / (hits + misses), or 0.0 if nothing was read yet.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
