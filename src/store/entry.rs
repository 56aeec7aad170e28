//! Store Entry Module
//!
//! Defines the structure for individual store entries with TTL support.

use std::time::Duration;

use tokio::time::Instant;

use crate::clock;

// == Store Entry ==
/// Represents a single stored value with its expiration metadata.
#[derive(Debug, Clone)]
pub struct StoreEntry {
    /// The stored value
    pub value: String,
    /// Instant the entry was written
    pub created_at: Instant,
    /// Expiration instant, None = no expiration
    pub expires_at: Option<Instant>,
}

impl StoreEntry {
    // == Constructor ==
    /// Creates a new entry written at `now` with an optional TTL.
    pub fn new(value: String, ttl: Option<Duration>, now: Instant) -> Self {
        Self {
            value,
            created_at: now,
            expires_at: ttl.map(|ttl| clock::expiry_after(now, ttl)),
        }
    }

    // == Liveness ==
    /// Checks whether the entry is live at `now`.
    ///
    /// Boundary condition: an entry stops being live at exactly its
    /// expiration instant, so a zero TTL produces an entry that is never live.
    pub fn is_live_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now < expires,
            None => true,
        }
    }

    // == Time To Live ==
    /// Returns the remaining TTL, or None if no expiration is set.
    ///
    /// Returns `Some(Duration::ZERO)` once the entry has expired.
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|expires| expires.saturating_duration_since(Instant::now()))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_entry_creation_no_ttl() {
        let entry = StoreEntry::new("test_value".to_string(), None, Instant::now());

        assert_eq!(entry.value, "test_value");
        assert!(entry.expires_at.is_none());
        assert!(entry.is_live_at(Instant::now()));
        assert!(entry.ttl_remaining().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expiration() {
        let entry = StoreEntry::new("test_value".to_string(), Some(Duration::from_secs(1)), Instant::now());
        assert!(entry.is_live_at(Instant::now()));

        tokio::time::advance(Duration::from_millis(999)).await;
        assert!(entry.is_live_at(Instant::now()));

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(!entry.is_live_at(Instant::now()));
        assert_eq!(entry.ttl_remaining(), Some(Duration::ZERO));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ttl_remaining() {
        let entry = StoreEntry::new("v".to_string(), Some(Duration::from_secs(10)), Instant::now());

        tokio::time::advance(Duration::from_secs(4)).await;
        assert_eq!(entry.ttl_remaining(), Some(Duration::from_secs(6)));
    }

    #[test]
    fn test_huge_ttl_does_not_overflow() {
        let now = Instant::now();
        let entry = StoreEntry::new("v".to_string(), Some(Duration::from_secs(u64::MAX)), now);

        assert!(entry.is_live_at(now + Duration::from_secs(60 * 60 * 24 * 365)));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = Instant::now();
        let entry = StoreEntry::new("test".to_string(), Some(Duration::ZERO), now);

        assert!(!entry.is_live_at(now), "Entry should not be live at its expiration instant");
    }
}
