//! Store Module
//!
//! Provides the in-memory key-value store with TTL expiration and
//! conditional writes.

mod entry;
mod stats;
mod ttl;


// Re-export public types
pub use entry::StoreEntry;
pub use stats::{StoreStats, StoreStatsSnapshot};
pub use ttl::{SetCondition, SetOutcome, TtlStore};

use crate::error::{KvError, Result};

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB

// == Key Validation ==
/// Rejects empty keys and keys longer than `MAX_KEY_LENGTH`.
///
/// Shared by the store and the list registry.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(KvError::InvalidArgument("Key cannot be empty".to_string()));
    }
    if key.len() > MAX_KEY_LENGTH {
        return Err(KvError::InvalidArgument(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        )));
    }
    Ok(())
}
