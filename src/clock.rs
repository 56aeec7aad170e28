//! Clock Module
//!
//! Shared time helpers for the store and the list registry: converting
//! caller-supplied seconds into durations, and computing deadlines.

use std::time::Duration;

use tokio::time::Instant;

use crate::error::{KvError, Result};

/// Upper bound used when a deadline would overflow `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(60 * 60 * 24 * 365 * 30);

// == TTL Conversion ==
/// Converts a TTL in whole seconds into a `Duration`.
///
/// Negative values are rejected rather than clamped to zero.
pub fn ttl_from_secs(secs: i64) -> Result<Duration> {
    u64::try_from(secs)
        .map(Duration::from_secs)
        .map_err(|_| KvError::InvalidArgument(format!("TTL must be non-negative, got {}", secs)))
}

// == Timeout Conversion ==
/// Converts a blocking-pop timeout in (fractional) seconds into a `Duration`.
///
/// Rejects negative, NaN and infinite values.
pub fn timeout_from_secs_f64(secs: f64) -> Result<Duration> {
    if !secs.is_finite() || secs < 0.0 {
        return Err(KvError::InvalidArgument(format!(
            "Timeout must be a non-negative number of seconds, got {}",
            secs
        )));
    }

    Duration::try_from_secs_f64(secs)
        .map_err(|e| KvError::InvalidArgument(format!("Timeout out of range: {}", e)))
}

// == Deadline ==
/// Returns the instant `after` from now, saturating instead of overflowing.
pub fn deadline_after(after: Duration) -> Instant {
    expiry_after(Instant::now(), after)
}

/// Returns `start + ttl`, saturating instead of overflowing.
pub fn expiry_after(start: Instant, ttl: Duration) -> Instant {
    start
        .checked_add(ttl)
        .unwrap_or_else(|| start + FAR_FUTURE)
}
