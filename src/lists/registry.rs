//! List Registry Module
//!
//! Maps keys to integer lists. Pops take from the tail (LIFO). A blocking pop
//! registers on the key's `Notify` while still holding the registry lock, then
//! waits with the lock released; every wakeup re-checks the list before
//! claiming anything, so an element is handed out at most once.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, Notify};
use tokio::time::Instant;
use tracing::debug;

use crate::clock;
use crate::error::{KvError, Result};
use crate::lists::ListStatsSnapshot;
use crate::store::validate_key;

// == List Slot ==
/// One key's list plus the notifier its blocked poppers wait on.
#[derive(Debug, Default)]
struct ListSlot {
    values: Vec<i64>,
    notify: Arc<Notify>,
}

#[derive(Debug, Default)]
struct RegistryState {
    lists: HashMap<String, ListSlot>,
    popped: u64,
    timeouts: u64,
}

impl RegistryState {
    /// Returns the slot for `key`, creating an empty one if needed.
    fn slot(&mut self, key: &str) -> &mut ListSlot {
        self.lists.entry(key.to_string()).or_default()
    }

    /// Removes the tail element of `key`'s list, if any.
    fn pop_tail(&mut self, key: &str) -> Option<i64> {
        let value = self.lists.get_mut(key)?.values.pop()?;
        self.popped += 1;
        Some(value)
    }
}

// == Wakeup Guard ==
/// A wakeup a blocked popper has received but not yet acted on.
///
/// If the popper is dropped before it gets back under the registry lock, the
/// wakeup is handed on to the next waiter instead of being lost.
struct PendingWakeup(Option<Arc<Notify>>);

impl PendingWakeup {
    fn new(notify: Arc<Notify>) -> Self {
        Self(Some(notify))
    }

    /// Marks the wakeup as consumed by a claim attempt.
    fn settle(mut self) {
        self.0 = None;
    }
}

impl Drop for PendingWakeup {
    fn drop(&mut self) {
        if let Some(notify) = self.0.take() {
            notify.notify_one();
        }
    }
}

// == List Registry ==
/// Thread-safe registry of per-key integer lists.
///
/// Lists are created on first push or first blocking wait and are kept when
/// they become empty.
#[derive(Debug, Default)]
pub struct ListRegistry {
    state: Mutex<RegistryState>,
}

impl ListRegistry {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Push ==
    /// Appends `values`, in order, to the tail of `key`'s list.
    ///
    /// Wakes one blocked popper per appended value, oldest waiter first.
    /// Returns the new length of the list.
    pub async fn push(&self, key: &str, values: &[i64]) -> Result<usize> {
        validate_key(key)?;

        let mut state = self.state.lock().await;
        let slot = state.slot(key);
        slot.values.extend_from_slice(values);

        for _ in values {
            slot.notify.notify_one();
        }

        Ok(slot.values.len())
    }

    // == Pop ==
    /// Removes and returns the most recently pushed element of `key`'s list.
    pub async fn pop(&self, key: &str) -> Result<i64> {
        validate_key(key)?;

        let mut state = self.state.lock().await;
        state
            .pop_tail(key)
            .ok_or_else(|| KvError::Empty(key.to_string()))
    }

    // == Blocking Pop ==
    /// Pops from `key`'s list, waiting up to `timeout` for an element to be
    /// pushed if the list is currently empty.
    ///
    /// A zero timeout behaves like `pop` but reports `TimedOut` when empty.
    /// Dropping the returned future abandons the wait; a wakeup it had
    /// already received goes to the next waiter on the key.
    pub async fn blocking_pop(&self, key: &str, timeout: Duration) -> Result<i64> {
        validate_key(key)?;

        let deadline = clock::deadline_after(timeout);
        let mut wakeups: u32 = 0;
        let mut pending: Option<PendingWakeup> = None;

        loop {
            let mut state = self.state.lock().await;
            if let Some(wakeup) = pending.take() {
                wakeup.settle();
            }

            if let Some(value) = state.pop_tail(key) {
                if wakeups > 0 {
                    debug!(key, wakeups, "blocking pop fulfilled");
                }
                return Ok(value);
            }

            // Checked after the claim attempt so a push that raced the timer still counts.
            if Instant::now() >= deadline {
                state.timeouts += 1;
                debug!(key, wakeups, "blocking pop timed out");
                return Err(KvError::TimedOut(key.to_string()));
            }

            let notify = Arc::clone(&state.slot(key).notify);
            let notified = notify.notified();
            tokio::pin!(notified);

            // Register as a waiter before unlocking, or a push landing in
            // between would find nobody to wake.
            notified.as_mut().enable();
            drop(state);

            if tokio::time::timeout_at(deadline, notified).await.is_ok() {
                wakeups += 1;
                pending = Some(PendingWakeup::new(Arc::clone(&notify)));
            }
        }
    }

    // == Length ==
    /// Returns the length of `key`'s list, 0 if it does not exist.
    pub async fn len(&self, key: &str) -> usize {
        let state = self.state.lock().await;
        state.lists.get(key).map_or(0, |slot| slot.values.len())
    }

    // == Stats ==
    pub async fn stats(&self) -> ListStatsSnapshot {
        let state = self.state.lock().await;
        ListStatsSnapshot {
            lists: state.lists.len(),
            total_elements: state.lists.values().map(|slot| slot.values.len()).sum(),
            popped: state.popped,
            timeouts: state.timeouts,
        }
    }
}
