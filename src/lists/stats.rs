//! List Statistics Module

use serde::Serialize;

/// Point-in-time view of the list registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListStatsSnapshot {
    /// Number of list keys, including empty lists
    pub lists: usize,
    /// Elements held across all lists
    pub total_elements: usize,
    /// Elements handed out by pop and blocking pop
    pub popped: u64,
    /// Blocking pops that reached their deadline empty-handed
    pub timeouts: u64,
}
