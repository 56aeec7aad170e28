//! Lists Module
//!
//! Per-key integer lists with push, pop from the tail, and a blocking pop
//! that waits for a push up to a deadline.

mod registry;
mod stats;

pub use registry::ListRegistry;
pub use stats::ListStatsSnapshot;
