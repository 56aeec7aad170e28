//! Mini KVQ - A lightweight in-memory key-value and list server
//!
//! Provides a string store with per-key TTL and NX/XX conditional writes, plus
//! per-key integer lists with push, pop and blocking pop.

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod lists;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use error::{KvError, Result};
pub use lists::ListRegistry;
pub use store::{SetCondition, SetOutcome, TtlStore};
pub use tasks::spawn_cleanup_task;
