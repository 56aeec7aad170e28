//! Request and Response models for the server API
//!
//! This module defines the typed command decoded from request text and the
//! DTOs used for serializing/deserializing HTTP bodies.

pub mod command;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use command::Command;
pub use requests::{wrong_route, CommandRequest};
pub use responses::{
    DeleteResponse, GetResponse, HealthResponse, PopResponse, PushResponse, SetResponse,
    StatsResponse,
};
