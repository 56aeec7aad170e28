//! Request DTOs for the server API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::error::{KvError, Result};
use crate::models::Command;

/// Request body shared by every command route (POST /set, /get, /qpush, /qpop, /bqpop)
///
/// # Fields
/// - `command`: Command text, e.g. `SET name alice EX 10 NX`
/// - `timeout`: Optional BQPOP timeout in seconds, used when the text has none
#[derive(Debug, Clone, Deserialize)]
pub struct CommandRequest {
    /// The command text
    pub command: String,
    /// Optional timeout in seconds for BQPOP
    #[serde(default)]
    pub timeout: Option<f64>,
}

impl CommandRequest {
    /// Decodes the command text.
    pub fn decode(&self) -> Result<Command> {
        Command::parse(&self.command, self.timeout)
    }
}

/// Error for a well-formed command sent to another command's route.
pub fn wrong_route(expected_verb: &str, command: &Command) -> KvError {
    KvError::InvalidRequest(format!(
        "Expected a {} command, got {}",
        expected_verb,
        command.verb()
    ))
}
