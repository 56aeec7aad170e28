//! Command Decoding
//!
//! Turns command text such as `SET name alice EX 10 NX` into a typed
//! `Command`. This is the only place that looks at raw command text; the
//! store and the registry receive typed, validated arguments.

use std::time::Duration;

use crate::clock;
use crate::error::{KvError, Result};
use crate::store::SetCondition;

/// A decoded command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `SET key value [EX seconds] [NX|XX]`
    Set {
        key: String,
        value: String,
        ttl: Option<Duration>,
        condition: SetCondition,
    },
    /// `GET key`
    Get { key: String },
    /// `QPUSH key v1 [v2 ...]`
    QPush { key: String, values: Vec<i64> },
    /// `QPOP key`
    QPop { key: String },
    /// `BQPOP key timeout`
    BQPop { key: String, timeout: Duration },
}

impl Command {
    /// Decodes command text.
    ///
    /// `fallback_timeout` is used by `BQPOP` when the text carries no timeout
    /// token; it comes from the `timeout` field of the JSON body.
    pub fn parse(text: &str, fallback_timeout: Option<f64>) -> Result<Self> {
        let mut parts = text.split_whitespace();
        let verb = parts
            .next()
            .ok_or_else(|| invalid("Command cannot be empty"))?
            .to_ascii_uppercase();
        let args: Vec<&str> = parts.collect();

        match verb.as_str() {
            "SET" => parse_set(&args),
            "GET" => {
                let [key] = args.as_slice() else {
                    return Err(invalid("Usage: GET key"));
                };
                Ok(Command::Get { key: key.to_string() })
            }
            "QPUSH" => {
                let Some((key, raw_values)) = args.split_first() else {
                    return Err(invalid("Usage: QPUSH key value [value ...]"));
                };
                if raw_values.is_empty() {
                    return Err(invalid("QPUSH requires at least one value"));
                }
                let values = raw_values
                    .iter()
                    .map(|raw| {
                        raw.parse::<i64>()
                            .map_err(|_| invalid(format!("Not an integer: {}", raw)))
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Command::QPush { key: key.to_string(), values })
            }
            "QPOP" => {
                let [key] = args.as_slice() else {
                    return Err(invalid("Usage: QPOP key"));
                };
                Ok(Command::QPop { key: key.to_string() })
            }
            "BQPOP" => {
                let (key, secs) = match (args.as_slice(), fallback_timeout) {
                    ([key, raw], _) => {
                        let secs = raw
                            .parse::<f64>()
                            .map_err(|_| invalid(format!("Invalid timeout: {}", raw)))?;
                        (key, secs)
                    }
                    ([key], Some(secs)) => (key, secs),
                    _ => return Err(invalid("Usage: BQPOP key timeout")),
                };
                Ok(Command::BQPop {
                    key: key.to_string(),
                    timeout: clock::timeout_from_secs_f64(secs)?,
                })
            }
            other => Err(invalid(format!("Unknown command: {}", other))),
        }
    }

    /// Upper-case verb of this command.
    pub fn verb(&self) -> &'static str {
        match self {
            Command::Set { .. } => "SET",
            Command::Get { .. } => "GET",
            Command::QPush { .. } => "QPUSH",
            Command::QPop { .. } => "QPOP",
            Command::BQPop { .. } => "BQPOP",
        }
    }
}

fn parse_set(args: &[&str]) -> Result<Command> {
    let [key, value, options @ ..] = args else {
        return Err(invalid("Usage: SET key value [EX seconds] [NX|XX]"));
    };

    let mut ttl = None;
    let mut condition = SetCondition::None;
    let mut options = options.iter();

    while let Some(option) = options.next() {
        match option.to_ascii_uppercase().as_str() {
            "EX" if ttl.is_none() => {
                let raw = options
                    .next()
                    .ok_or_else(|| invalid("EX requires a number of seconds"))?;
                let secs = raw
                    .parse::<i64>()
                    .map_err(|_| invalid(format!("Invalid expiration time: {}", raw)))?;
                ttl = Some(clock::ttl_from_secs(secs)?);
            }
            "NX" if condition == SetCondition::None => condition = SetCondition::IfNotExists,
            "XX" if condition == SetCondition::None => condition = SetCondition::IfExists,
            "EX" | "NX" | "XX" => {
                return Err(invalid(format!("Conflicting or repeated SET option: {}", option)))
            }
            _ => return Err(invalid(format!("Unknown SET option: {}", option))),
        }
    }

    Ok(Command::Set {
        key: key.to_string(),
        value: value.to_string(),
        ttl,
        condition,
    })
}

fn invalid(msg: impl Into<String>) -> KvError {
    KvError::InvalidRequest(msg.into())
}
