//! Response DTOs for the server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::lists::ListStatsSnapshot;
use crate::store::{SetOutcome, StoreStatsSnapshot};

/// Response body for POST /set
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// `OK` when written, `SKIPPED` when the NX/XX condition was not met
    pub result: &'static str,
    /// The key that was targeted
    pub key: String,
}

impl SetResponse {
    pub fn new(key: impl Into<String>, outcome: SetOutcome) -> Self {
        let result = match outcome {
            SetOutcome::Written => "OK",
            SetOutcome::Skipped => "SKIPPED",
        };
        Self {
            result,
            key: key.into(),
        }
    }
}

/// Response body for POST /get
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value
    pub value: String,
    /// Remaining TTL in seconds, omitted for entries that never expire
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u64>,
}

impl GetResponse {
    pub fn new(key: impl Into<String>, value: impl Into<String>, ttl: Option<u64>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            ttl,
        }
    }
}

/// Response body for POST /qpush
#[derive(Debug, Clone, Serialize)]
pub struct PushResponse {
    pub key: String,
    /// Length of the list after the push
    pub length: usize,
}

/// Response body for POST /qpop and POST /bqpop
///
/// `value` is null when a blocking pop timed out.
#[derive(Debug, Clone, Serialize)]
pub struct PopResponse {
    pub value: Option<i64>,
}

/// Response body for DELETE /del/{key}
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The key that was deleted
    pub key: String,
}

impl DeleteResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted successfully", key),
            key,
        }
    }
}

/// Response body for GET /stats
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub store: StoreStatsSnapshot,
    /// hits / (hits + misses) for the store
    pub hit_rate: f64,
    pub lists: ListStatsSnapshot,
}

impl StatsResponse {
    pub fn new(store: StoreStatsSnapshot, lists: ListStatsSnapshot) -> Self {
        Self {
            hit_rate: store.hit_rate(),
            store,
            lists,
        }
    }
}

/// Response body for GET /health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_response_serialize() {
        let written = serde_json::to_value(SetResponse::new("k", SetOutcome::Written)).unwrap();
        assert_eq!(written, json!({"result": "OK", "key": "k"}));

        let skipped = serde_json::to_value(SetResponse::new("k", SetOutcome::Skipped)).unwrap();
        assert_eq!(skipped["result"], "SKIPPED");
    }

    #[test]
    fn test_get_response_omits_missing_ttl() {
        let json = serde_json::to_value(GetResponse::new("k", "v", None)).unwrap();
        assert_eq!(json, json!({"key": "k", "value": "v"}));

        let json = serde_json::to_value(GetResponse::new("k", "v", Some(9))).unwrap();
        assert_eq!(json["ttl"], 9);
    }

    #[test]
    fn test_pop_response_null_on_timeout() {
        let json = serde_json::to_value(PopResponse { value: None }).unwrap();
        assert_eq!(json, json!({"value": null}));
    }

    #[test]
    fn test_stats_response_hit_rate() {
        let store = StoreStatsSnapshot {
            hits: 8,
            misses: 2,
            ..Default::default()
        };
        let resp = StatsResponse::new(store, ListStatsSnapshot::default());
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
