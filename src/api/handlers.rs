//! API Handlers
//!
//! HTTP request handlers for each server endpoint. Command routes decode the
//! request text into a typed `Command`, call the store or the list registry,
//! and format the outcome.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::debug;

use crate::error::{KvError, Result};
use crate::lists::ListRegistry;
use crate::models::{
    wrong_route, Command, CommandRequest, DeleteResponse, GetResponse, HealthResponse,
    PopResponse, PushResponse, SetResponse, StatsResponse,
};
use crate::store::TtlStore;

/// Application state shared across all handlers.
///
/// The store and the registry lock independently, so list traffic never
/// waits on key-value traffic or the other way round.
#[derive(Clone, Default)]
pub struct AppState {
    /// Key-value store with TTL support
    pub store: Arc<TtlStore>,
    /// Per-key integer lists
    pub lists: Arc<ListRegistry>,
}

impl AppState {
    /// Creates a new AppState with an empty store and registry.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Handler for POST /set
///
/// `SET key value [EX seconds] [NX|XX]`
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<CommandRequest>,
) -> Result<Json<SetResponse>> {
    match req.decode()? {
        Command::Set {
            key,
            value,
            ttl,
            condition,
        } => {
            let outcome = state.store.set(key.clone(), value, ttl, condition).await?;
            Ok(Json(SetResponse::new(key, outcome)))
        }
        other => Err(wrong_route("SET", &other)),
    }
}

/// Handler for POST /get
///
/// `GET key`
pub async fn get_handler(
    State(state): State<AppState>,
    Json(req): Json<CommandRequest>,
) -> Result<Json<GetResponse>> {
    match req.decode()? {
        Command::Get { key } => {
            let entry = state.store.get_entry(&key).await?;
            let ttl = entry.ttl_remaining().map(|remaining| remaining.as_secs());
            Ok(Json(GetResponse::new(key, entry.value, ttl)))
        }
        other => Err(wrong_route("GET", &other)),
    }
}

/// Handler for POST /qpush
///
/// `QPUSH key v1 [v2 ...]`
pub async fn qpush_handler(
    State(state): State<AppState>,
    Json(req): Json<CommandRequest>,
) -> Result<Json<PushResponse>> {
    match req.decode()? {
        Command::QPush { key, values } => {
            let length = state.lists.push(&key, &values).await?;
            Ok(Json(PushResponse { key, length }))
        }
        other => Err(wrong_route("QPUSH", &other)),
    }
}

/// Handler for POST /qpop
///
/// `QPOP key`
pub async fn qpop_handler(
    State(state): State<AppState>,
    Json(req): Json<CommandRequest>,
) -> Result<Json<PopResponse>> {
    match req.decode()? {
        Command::QPop { key } => {
            let value = state.lists.pop(&key).await?;
            Ok(Json(PopResponse { value: Some(value) }))
        }
        other => Err(wrong_route("QPOP", &other)),
    }
}

/// Handler for POST /bqpop
///
/// `BQPOP key timeout`. A timeout is a normal outcome and yields a null value.
pub async fn bqpop_handler(
    State(state): State<AppState>,
    Json(req): Json<CommandRequest>,
) -> Result<Json<PopResponse>> {
    match req.decode()? {
        Command::BQPop { key, timeout } => match state.lists.blocking_pop(&key, timeout).await {
            Ok(value) => Ok(Json(PopResponse { value: Some(value) })),
            Err(KvError::TimedOut(_)) => {
                debug!(key = %key, ?timeout, "bqpop returned empty-handed");
                Ok(Json(PopResponse { value: None }))
            }
            Err(e) => Err(e),
        },
        other => Err(wrong_route("BQPOP", &other)),
    }
}

/// Handler for DELETE /del/{key}
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    state.store.delete(&key).await?;
    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let store = state.store.stats().await;
    let lists = state.lists.stats().await;
    Json(StatsResponse::new(store, lists))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
