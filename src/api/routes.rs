//! API Routes
//!
//! Configures the Axum router with all server endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    bqpop_handler, delete_handler, get_handler, health_handler, qpop_handler, qpush_handler,
    set_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /set` - `SET key value [EX seconds] [NX|XX]`
/// - `POST /get` - `GET key`
/// - `POST /qpush` - `QPUSH key v1 [v2 ...]`
/// - `POST /qpop` - `QPOP key`
/// - `POST /bqpop` - `BQPOP key timeout`
/// - `DELETE /del/:key` - Delete a key
/// - `GET /stats` - Store and list counters
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/set", post(set_handler))
        .route("/get", post(get_handler))
        .route("/qpush", post(qpush_handler))
        .route("/qpop", post(qpop_handler))
        .route("/bqpop", post(bqpop_handler))
        .route("/del/:key", delete(delete_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
