//! API Module
//!
//! HTTP handlers and routing for the server.
//!
//! # Endpoints
//! - `POST /set`, `/get`, `/qpush`, `/qpop`, `/bqpop` - JSON `{"command": "..."}` bodies
//! - `DELETE /del/:key` - Delete a key
//! - `GET /stats` - Store and list counters
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
