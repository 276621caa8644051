//! HTTP server layer
//!
//! Axum server with:
//! - Todo CRUD routes under `/todos/`
//! - Frontend assets for every other path
//! - Request tracing
//! - Per-call store deadline
//! - Graceful shutdown

pub mod error;
pub mod extractors;
pub mod response;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerError};
