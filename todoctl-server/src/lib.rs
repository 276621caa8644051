//! todoctl-server: todo CRUD over SQL
//!
//! Exposes list/create/read/update/delete for todo records over JSON, and
//! serves the bundled frontend for every other path.

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::{Config, DatabaseConfig, ServerConfig};
pub use db::{connect, StoreError, TodoStore};
pub use http::{build_router, run_server, ApiError, AppState, ServerError};
pub use models::{Todo, TodoFields, TodoId};
