//! Database layer - connection pool and todo store
//!
//! # Design Principles
//!
//! - One parameterized statement per operation, no transactions
//! - Writes re-read their row so callers see what was persisted
//! - Absent rows are reported as `None`/`false`; the HTTP layer decides
//!   what that means

pub mod pool;
pub mod repos;

pub use pool::connect;
pub use repos::*;
