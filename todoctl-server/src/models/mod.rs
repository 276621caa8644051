//! Domain models
//!
//! Wire names are PascalCase (`Id`, `Title`, ...) to stay compatible with
//! existing frontends.

pub mod todo;

pub use todo::{Todo, TodoFields, TodoId};
