//! Error types produced while merging.

mod constructors;
mod types;

pub use types::{ErrorKind, FieldContext, MergeError, MergeResult};
