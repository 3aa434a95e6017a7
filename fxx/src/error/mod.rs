//! Error types produced while composing and resolving a container.

mod constructors;
mod types;

pub use types::{BoxError, ErrorKind, FxxError};
