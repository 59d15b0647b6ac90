//! Base error type shared by the `dw-*` crates.
//!
//! Sub-crates keep their own error enums and wrap `DwError` as one variant
//! through `#[from]`.

use thiserror::Error;

use crate::{AgentId, Cell, ObjectId};

#[derive(Debug, Error)]
pub enum DwError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("object {0} not found")]
    ObjectNotFound(ObjectId),

    #[error("cell {0} is outside the grid")]
    OutOfBounds(Cell),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `dw-*` crates.
pub type DwResult<T> = Result<T, DwError>;
