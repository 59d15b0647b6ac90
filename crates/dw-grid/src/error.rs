//! Grid-subsystem error type.
//!
//! Unreachable goals are *not* errors; search functions report them as
//! `Ok(None)`.  Everything here is a caller bug or a bad input file.

use thiserror::Error;

use dw_core::{Cell, DwError, ObjectId};

#[derive(Debug, Error)]
pub enum GridError {
    #[error("cell {cell} is outside the {width}x{height} grid")]
    OutOfBounds { cell: Cell, width: i32, height: i32 },

    #[error("cell {0} is already occupied by a wall or object")]
    Occupied(Cell),

    #[error("object {0} not found")]
    ObjectNotFound(ObjectId),

    #[error("no free cell left to place a {0}")]
    NoRoom(&'static str),

    #[error("layout error: {0}")]
    Layout(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] DwError),
}

pub type GridResult<T> = Result<T, GridError>;
