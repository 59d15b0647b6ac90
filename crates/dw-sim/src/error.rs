use thiserror::Error;

use dw_behavior::BehaviorError;
use dw_core::{Cell, DwError};
use dw_grid::GridError;
use dw_mobility::MobilityError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("initial position {0} is not a free, unshared cell")]
    PositionNotFree(Cell),

    #[error("cannot place {needed} humans on {free} free cells")]
    NoRoom { needed: usize, free: usize },

    #[error(transparent)]
    Core(#[from] DwError),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("mobility error: {0}")]
    Mobility(#[from] MobilityError),

    #[error("behavior error: {0}")]
    Behavior(#[from] BehaviorError),
}

pub type SimResult<T> = Result<T, SimError>;
