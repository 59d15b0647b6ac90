use dw_core::{AgentId, Cell};
use dw_grid::GridError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MobilityError {
    #[error("agent {0} is already in transit")]
    AlreadyInTransit(AgentId),

    #[error("agent {0} is not in transit")]
    NotInTransit(AgentId),

    #[error("agent {agent} cannot step from {from} to non-adjacent {to}")]
    NotAdjacent { agent: AgentId, from: Cell, to: Cell },

    #[error("agent {0} has not been placed on the grid")]
    NotPlaced(AgentId),

    #[error("path search failed: {0}")]
    Grid(#[from] GridError),
}

pub type MobilityResult<T> = Result<T, MobilityError>;
