use thiserror::Error;

use dw_grid::GridError;
use dw_mobility::MobilityError;
use dw_schedule::ScheduleError;

/// Programming-error class failures.  Unreachable goals and vanished
/// resources are not errors: states report them by going inactive.
#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("behavior configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Mobility(#[from] MobilityError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    Grid(#[from] GridError),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
