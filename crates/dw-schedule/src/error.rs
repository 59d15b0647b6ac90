use thiserror::Error;

use dw_core::AgentId;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("no timer slot for agent {0}")]
    UnknownAgent(AgentId),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
