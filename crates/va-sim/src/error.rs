use thiserror::Error;

use va_agent::AgentState;
use va_core::{AgentId, CoreError};
use va_schedule::ScheduleError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("agent limit reached ({max})")]
    CapacityReached { max: usize },

    #[error("an agent named {0:?} already exists")]
    DuplicateName(String),

    #[error("no agent with id {0}")]
    UnknownAgent(AgentId),

    #[error("{id} is {state} and cannot be driven")]
    NotTickable { id: AgentId, state: AgentState },

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type SimResult<T> = Result<T, SimError>;
