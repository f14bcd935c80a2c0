use sw_core::{AgentId, SwarmError};
use sw_mission::MissionError;
use sw_world::WorldError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("agent {0} has failed and is frozen until reset")]
    AgentFailed(AgentId),

    #[error("simulation has shut down; command dropped")]
    Disconnected,

    #[error("command queue is full; command dropped")]
    QueueFull,

    #[error("world error: {0}")]
    World(#[from] WorldError),

    #[error("mission error: {0}")]
    Mission(#[from] MissionError),
}

impl From<SwarmError> for SimError {
    fn from(e: SwarmError) -> Self {
        match e {
            SwarmError::AgentNotFound(id)   => SimError::AgentNotFound(id),
            SwarmError::AgentFailed(id)     => SimError::AgentFailed(id),
            SwarmError::InvalidArgument(s)  => SimError::InvalidArgument(s),
            SwarmError::Config(s)           => SimError::Config(s),
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;
