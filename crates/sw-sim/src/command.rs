//! Buffered control-plane commands.
//!
//! Commands can be sent from any thread through a [`CommandSender`].  They
//! are never applied mid-tick: [`Sim::step`](crate::Sim::step) drains the
//! whole queue, in send order, before it does anything else.
//!
//! The queue is bounded.  When frames stall and the queue fills, further
//! sends fail with [`SimError::QueueFull`] instead of blocking the caller.

use std::sync::mpsc::{SyncSender, TrySendError};

use tracing::warn;

use sw_agent::AgentState;
use sw_core::{AgentId, Vec3};
use sw_mission::MissionKind;

use crate::{SimError, SimResult};

/// Queue capacity used unless [`SimBuilder::command_capacity`] overrides it.
///
/// [`SimBuilder::command_capacity`]: crate::SimBuilder::command_capacity
pub const DEFAULT_COMMAND_CAPACITY: usize = 256;

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    SetRunning(bool),
    Reset,
    SetSpeed(f64),
    /// Signed so that a negative request can be reported as invalid.
    SetAgentCount(i64),
    ModifyAgent {
        id:       AgentId,
        energy:   Option<f64>,
        position: Option<Vec3>,
    },
    SetAgentState {
        id:    AgentId,
        state: AgentState,
    },
    CreateMission {
        x:    f64,
        y:    f64,
        kind: MissionKind,
    },
}

/// Cloneable handle for queueing [`Command`]s.
#[derive(Clone, Debug)]
pub struct CommandSender {
    tx: SyncSender<Command>,
}

impl CommandSender {
    pub(crate) fn new(tx: SyncSender<Command>) -> Self {
        Self { tx }
    }

    /// Queue `command` for the next tick boundary.  Never blocks.
    ///
    /// # Errors
    /// `QueueFull` if the queue is at capacity (the command is dropped);
    /// `Disconnected` if the simulation has been dropped.
    pub fn send(&self, command: Command) -> SimResult<()> {
        match self.tx.try_send(command) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(command)) => {
                warn!(?command, "command queue full; dropping command");
                Err(SimError::QueueFull)
            }
            Err(TrySendError::Disconnected(_)) => Err(SimError::Disconnected),
        }
    }

    pub fn set_running(&self, running: bool) -> SimResult<()> {
        self.send(Command::SetRunning(running))
    }

    pub fn reset(&self) -> SimResult<()> {
        self.send(Command::Reset)
    }

    pub fn set_speed(&self, multiplier: f64) -> SimResult<()> {
        self.send(Command::SetSpeed(multiplier))
    }

    pub fn set_agent_count(&self, n: i64) -> SimResult<()> {
        self.send(Command::SetAgentCount(n))
    }
}
