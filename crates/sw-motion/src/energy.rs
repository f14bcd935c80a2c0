//! Moving ⇄ Charging transitions.

use sw_agent::{Agent, AgentState};
use sw_core::{EnergyParams, StationId};
use sw_world::World;
use tracing::debug;

/// A state change produced by [`EnergyStateMachine::evaluate`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Transition {
    /// Moving → Charging at the nearest station.
    StartCharging { station: StationId, distance: f64 },
    /// Charging → Moving.
    ResumeMoving,
}

/// Threshold rules evaluated once per tick per non-Failed agent.
///
/// - Moving → Charging when `energy <= low` and the world has a station.
/// - Charging → Moving when `energy >= high`.
///
/// Everything else is a no-op.  An empty station set keeps low agents Moving.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EnergyStateMachine {
    pub low:  f64,
    pub high: f64,
}

impl EnergyStateMachine {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn from_params(params: &EnergyParams) -> Self {
        Self::new(params.low_threshold, params.high_threshold)
    }

    /// `true` if `agent` will switch to Charging at the next evaluation.
    #[inline]
    pub fn should_dock(&self, agent: &Agent, world: &World) -> bool {
        agent.state == AgentState::Moving
            && agent.energy.current <= self.low
            && world.has_stations()
    }

    /// Decide the transition for `agent` without applying it.
    pub fn evaluate(&self, agent: &Agent, world: &World) -> Option<Transition> {
        match agent.state {
            AgentState::Moving if agent.energy.current <= self.low => world
                .nearest_station(agent.position)
                .map(|(s, distance)| Transition::StartCharging { station: s.id, distance }),
            AgentState::Charging if agent.energy.current >= self.high => {
                Some(Transition::ResumeMoving)
            }
            _ => None,
        }
    }

    /// Evaluate and apply in one go.  Returns the transition taken, if any.
    pub fn update(&self, agent: &mut Agent, world: &World) -> Option<Transition> {
        let transition = self.evaluate(agent, world)?;
        apply(agent, transition);
        debug!(agent = %agent.id, energy = agent.energy.current, ?transition, "energy transition");
        Some(transition)
    }
}

/// Write `transition` into `agent`.
pub fn apply(agent: &mut Agent, transition: Transition) {
    match transition {
        Transition::StartCharging { station, .. } => {
            agent.set_state(AgentState::Charging);
            agent.docked_station = Some(station);
        }
        Transition::ResumeMoving => agent.set_state(AgentState::Moving),
    }
}
