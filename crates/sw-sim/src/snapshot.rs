//! Read-only views handed to renderers and inspectors.

use std::sync::Arc;

use sw_agent::Agent;
use sw_core::{AgentId, ClockState, MissionId, StationId, Tick};
use sw_link::Link;
use sw_metrics::SimulationMetrics;
use sw_mission::Mission;
use sw_world::World;

/// A point-in-time copy of everything a renderer needs.
///
/// Owns its data; later ticks never show through.  The static world is
/// shared, since it never changes.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub tick:             Tick,
    pub simulation_time:  f64,
    pub clock_state:      ClockState,
    pub speed_multiplier: f64,
    pub agents:           Vec<Agent>,
    pub links:            Vec<Link>,
    pub metrics:          SimulationMetrics,
    pub active_missions:  Vec<Mission>,
    pub world:            Arc<World>,
}

impl Snapshot {
    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents
            .binary_search_by_key(&id, |a| a.id)
            .ok()
            .map(|i| &self.agents[i])
    }
}

/// Inspector panel data for one agent.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentDetail {
    pub agent:           Agent,
    /// Agents linked to this one in the last tick.
    pub link_partners:   Vec<AgentId>,
    /// Closest station and its planar distance.
    pub nearest_station: Option<(StationId, f64)>,
    /// Active missions this agent is assigned to.
    pub missions:        Vec<MissionId>,
}
