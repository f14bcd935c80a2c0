//! Plain data row types written by output backends.

use sw_agent::Agent;
use sw_core::Tick;
use sw_sim::TickSummary;

/// One agent's kinematic and energy state at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshotRow {
    pub tick:                 u64,
    pub agent_id:             u32,
    /// `moving`, `idle`, `charging` or `failed`.
    pub state:                &'static str,
    pub x:                    f64,
    pub y:                    f64,
    pub z:                    f64,
    pub energy:               f64,
    pub distance_traveled:    f64,
    pub communications_count: u64,
}

impl AgentSnapshotRow {
    pub fn new(tick: Tick, agent: &Agent) -> Self {
        Self {
            tick:                 tick.0,
            agent_id:             agent.id.0,
            state:                agent.state.as_str(),
            x:                    agent.position.x,
            y:                    agent.position.y,
            z:                    agent.position.z,
            energy:               agent.energy.current,
            distance_traveled:    agent.performance.distance_traveled,
            communications_count: agent.performance.communications_count,
        }
    }
}

/// Aggregate statistics for one completed tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:                 u64,
    pub simulation_time:      f64,
    pub active_agents:        u64,
    pub average_energy:       f64,
    pub active_links:         u64,
    pub total_messages:       u64,
    pub packet_delivery_rate: f64,
    pub transitions:          u64,
    pub active_missions:      u64,
}

impl From<&TickSummary> for TickSummaryRow {
    fn from(s: &TickSummary) -> Self {
        let m = &s.metrics;
        Self {
            tick:                 s.tick.0,
            simulation_time:      m.simulation_time,
            active_agents:        m.agents.active as u64,
            average_energy:       m.agents.average_energy,
            active_links:         m.communication.active_links as u64,
            total_messages:       m.communication.total_messages,
            packet_delivery_rate: m.communication.packet_delivery_rate,
            transitions:          s.transitions as u64,
            active_missions:      m.missions.active as u64,
        }
    }
}
