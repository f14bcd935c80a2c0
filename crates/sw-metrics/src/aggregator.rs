//! `MetricsAggregator`: telemetry counters plus the pure summary.

use sw_agent::{Agent, AgentState};
use sw_core::{SimRng, SimulationClock, TelemetryMode, TelemetryParams};
use sw_link::LinkSet;
use sw_mission::MissionTally;

use crate::{
    AgentMetrics, CommunicationMetrics, MissionMetrics, PerformanceMetrics, SimulationMetrics,
};

/// Owns the two counters that persist across ticks (`total_messages` and
/// `packet_delivery_rate`); everything else is recomputed from the live state.
///
/// | Mode       | `total_messages` per tick   | `packet_delivery_rate`             |
/// |------------|-----------------------------|------------------------------------|
/// | `Cosmetic` | `+= U{0..=max_message_burst}` | resampled in the delivery band   |
/// | `Derived`  | `+= links formed`           | `links / candidates` (kept if none) |
#[derive(Clone, Debug)]
pub struct MetricsAggregator {
    pub params:               TelemetryParams,
    pub total_messages:       u64,
    pub packet_delivery_rate: f64,
}

impl MetricsAggregator {
    pub fn new(params: TelemetryParams) -> Self {
        Self { params, total_messages: 0, packet_delivery_rate: 1.0 }
    }

    /// Update the telemetry counters after a tick's links are known.
    pub fn record_tick(&mut self, links: &LinkSet, rng: &mut SimRng) {
        match self.params.mode {
            TelemetryMode::Cosmetic => {
                self.total_messages += rng.gen_range(0..=self.params.max_message_burst);
                let (lo, hi) = (self.params.delivery_rate_min, self.params.delivery_rate_max);
                self.packet_delivery_rate = rng.gen_range(lo..=hi);
            }
            TelemetryMode::Derived => {
                self.total_messages += links.len() as u64;
                if links.candidates > 0 {
                    self.packet_delivery_rate = links.len() as f64 / links.candidates as f64;
                }
            }
        }
    }

    pub fn reset(&mut self) {
        self.total_messages = 0;
        self.packet_delivery_rate = 1.0;
    }

    /// Derive the full metrics record.  Reads only; safe to call at any time.
    pub fn summarize(
        &self,
        agents:   &[Agent],
        missions: MissionTally,
        links:    &LinkSet,
        clock:    &SimulationClock,
    ) -> SimulationMetrics {
        let mut a = AgentMetrics { total: agents.len(), ..AgentMetrics::default() };
        let mut energy_sum = 0.0;
        let mut distance_sum = 0.0;
        for agent in agents {
            match agent.state {
                AgentState::Moving   => a.moving += 1,
                AgentState::Idle     => a.idle += 1,
                AgentState::Charging => a.charging += 1,
                AgentState::Failed   => a.failed += 1,
            }
            energy_sum += agent.energy.current;
            distance_sum += agent.performance.distance_traveled;
        }
        a.active = a.total - a.failed;
        a.average_energy = if a.total == 0 { 0.0 } else { energy_sum / a.total as f64 };

        let performance = PerformanceMetrics {
            energy_efficiency: a.average_energy * a.active as f64 / distance_sum.max(1.0),
            system_uptime:     a.active as f64 / a.total.max(1) as f64,
        };

        SimulationMetrics {
            simulation_time: clock.simulation_time,
            tick:            clock.current_tick,
            missions: MissionMetrics {
                active:       missions.active,
                completed:    missions.completed,
                success_rate: missions.completed as f64 / missions.total.max(1) as f64,
            },
            communication: CommunicationMetrics {
                total_messages:       self.total_messages,
                packet_delivery_rate: self.packet_delivery_rate,
                active_links:         links.len(),
            },
            performance,
            agents: a,
        }
    }
}
