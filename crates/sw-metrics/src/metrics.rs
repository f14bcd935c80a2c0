//! `SimulationMetrics` and its groups.

use sw_core::Tick;

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentMetrics {
    pub total:    usize,
    /// Every state but Failed.
    pub active:   usize,
    pub failed:   usize,
    pub moving:   usize,
    pub idle:     usize,
    pub charging: usize,
    /// Mean state of charge; 0 for an empty population.
    pub average_energy: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MissionMetrics {
    pub active:       usize,
    pub completed:    usize,
    /// `completed / max(1, total)`.
    pub success_rate: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommunicationMetrics {
    pub total_messages:       u64,
    pub packet_delivery_rate: f64,
    /// Links formed in the last tick.
    pub active_links:         usize,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerformanceMetrics {
    /// `average_energy × active / max(1, Σ distance_traveled)`.
    pub energy_efficiency: f64,
    /// `active / max(1, total)`.
    pub system_uptime:     f64,
}

/// Scalar summaries derived from the live state.  Never mutated on its own;
/// always rebuilt by [`MetricsAggregator::summarize`](crate::MetricsAggregator::summarize).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationMetrics {
    pub simulation_time: f64,
    pub tick:            Tick,
    pub agents:          AgentMetrics,
    pub missions:        MissionMetrics,
    pub communication:   CommunicationMetrics,
    pub performance:     PerformanceMetrics,
}
