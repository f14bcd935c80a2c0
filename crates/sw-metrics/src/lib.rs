//! `sw-metrics`: scalar summaries of the simulation state.
//!
//! | Module         | Contents                                                 |
//! |----------------|----------------------------------------------------------|
//! | [`metrics`]    | `SimulationMetrics` and its nested groups                |
//! | [`aggregator`] | `MetricsAggregator`: telemetry counters, `summarize`     |

pub mod aggregator;
pub mod metrics;


pub use aggregator::MetricsAggregator;
pub use metrics::{
    AgentMetrics, CommunicationMetrics, MissionMetrics, PerformanceMetrics, SimulationMetrics,
};
