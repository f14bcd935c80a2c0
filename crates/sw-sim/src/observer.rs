//! Simulation observer trait for progress reporting and data collection.

use sw_core::{AgentId, Tick};
use sw_metrics::SimulationMetrics;
use sw_motion::Transition;

use crate::{Command, SimError, Snapshot};

/// What happened during one completed tick.
#[derive(Clone, Debug, PartialEq)]
pub struct TickSummary {
    /// The tick that just ran (before the clock advanced).
    pub tick:               Tick,
    /// Scaled seconds covered by this tick.
    pub dt:                 f64,
    pub transitions:        usize,
    pub candidates:         usize,
    pub missions_completed: usize,
    /// Metrics as of the end of the tick.
    pub metrics:            SimulationMetrics,
}

/// Callbacks invoked by [`Sim::step_observed`][crate::Sim::step_observed].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, summary: &TickSummary) {
///         if summary.tick.0 % self.interval == 0 {
///             println!("{}: {} links", summary.tick, summary.metrics.communication.active_links);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called after queued commands are applied, before any agent moves.
    /// Not called while paused.
    fn on_tick_start(&mut self, _tick: Tick) {}

    fn on_tick_end(&mut self, _summary: &TickSummary) {}

    /// An agent switched between Moving and Charging.
    fn on_transition(&mut self, _tick: Tick, _agent: AgentId, _transition: Transition) {}

    /// Called every `config.output_interval_ticks` completed ticks.
    fn on_snapshot(&mut self, _snapshot: &Snapshot) {}

    /// A queued command could not be applied.
    fn on_command_rejected(&mut self, _command: &Command, _error: &SimError) {}

    /// A queued `Reset` was applied.
    fn on_reset(&mut self) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
