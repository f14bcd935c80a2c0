//! Simulation time model.
//!
//! # Design
//!
//! Two clocks run side by side:
//!
//! - a monotonically increasing `Tick` counter, one per completed update, used
//!   for output intervals and event ordering;
//! - `simulation_time`, the sum of every tick's *scaled* real-time delta in
//!   seconds.
//!
//! Ticks are driven by a real-time frame loop, so the wall-clock delta varies
//! from tick to tick.  The `speed_multiplier` scales that delta before any
//! subsystem sees it; a multiplier of `0` keeps ticking without advancing
//! simulated time.

use std::fmt;

use crate::{SwarmError, SwarmResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── ClockState ────────────────────────────────────────────────────────────────

/// Run state of the [`SimulationClock`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ClockState {
    /// No agent mutation; snapshots keep serving the last computed state.
    #[default]
    Paused,
    /// Every `step` advances the simulation.
    Running,
}

// ── SimulationClock ───────────────────────────────────────────────────────────

/// Play/pause state, speed scaling, and elapsed simulated time.
///
/// Transitions: `Paused ⇄ Running` via [`set_running`](Self::set_running);
/// [`reset`](Self::reset) is valid from either state and always lands in
/// `Paused`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationClock {
    pub state: ClockState,
    /// Multiplier applied to every wall-clock delta.  Always `>= 0` and finite.
    pub speed_multiplier: f64,
    /// Simulated seconds since the last reset.
    pub simulation_time: f64,
    /// Ticks completed since the last reset.
    pub current_tick: Tick,
}

impl SimulationClock {
    /// A paused clock at time zero.
    pub fn new(speed_multiplier: f64) -> Self {
        Self {
            state: ClockState::Paused,
            speed_multiplier,
            simulation_time: 0.0,
            current_tick: Tick::ZERO,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == ClockState::Running
    }

    pub fn set_running(&mut self, running: bool) {
        self.state = if running { ClockState::Running } else { ClockState::Paused };
    }

    /// Change the speed multiplier.
    ///
    /// # Errors
    /// `InvalidArgument` for negative or non-finite values; the clock is left
    /// unchanged.
    pub fn set_speed(&mut self, multiplier: f64) -> SwarmResult<()> {
        if !multiplier.is_finite() || multiplier < 0.0 {
            return Err(SwarmError::InvalidArgument(format!(
                "speed multiplier must be finite and >= 0, got {multiplier}"
            )));
        }
        self.speed_multiplier = multiplier;
        Ok(())
    }

    /// Convert a wall-clock delta in milliseconds into scaled simulated
    /// seconds.  Negative or non-finite deltas count as zero.
    #[inline]
    pub fn scaled_delta_secs(&self, delta_ms: f64) -> f64 {
        let delta_ms = if delta_ms.is_finite() { delta_ms.max(0.0) } else { 0.0 };
        delta_ms / 1_000.0 * self.speed_multiplier
    }

    /// Record one completed tick covering `scaled_secs` of simulated time.
    #[inline]
    pub fn advance(&mut self, scaled_secs: f64) {
        self.simulation_time += scaled_secs;
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Halt and rewind to time zero.  The speed multiplier is kept.
    pub fn reset(&mut self) {
        self.state = ClockState::Paused;
        self.simulation_time = 0.0;
        self.current_tick = Tick::ZERO;
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl fmt::Display for SimulationClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.state {
            ClockState::Paused => "paused",
            ClockState::Running => "running",
        };
        write!(
            f,
            "{} ({:.1} s, x{:.2}, {state})",
            self.current_tick, self.simulation_time, self.speed_multiplier
        )
    }
}
