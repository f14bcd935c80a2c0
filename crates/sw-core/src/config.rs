//! Simulation configuration.
//!
//! `SimConfig` gathers every tunable constant of the simulation core.  It is
//! typically loaded from a JSON file by the application crate (with the
//! `serde` feature every group is `#[serde(default)]`, so a file only needs
//! to name the values it overrides) and handed to `SimBuilder`.

use crate::{SwarmError, SwarmResult};

// ── WorldParams ───────────────────────────────────────────────────────────────

/// Geometry of the bounded plane and its height band.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorldParams {
    /// Half-width of the square plane.  Agents reflect off `|x|, |y| > plane_radius`.
    pub plane_radius: f64,
    /// Lower edge of the height band.
    pub min_height: f64,
    /// Upper edge of the height band.
    pub max_height: f64,
    /// New agents spawn with `z` in `[min_height, spawn_height]`.
    pub spawn_height: f64,
    /// Fixed height of every charging station.
    pub station_height: f64,
}

impl Default for WorldParams {
    fn default() -> Self {
        Self {
            plane_radius:   100.0,
            min_height:     0.0,
            max_height:     20.0,
            spawn_height:   10.0,
            station_height: 0.0,
        }
    }
}

// ── MotionParams ──────────────────────────────────────────────────────────────

/// Stochastic walk and boundary behaviour.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MotionParams {
    /// Per-tick probability that a Moving agent's velocity is perturbed.
    pub perturb_probability: f64,
    /// Bound on each horizontal component of a perturbation.
    pub max_perturbation: f64,
    /// Magnitude kept after a boundary bounce; the component is multiplied by
    /// `-boundary_damping`.
    pub boundary_damping: f64,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            perturb_probability: 0.1,
            max_perturbation:    0.5,
            boundary_damping:    0.8,
        }
    }
}

// ── EnergyParams ──────────────────────────────────────────────────────────────

/// Energy thresholds and rate coefficients.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnergyParams {
    /// Moving → Charging at or below this level.
    pub low_threshold: f64,
    /// Charging → Moving at or above this level.
    pub high_threshold: f64,
    /// Scales `power_consumption_rate × dt` into energy units.
    pub drain_coefficient: f64,
    /// Scales `harvesting_rate × dt` into energy units.
    pub charge_coefficient: f64,
}

impl Default for EnergyParams {
    fn default() -> Self {
        Self {
            low_threshold:      0.2,
            high_threshold:     0.8,
            drain_coefficient:  0.0005,
            charge_coefficient: 0.002,
        }
    }
}

// ── LinkParams ────────────────────────────────────────────────────────────────

/// Proximity link formation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LinkParams {
    /// Pairs strictly closer than this (3-D) are link candidates.
    pub comm_range: f64,
    /// Independent per-candidate inclusion probability.
    pub link_probability: f64,
}

impl Default for LinkParams {
    fn default() -> Self {
        Self { comm_range: 20.0, link_probability: 0.1 }
    }
}

// ── TelemetryParams ───────────────────────────────────────────────────────────

/// Where the message counter and delivery rate come from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TelemetryMode {
    /// Random increments and a resampled delivery rate, decoupled from links.
    #[default]
    Cosmetic,
    /// Counted from the links actually formed each tick.
    Derived,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TelemetryParams {
    pub mode: TelemetryMode,
    /// Upper bound (inclusive) of the per-tick cosmetic message increment.
    pub max_message_burst: u64,
    /// Lower edge of the cosmetic delivery-rate band.
    pub delivery_rate_min: f64,
    /// Upper edge of the cosmetic delivery-rate band.
    pub delivery_rate_max: f64,
}

impl Default for TelemetryParams {
    fn default() -> Self {
        Self {
            mode:              TelemetryMode::Cosmetic,
            max_message_burst: 10,
            delivery_rate_min: 0.85,
            delivery_rate_max: 0.98,
        }
    }
}

// ── MissionParams ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MissionParams {
    /// Missions created on build and on every reset.
    pub initial_missions: usize,
    /// Upper bound of the per-second progress increment.
    pub progress_rate: f64,
    /// Per-tick probability of a new random mission.
    pub spawn_probability: f64,
    /// Random missions are only created below this many active missions.
    pub max_active: usize,
}

impl Default for MissionParams {
    fn default() -> Self {
        Self {
            initial_missions:  3,
            progress_rate:     0.6,
            spawn_probability: 0.002,
            max_active:        5,
        }
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Master RNG seed.  The same seed and the same command sequence always
    /// produce identical results.
    pub seed: u64,

    /// Population created by `SimBuilder::build`.
    pub initial_agents: usize,

    /// Largest population `set_agent_count` accepts.
    pub max_agents: usize,

    /// Frame rate the real-time driver paces to.
    pub target_fps: u32,

    /// Initial speed multiplier.
    pub speed_multiplier: f64,

    /// Fire `on_snapshot` every N ticks.  `0` disables snapshots.
    pub output_interval_ticks: u64,

    pub world:     WorldParams,
    pub motion:    MotionParams,
    pub energy:    EnergyParams,
    pub link:      LinkParams,
    pub telemetry: TelemetryParams,
    pub mission:   MissionParams,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed:                  42,
            initial_agents:        100,
            max_agents:            1_000,
            target_fps:            60,
            speed_multiplier:      1.0,
            output_interval_ticks: 60,
            world:                 WorldParams::default(),
            motion:                MotionParams::default(),
            energy:                EnergyParams::default(),
            link:                  LinkParams::default(),
            telemetry:             TelemetryParams::default(),
            mission:               MissionParams::default(),
        }
    }
}

impl SimConfig {
    /// Duration of one frame at `target_fps`, in milliseconds.
    #[inline]
    pub fn frame_ms(&self) -> f64 {
        1_000.0 / self.target_fps.max(1) as f64
    }

    /// Check internal consistency.
    ///
    /// # Errors
    /// `SwarmError::Config` naming the first offending field.
    pub fn validate(&self) -> SwarmResult<()> {
        fn probability(name: &str, p: f64) -> SwarmResult<()> {
            if (0.0..=1.0).contains(&p) {
                Ok(())
            } else {
                Err(SwarmError::Config(format!("{name} must be in [0, 1], got {p}")))
            }
        }
        fn positive(name: &str, v: f64) -> SwarmResult<()> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(SwarmError::Config(format!("{name} must be finite and > 0, got {v}")))
            }
        }
        fn finite(name: &str, v: f64) -> SwarmResult<()> {
            if v.is_finite() {
                Ok(())
            } else {
                Err(SwarmError::Config(format!("{name} must be finite, got {v}")))
            }
        }
        fn non_negative(name: &str, v: f64) -> SwarmResult<()> {
            if v.is_finite() && v >= 0.0 {
                Ok(())
            } else {
                Err(SwarmError::Config(format!("{name} must be finite and >= 0, got {v}")))
            }
        }

        if self.initial_agents > self.max_agents {
            return Err(SwarmError::Config(format!(
                "initial_agents {} exceeds max_agents {}",
                self.initial_agents, self.max_agents
            )));
        }
        non_negative("speed_multiplier", self.speed_multiplier)?;

        let w = &self.world;
        positive("world.plane_radius", w.plane_radius)?;
        finite("world.min_height", w.min_height)?;
        finite("world.max_height", w.max_height)?;
        finite("world.spawn_height", w.spawn_height)?;
        finite("world.station_height", w.station_height)?;
        if !(w.min_height <= w.spawn_height && w.spawn_height <= w.max_height) {
            return Err(SwarmError::Config(format!(
                "height band must satisfy min <= spawn <= max, got {} / {} / {}",
                w.min_height, w.spawn_height, w.max_height
            )));
        }

        probability("motion.perturb_probability", self.motion.perturb_probability)?;
        non_negative("motion.max_perturbation", self.motion.max_perturbation)?;
        probability("motion.boundary_damping", self.motion.boundary_damping)?;

        let e = &self.energy;
        probability("energy.low_threshold", e.low_threshold)?;
        probability("energy.high_threshold", e.high_threshold)?;
        if e.low_threshold >= e.high_threshold {
            return Err(SwarmError::Config(format!(
                "energy.low_threshold {} must be below high_threshold {}",
                e.low_threshold, e.high_threshold
            )));
        }
        non_negative("energy.drain_coefficient", e.drain_coefficient)?;
        non_negative("energy.charge_coefficient", e.charge_coefficient)?;

        positive("link.comm_range", self.link.comm_range)?;
        probability("link.link_probability", self.link.link_probability)?;

        let t = &self.telemetry;
        probability("telemetry.delivery_rate_min", t.delivery_rate_min)?;
        probability("telemetry.delivery_rate_max", t.delivery_rate_max)?;
        if t.delivery_rate_min > t.delivery_rate_max {
            return Err(SwarmError::Config(
                "telemetry.delivery_rate_min exceeds delivery_rate_max".into(),
            ));
        }

        non_negative("mission.progress_rate", self.mission.progress_rate)?;
        probability("mission.spawn_probability", self.mission.spawn_probability)?;

        Ok(())
    }
}
