//! The `Agent` record and its sub-states.

use sw_core::{AgentId, AgentRng, StationId, SwarmError, SwarmResult, Vec3, WorldParams};

// ── AgentState ────────────────────────────────────────────────────────────────

/// Exactly one state is active per agent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AgentState {
    /// Wandering; drains energy.
    #[default]
    Moving,
    /// Holding position; no motion and no energy change.
    Idle,
    /// Docked; regains energy in place.
    Charging,
    /// Frozen until an operator changes the state or the simulation resets.
    Failed,
}

impl AgentState {
    pub fn as_str(self) -> &'static str {
        match self {
            AgentState::Moving   => "moving",
            AgentState::Idle     => "idle",
            AgentState::Charging => "charging",
            AgentState::Failed   => "failed",
        }
    }
}

impl std::fmt::Display for AgentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Sub-records ───────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnergyState {
    /// State of charge in `[0, 1]`.
    pub current: f64,
    /// Drain rate while Moving.  Always `> 0`.
    pub power_consumption_rate: f64,
    /// Recharge rate while Charging.  Always `> 0`.
    pub harvesting_rate: f64,
}

impl EnergyState {
    /// Pull `current` back into `[0, 1]`.  NaN collapses to 0.
    #[inline]
    pub fn clamp(&mut self) {
        self.current = if self.current.is_nan() { 0.0 } else { self.current.clamp(0.0, 1.0) };
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MissionCounters {
    pub assigned_tasks: u32,
    pub completed_tasks: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Performance {
    /// Horizontal path length accumulated while Moving.
    pub distance_traveled: f64,
    /// Links this agent took part in, summed over ticks.
    pub communications_count: u64,
}

// ── Agent ─────────────────────────────────────────────────────────────────────

/// One simulated unit.
///
/// Owned by `AgentStore`; external readers only ever see clones.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    pub id: AgentId,
    pub position: Vec3,
    pub velocity: Vec3,
    pub state: AgentState,
    pub energy: EnergyState,
    pub mission: MissionCounters,
    pub performance: Performance,
    /// Station picked when the agent last started charging.
    pub docked_station: Option<StationId>,
}

impl Agent {
    /// A freshly randomized Moving agent.
    ///
    /// Position is uniform over the plane with `z` in
    /// `[min_height, spawn_height]`; energy starts in `[0.3, 1.0]`.
    pub fn spawn(id: AgentId, rng: &mut AgentRng, world: &WorldParams) -> Agent {
        let r = world.plane_radius;
        let position = Vec3::new(
            rng.gen_range(-r..=r),
            rng.gen_range(-r..=r),
            rng.gen_range(world.min_height..=world.spawn_height),
        );
        let velocity = Vec3::new(
            rng.gen_range(-2.0..=2.0),
            rng.gen_range(-2.0..=2.0),
            rng.gen_range(-0.5..=0.5),
        );
        let energy = EnergyState {
            current:                rng.gen_range(0.3..=1.0),
            power_consumption_rate: rng.gen_range(10.0..=50.0),
            harvesting_rate:        rng.gen_range(5.0..=25.0),
        };
        let mission = MissionCounters {
            completed_tasks: rng.gen_range(0..=10),
            assigned_tasks:  rng.gen_range(0..=3),
        };

        Agent {
            id,
            position,
            velocity,
            state: AgentState::Moving,
            energy,
            mission,
            performance: Performance::default(),
            docked_station: None,
        }
    }

    #[inline]
    pub fn is_failed(&self) -> bool {
        self.state == AgentState::Failed
    }

    /// `true` for every state except `Failed`.
    #[inline]
    pub fn is_active(&self) -> bool {
        !self.is_failed()
    }

    /// Operator override of the state of charge, clamped to `[0, 1]`.
    ///
    /// # Errors
    /// `AgentFailed` if the agent is frozen; `InvalidArgument` for NaN.
    pub fn set_energy(&mut self, energy: f64) -> SwarmResult<()> {
        self.ensure_mutable()?;
        if energy.is_nan() {
            return Err(SwarmError::InvalidArgument("energy must not be NaN".into()));
        }
        self.energy.current = energy;
        self.energy.clamp();
        Ok(())
    }

    /// Operator teleport.
    ///
    /// # Errors
    /// `AgentFailed` if the agent is frozen; `InvalidArgument` for a
    /// non-finite position.
    pub fn set_position(&mut self, position: Vec3) -> SwarmResult<()> {
        self.ensure_mutable()?;
        if !position.is_finite() {
            return Err(SwarmError::InvalidArgument(format!("non-finite position {position}")));
        }
        self.position = position;
        Ok(())
    }

    /// Force a state.  Allowed even for Failed agents: the state is the one
    /// field a frozen agent may change.  Leaving Charging undocks the agent.
    pub fn set_state(&mut self, state: AgentState) {
        if state != AgentState::Charging {
            self.docked_station = None;
        }
        self.state = state;
    }

    fn ensure_mutable(&self) -> SwarmResult<()> {
        if self.is_failed() {
            Err(SwarmError::AgentFailed(self.id))
        } else {
            Ok(())
        }
    }
}
