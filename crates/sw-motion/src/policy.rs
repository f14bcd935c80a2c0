//! The `MotionPolicy` trait and the built-in policies.

use sw_agent::Agent;
use sw_core::{AgentRng, MotionParams, Vec3};

/// Pluggable steering for Moving agents.
///
/// Called once per Moving agent per tick, before boundary reflection and
/// integration.  The returned vector is added to the agent's velocity; return
/// [`Vec3::ZERO`] to leave it untouched.
///
/// Policies only steer.  Energy, boundary handling, and state transitions
/// stay with [`MotionIntegrator`](crate::MotionIntegrator) and
/// [`EnergyStateMachine`](crate::EnergyStateMachine), so any policy keeps the
/// same energy contract.
///
/// All randomness must come from the supplied per-agent `rng`.
pub trait MotionPolicy: Send + Sync + 'static {
    fn steer(&self, agent: &Agent, rng: &mut AgentRng) -> Vec3;
}

impl MotionPolicy for Box<dyn MotionPolicy> {
    fn steer(&self, agent: &Agent, rng: &mut AgentRng) -> Vec3 {
        (**self).steer(agent, rng)
    }
}

// ── RandomWalk ────────────────────────────────────────────────────────────────

/// Undirected wandering: with probability `probability` per tick, nudge the
/// horizontal velocity by a uniform delta in `[-max_delta, max_delta]` on
/// each axis.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomWalk {
    pub probability: f64,
    pub max_delta:   f64,
}

impl RandomWalk {
    pub fn new(probability: f64, max_delta: f64) -> Self {
        Self { probability, max_delta: max_delta.abs() }
    }

    pub fn from_params(params: &MotionParams) -> Self {
        Self::new(params.perturb_probability, params.max_perturbation)
    }
}

impl Default for RandomWalk {
    fn default() -> Self {
        Self::from_params(&MotionParams::default())
    }
}

impl MotionPolicy for RandomWalk {
    fn steer(&self, _agent: &Agent, rng: &mut AgentRng) -> Vec3 {
        if !rng.gen_bool(self.probability) {
            return Vec3::ZERO;
        }
        let m = self.max_delta;
        Vec3::new(rng.gen_range(-m..=m), rng.gen_range(-m..=m), 0.0)
    }
}

// ── HoldCourse ────────────────────────────────────────────────────────────────

/// Never steers: agents keep their velocity until a boundary turns them.
///
/// Useful in tests where trajectories must be computed by hand.
pub struct HoldCourse;

impl MotionPolicy for HoldCourse {
    fn steer(&self, _agent: &Agent, _rng: &mut AgentRng) -> Vec3 {
        Vec3::ZERO
    }
}
