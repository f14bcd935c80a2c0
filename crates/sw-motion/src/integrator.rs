//! Per-tick kinematic and energy update.

use sw_agent::{Agent, AgentState};
use sw_core::{AgentRng, EnergyParams, MotionParams, SimConfig, WorldParams};

use crate::MotionPolicy;

/// Applies one tick of motion and energy change to a single agent.
///
/// | State    | Effect                                                        |
/// |----------|---------------------------------------------------------------|
/// | Moving   | steer, reflect, integrate, clamp height, accumulate distance, drain |
/// | Charging | recharge in place                                             |
/// | Idle     | nothing                                                       |
/// | Failed   | nothing                                                       |
///
/// `energy.current` is clamped to `[0, 1]` after every update.
#[derive(Clone, Debug)]
pub struct MotionIntegrator {
    pub world:  WorldParams,
    pub motion: MotionParams,
    pub energy: EnergyParams,
}

impl MotionIntegrator {
    pub fn new(world: WorldParams, motion: MotionParams, energy: EnergyParams) -> Self {
        Self { world, motion, energy }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.world.clone(), config.motion.clone(), config.energy.clone())
    }

    /// Advance `agent` by `dt` scaled seconds.
    ///
    /// `docking` marks a Moving agent that is about to switch to Charging this
    /// tick; it holds position and does not drain.
    pub fn integrate<P: MotionPolicy + ?Sized>(
        &self,
        agent:   &mut Agent,
        rng:     &mut AgentRng,
        policy:  &P,
        dt:      f64,
        docking: bool,
    ) {
        match agent.state {
            AgentState::Failed | AgentState::Idle => return,
            AgentState::Charging => {
                agent.energy.current +=
                    agent.energy.harvesting_rate * dt * self.energy.charge_coefficient;
            }
            AgentState::Moving if docking => return,
            AgentState::Moving => self.advance_moving(agent, rng, policy, dt),
        }
        agent.energy.clamp();
    }

    fn advance_moving<P: MotionPolicy + ?Sized>(
        &self,
        agent:  &mut Agent,
        rng:    &mut AgentRng,
        policy: &P,
        dt:     f64,
    ) {
        let nudge = policy.steer(agent, rng);
        agent.velocity += nudge;

        let r = self.world.plane_radius;
        let damping = self.motion.boundary_damping;
        let (p, v) = (&agent.position, &mut agent.velocity);
        // Turn back only while still heading outward.
        if p.x.abs() > r && p.x * v.x > 0.0 {
            v.x *= -damping;
        }
        if p.y.abs() > r && p.y * v.y > 0.0 {
            v.y *= -damping;
        }

        let before = agent.position;
        agent.position += agent.velocity * dt;

        let z = agent.position.z;
        if z < self.world.min_height {
            agent.position.z = self.world.min_height;
            agent.velocity.z = agent.velocity.z.abs();
        } else if z > self.world.max_height {
            agent.position.z = self.world.max_height;
            agent.velocity.z = -agent.velocity.z.abs();
        }

        agent.performance.distance_traveled += before.planar_distance(agent.position);
        agent.energy.current -=
            agent.energy.power_consumption_rate * dt * self.energy.drain_coefficient;
    }
}
