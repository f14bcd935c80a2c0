//! Fluent builder for constructing a [`Sim`].

use std::sync::Arc;
use std::sync::mpsc;

use sw_agent::AgentStoreBuilder;
use sw_core::{SimConfig, SimRng, SimulationClock};
use sw_link::{LinkSet, ProximityIndex, ProximityLinkBuilder};
use sw_metrics::MetricsAggregator;
use sw_mission::{Mission, MissionBoard};
use sw_motion::{EnergyStateMachine, MotionIntegrator, MotionPolicy};
use sw_world::World;
use tracing::info;

use crate::command::DEFAULT_COMMAND_CAPACITY;
use crate::sim::Streams;
use crate::{Sim, SimError, SimResult};

// Child-stream offsets.  Fixed so that each subsystem's draws depend only on
// the master seed.
const WORLD_STREAM:     u64 = 1;
const LINK_STREAM:      u64 = 2;
const TELEMETRY_STREAM: u64 = 3;
const MISSION_STREAM:   u64 = 4;

/// Fluent builder for [`Sim<P, I>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: seed, population, every tunable constant
/// - `P: MotionPolicy`: steering (e.g. [`sw_motion::RandomWalk`])
/// - `I: ProximityIndex`: link candidate search (e.g. [`sw_link::BruteForceIndex`])
///
/// # Optional inputs (have defaults)
///
/// | Method                 | Default                                    |
/// |------------------------|--------------------------------------------|
/// | `.world(w)`            | Randomly generated from the seed           |
/// | `.missions(v)`         | `mission.initial_missions` random missions |
/// | `.command_capacity(n)` | [`DEFAULT_COMMAND_CAPACITY`]               |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, RandomWalk::default(), BruteForceIndex)
///     .world(load_world(&path, &config.world)?)
///     .build()?;
/// sim.set_running(true);
/// sim.step(16.7);
/// ```
pub struct SimBuilder<P: MotionPolicy, I: ProximityIndex> {
    config:           SimConfig,
    policy:           P,
    index:            I,
    world:            Option<World>,
    missions:         Option<Vec<Mission>>,
    command_capacity: usize,
}

impl<P: MotionPolicy, I: ProximityIndex> SimBuilder<P, I> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, policy: P, index: I) -> Self {
        Self {
            config,
            policy,
            index,
            world: None,
            missions: None,
            command_capacity: DEFAULT_COMMAND_CAPACITY,
        }
    }

    /// Use a loaded world instead of generating one.
    pub fn world(mut self, world: World) -> Self {
        self.world = Some(world);
        self
    }

    /// Start from these missions, and restore them on every reset.
    pub fn missions(mut self, missions: Vec<Mission>) -> Self {
        self.missions = Some(missions);
        self
    }

    /// Bound the command queue at `capacity` pending commands (at least 1).
    pub fn command_capacity(mut self, capacity: usize) -> Self {
        self.command_capacity = capacity.max(1);
        self
    }

    /// Validate the config, spawn the population, and return a paused
    /// [`Sim`].
    pub fn build(self) -> SimResult<Sim<P, I>> {
        let config = self.config;
        config.validate().map_err(|e| SimError::Config(e.to_string()))?;

        let mut root = SimRng::new(config.seed);
        let mut world_rng = root.child(WORLD_STREAM);
        let streams = Streams {
            link:      root.child(LINK_STREAM),
            telemetry: root.child(TELEMETRY_STREAM),
            mission:   root.child(MISSION_STREAM),
        };

        let world = match self.world {
            Some(w) => w,
            None => World::generate(&mut world_rng, &config.world, config.initial_agents),
        };

        let (agents, rngs) = AgentStoreBuilder::new(config.initial_agents, config.seed)
            .world(config.world.clone())
            .build();

        let mut missions = MissionBoard::new(config.mission.clone(), config.world.plane_radius);
        if let Some(preset) = self.missions {
            missions = missions.with_preset(preset);
        }

        let (sender, commands) = mpsc::sync_channel(self.command_capacity);
        let mut sim = Sim {
            clock:      SimulationClock::new(config.speed_multiplier),
            agents,
            rngs,
            world:      Arc::new(world),
            missions,
            policy:     self.policy,
            integrator: MotionIntegrator::from_config(&config),
            energy:     EnergyStateMachine::from_params(&config.energy),
            linker:     ProximityLinkBuilder::new(self.index, &config.link),
            links:      LinkSet::default(),
            telemetry:  MetricsAggregator::new(config.telemetry.clone()),
            streams,
            commands,
            sender,
            config,
        };
        let n = sim.agents.len();
        sim.missions.reset(&mut sim.streams.mission, n);

        info!(
            agents    = n,
            stations  = sim.world.station_count(),
            obstacles = sim.world.obstacle_count(),
            missions  = sim.missions.len(),
            index     = sim.linker.index.name(),
            seed      = sim.config.seed,
            "simulation built"
        );
        Ok(sim)
    }
}
