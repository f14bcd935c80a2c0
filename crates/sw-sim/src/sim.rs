//! The `Sim` struct and its tick loop.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, SyncSender};

use sw_agent::{AgentRngs, AgentState, AgentStore};
use sw_core::{AgentId, MissionId, SimConfig, SimRng, SimulationClock, Tick, Vec3};
use sw_link::{BruteForceIndex, LinkSet, ProximityIndex, ProximityLinkBuilder};
use sw_metrics::{MetricsAggregator, SimulationMetrics};
use sw_mission::{MissionBoard, MissionKind};
use sw_motion::{EnergyStateMachine, MotionIntegrator, MotionPolicy, RandomWalk};
use sw_world::World;
use tracing::{info, trace, warn};

use crate::{
    AgentDetail, Command, CommandSender, NoopObserver, SimError, SimObserver, SimResult, Snapshot,
    TickSummary,
};

// ── RNG streams ───────────────────────────────────────────────────────────────

/// One independent stream per global subsystem, derived from the master seed.
pub(crate) struct Streams {
    pub link:      SimRng,
    pub telemetry: SimRng,
    pub mission:   SimRng,
}

// ── StepOutcome ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum StepOutcome {
    /// The clock is paused; only queued commands were applied.
    Paused,
    Ticked(TickSummary),
}

impl StepOutcome {
    pub fn ticked(&self) -> bool {
        matches!(self, StepOutcome::Ticked(_))
    }
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The simulation controller.
///
/// `Sim<P, I>` owns all mutable state and advances it one tick per
/// [`step`](Self::step):
///
/// 1. **Commands**: drain the command queue (also while paused).
/// 2. **Motion**: [`MotionIntegrator`] for every agent in id order.  Agents
///    about to dock hold still.
/// 3. **Energy**: [`EnergyStateMachine`] transitions.
/// 4. **Links**: rebuild the link set from scratch; bump each endpoint's
///    `communications_count`.
/// 5. **Missions and telemetry**: mission progress, message counters.
/// 6. **Clock**: advance tick and simulated time.
///
/// Steps 2 to 6 only run while the clock is Running.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<P: MotionPolicy = RandomWalk, I: ProximityIndex = BruteForceIndex> {
    pub config: SimConfig,

    /// Run state, speed multiplier, tick counter, simulated time.
    pub clock: SimulationClock,

    /// Live agents, ascending id.
    pub agents: AgentStore,

    /// Per-agent deterministic RNGs, separated for the split-borrow pattern.
    pub rngs: AgentRngs,

    /// Stations and obstacles.  Immutable; shared with snapshots.
    pub world: Arc<World>,

    pub missions: MissionBoard,

    /// Steering for Moving agents.
    pub policy: P,

    pub integrator: MotionIntegrator,
    pub energy:     EnergyStateMachine,
    pub linker:     ProximityLinkBuilder<I>,

    /// Links formed by the last completed tick.
    pub links: LinkSet,

    pub telemetry: MetricsAggregator,

    pub(crate) streams:  Streams,
    pub(crate) commands: Receiver<Command>,
    pub(crate) sender:   SyncSender<Command>,
}

impl<P: MotionPolicy, I: ProximityIndex> Sim<P, I> {
    // ── Stepping ──────────────────────────────────────────────────────────

    /// Advance by one frame of `delta_ms` wall-clock milliseconds.
    pub fn step(&mut self, delta_ms: f64) -> StepOutcome {
        self.step_observed(delta_ms, &mut NoopObserver)
    }

    /// Like [`step`](Self::step), reporting to `observer`.
    pub fn step_observed<O: SimObserver>(&mut self, delta_ms: f64, observer: &mut O) -> StepOutcome {
        self.drain_commands(observer);
        if !self.clock.is_running() {
            return StepOutcome::Paused;
        }

        if !(delta_ms.is_finite() && delta_ms >= 0.0) {
            warn!(delta_ms, "degenerate frame delta treated as zero");
        }
        let dt = self.clock.scaled_delta_secs(delta_ms);
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        self.move_agents(dt);
        let transitions = self.apply_transitions(now, observer);
        self.rebuild_links();

        let completed = self.missions.advance(dt, &mut self.streams.mission, self.agents.len());
        self.telemetry.record_tick(&self.links, &mut self.streams.telemetry);
        self.clock.advance(dt);

        let summary = TickSummary {
            tick:               now,
            dt,
            transitions,
            candidates:         self.links.candidates,
            missions_completed: completed.len(),
            metrics:            self.metrics(),
        };
        trace!(
            tick = now.0,
            dt,
            links = summary.metrics.communication.active_links,
            transitions,
            "tick complete"
        );
        observer.on_tick_end(&summary);

        let interval = self.config.output_interval_ticks;
        if interval > 0 && self.clock.current_tick.0.is_multiple_of(interval) {
            observer.on_snapshot(&self.get_snapshot());
        }

        StepOutcome::Ticked(summary)
    }

    fn move_agents(&mut self, dt: f64) {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let world      = &*self.world;
        let policy     = &self.policy;
        let integrator = &self.integrator;
        let energy     = &self.energy;

        for (agent, rng) in self.agents.iter_mut_with(&mut self.rngs) {
            let docking = energy.should_dock(agent, world);
            integrator.integrate(agent, rng, policy, dt, docking);
        }
    }

    fn apply_transitions<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> usize {
        let mut count = 0;
        for agent in self.agents.iter_mut() {
            if let Some(t) = self.energy.update(agent, &self.world) {
                observer.on_transition(now, agent.id, t);
                count += 1;
            }
        }
        count
    }

    fn rebuild_links(&mut self) {
        self.links = self.linker.rebuild(self.agents.as_slice(), &mut self.streams.link);
        for link in &self.links.links {
            for id in [link.a, link.b] {
                if let Some(agent) = self.agents.get_mut(id) {
                    agent.performance.communications_count += 1;
                }
            }
        }
    }

    // ── Commands ──────────────────────────────────────────────────────────

    /// A handle other threads can use to queue commands.
    pub fn command_sender(&self) -> CommandSender {
        CommandSender::new(self.sender.clone())
    }

    fn drain_commands<O: SimObserver>(&mut self, observer: &mut O) {
        // Snapshot the queue first: commands sent while draining wait for
        // the next tick.
        let pending: Vec<Command> = self.commands.try_iter().collect();
        for command in pending {
            match self.apply_command(&command) {
                Ok(()) => {
                    if command == Command::Reset {
                        observer.on_reset();
                    }
                }
                Err(e) => {
                    warn!(?command, error = %e, "queued command rejected");
                    observer.on_command_rejected(&command, &e);
                }
            }
        }
    }

    /// Apply one command immediately.
    pub fn apply_command(&mut self, command: &Command) -> SimResult<()> {
        match *command {
            Command::SetRunning(running) => {
                self.set_running(running);
                Ok(())
            }
            Command::Reset => {
                self.reset();
                Ok(())
            }
            Command::SetSpeed(m)        => self.set_speed(m),
            Command::SetAgentCount(n)   => self.set_agent_count(n),
            Command::ModifyAgent { id, energy, position } => self.modify_agent(id, energy, position),
            Command::SetAgentState { id, state } => self.set_agent_state(id, state),
            Command::CreateMission { x, y, kind } => self.create_mission(x, y, kind).map(|_| ()),
        }
    }

    // ── Control plane ─────────────────────────────────────────────────────

    pub fn set_running(&mut self, running: bool) {
        if running != self.clock.is_running() {
            info!(running, tick = self.clock.current_tick.0, "run state changed");
        }
        self.clock.set_running(running);
    }

    /// Re-randomize every agent, rewind the clock, and pause.
    ///
    /// Keeps the world, the population size, and the speed multiplier.
    /// Missions are re-seeded and telemetry counters zeroed.
    pub fn reset(&mut self) {
        self.clock.reset();
        self.agents.respawn_all(&mut self.rngs, &self.config.world);
        self.links.clear();
        self.telemetry.reset();
        self.missions.reset(&mut self.streams.mission, self.agents.len());
        info!(agents = self.agents.len(), "simulation reset");
    }

    /// # Errors
    /// `InvalidArgument` for negative or non-finite multipliers.
    pub fn set_speed(&mut self, multiplier: f64) -> SimResult<()> {
        self.clock.set_speed(multiplier)?;
        info!(multiplier, "speed changed");
        Ok(())
    }

    /// Grow or shrink the population to exactly `n`.
    ///
    /// New agents take ascending ids after the current maximum; removal takes
    /// the highest ids.  Links and mission assignments of removed agents are
    /// dropped.
    ///
    /// # Errors
    /// `InvalidArgument` if `n < 0` or `n > config.max_agents`.  Nothing
    /// changes in that case.
    pub fn set_agent_count(&mut self, n: i64) -> SimResult<()> {
        let target = usize::try_from(n)
            .map_err(|_| SimError::InvalidArgument(format!("agent count must be >= 0, got {n}")))?;
        if target > self.config.max_agents {
            return Err(SimError::InvalidArgument(format!(
                "agent count {target} exceeds max_agents {}",
                self.config.max_agents
            )));
        }

        let before = self.agents.len();
        let removed = self.agents.resize(target, &mut self.rngs, &self.config.world);
        if !removed.is_empty() {
            let agents = &self.agents;
            self.links.retain_agents(|id| agents.contains(id));
        }
        self.missions.prune_agents(target);
        info!(from = before, to = target, "agent count changed");
        Ok(())
    }

    /// Operator edit of an agent's energy and/or position.  Energy is clamped
    /// to `[0, 1]`.  Either both edits apply or neither does.
    ///
    /// # Errors
    /// `AgentNotFound`, `AgentFailed`, or `InvalidArgument` (NaN energy,
    /// non-finite position).
    pub fn modify_agent(
        &mut self,
        id:       AgentId,
        energy:   Option<f64>,
        position: Option<Vec3>,
    ) -> SimResult<()> {
        let agent = self.agents.get_mut(id).ok_or(SimError::AgentNotFound(id))?;
        let mut edited = agent.clone();
        if let Some(e) = energy {
            edited.set_energy(e)?;
        }
        if let Some(p) = position {
            edited.set_position(p)?;
        }
        *agent = edited;
        Ok(())
    }

    /// Force an agent into `state`.  Works on Failed agents too, which is how
    /// an operator revives one.  Forcing Charging docks at the nearest
    /// station, if any.
    ///
    /// # Errors
    /// `AgentNotFound`.
    pub fn set_agent_state(&mut self, id: AgentId, state: AgentState) -> SimResult<()> {
        let agent = self.agents.get_mut(id).ok_or(SimError::AgentNotFound(id))?;
        agent.set_state(state);
        if state == AgentState::Charging {
            agent.docked_station = self.world.nearest_station(agent.position).map(|(s, _)| s.id);
        }
        info!(agent = %id, %state, "agent state forced");
        Ok(())
    }

    /// Place a mission centred on `(x, y)`.
    ///
    /// # Errors
    /// `InvalidArgument` for non-finite coordinates.
    pub fn create_mission(&mut self, x: f64, y: f64, kind: MissionKind) -> SimResult<MissionId> {
        if !(x.is_finite() && y.is_finite()) {
            return Err(SimError::InvalidArgument(format!("mission center ({x}, {y}) is not finite")));
        }
        let id = self.missions.create_at(x, y, kind, &mut self.streams.mission, self.agents.len());
        info!(mission = %id, %kind, x, y, "mission created");
        Ok(id)
    }

    // ── Read accessors ────────────────────────────────────────────────────

    /// Current metrics, derived from the live state.
    pub fn metrics(&self) -> SimulationMetrics {
        self.telemetry.summarize(
            self.agents.as_slice(),
            self.missions.tally(),
            &self.links,
            &self.clock,
        )
    }

    /// An owned copy of all agents, links, metrics, and active missions.
    pub fn get_snapshot(&self) -> Snapshot {
        Snapshot {
            tick:             self.clock.current_tick,
            simulation_time:  self.clock.simulation_time,
            clock_state:      self.clock.state,
            speed_multiplier: self.clock.speed_multiplier,
            agents:           self.agents.as_slice().to_vec(),
            links:            self.links.links.clone(),
            metrics:          self.metrics(),
            active_missions:  self.missions.active().cloned().collect(),
            world:            Arc::clone(&self.world),
        }
    }

    /// Inspector detail for one agent.
    ///
    /// # Errors
    /// `AgentNotFound` for an unknown id.
    pub fn select_agent(&self, id: AgentId) -> SimResult<AgentDetail> {
        let agent = self.agents.get(id).ok_or(SimError::AgentNotFound(id))?;
        Ok(AgentDetail {
            agent:           agent.clone(),
            link_partners:   self.links.partners_of(id),
            nearest_station: self.world.nearest_station(agent.position).map(|(s, d)| (s.id, d)),
            missions:        self.missions.missions_for(id),
        })
    }
}

