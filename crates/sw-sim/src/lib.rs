//! `sw-sim`: simulation controller for the swarm workspace.
//!
//! # Tick loop
//!
//! ```text
//! step(delta_ms):
//!   ① Commands : drain the queue in FIFO order (even while paused).
//!   ② Motion   : MotionIntegrator per agent, ascending id.
//!   ③ Energy   : EnergyStateMachine: Moving ⇄ Charging.
//!   ④ Links    : ProximityLinkBuilder rebuilds the link set from scratch.
//!   ⑤ Missions : progress, spontaneous spawns.
//!   ⑥ Telemetry: message counter and delivery rate.
//!   ⑦ Clock    : tick += 1, simulation_time += scaled delta.
//! ```
//!
//! ②–⑦ only run while the clock is Running.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Brute-force link scan on Rayon's thread pool.          |
//! | `fx-hash`  | FxHash buckets in the uniform grid index.              |
//! | `serde`    | Serde derives on agents, metrics, world, missions.     |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use sw_core::SimConfig;
//! use sw_link::BruteForceIndex;
//! use sw_motion::RandomWalk;
//! use sw_sim::{FrameDriver, ManualTimeSource, NoopObserver, SimBuilder};
//!
//! let config = SimConfig::default();
//! let mut sim = SimBuilder::new(config, RandomWalk::default(), BruteForceIndex).build()?;
//! sim.set_running(true);
//! let mut driver = FrameDriver::new(ManualTimeSource::new(), sim.config.target_fps);
//! driver.run_frames(600, &mut sim, &mut NoopObserver);
//! println!("{:?}", sim.metrics());
//! ```

pub mod builder;
pub mod command;
pub mod driver;
pub mod error;
pub mod observer;
pub mod sim;
pub mod snapshot;


pub use builder::SimBuilder;
pub use command::{Command, CommandSender, DEFAULT_COMMAND_CAPACITY};
pub use driver::{FrameDriver, ManualTimeSource, MonotonicTimeSource, TimeSource};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, TickSummary};
pub use sim::{Sim, StepOutcome};
pub use snapshot::{AgentDetail, Snapshot};
