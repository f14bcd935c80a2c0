//! `sw-core`: foundational types for the swarm simulation workspace.
//!
//! This crate is a dependency of every other `sw-*` crate.  It has no `sw-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `StationId`, `ObstacleId`, `MissionId`         |
//! | [`geo`]         | `Vec3`, planar and 3-D distance                           |
//! | [`time`]        | `Tick`, `ClockState`, `SimulationClock`                   |
//! | [`config`]      | `SimConfig` and its nested parameter groups               |
//! | [`rng`]         | `AgentRng` (per-agent), `SimRng` (global)                 |
//! | [`error`]       | `SwarmError`, `SwarmResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required for loading `SimConfig` from JSON.                |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{
    EnergyParams, LinkParams, MissionParams, MotionParams, SimConfig, TelemetryMode,
    TelemetryParams, WorldParams,
};
pub use error::{SwarmError, SwarmResult};
pub use geo::Vec3;
pub use ids::{AgentId, MissionId, ObstacleId, StationId};
pub use rng::{AgentRng, SimRng};
pub use time::{ClockState, SimulationClock, Tick};
