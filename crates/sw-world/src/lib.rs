//! `sw-world`: static world geometry.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`entity`] | `ChargingStation`, `Obstacle`, `ObstacleKind`                |
//! | [`world`]  | `World` (nearest-station lookup), `WorldBuilder`, generation |
//! | [`loader`] | `load_world`, `load_world_reader` (JSON)                     |
//! | [`error`]  | `WorldError`, `WorldResult<T>`                               |
//!
//! The world is loaded (or generated) once at startup and never mutated
//! afterwards; snapshots share it behind an `Arc`.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on the public world types. |

pub mod entity;
pub mod error;
pub mod loader;
pub mod world;

#[cfg(test)]
mod tests;

pub use entity::{ChargingStation, Obstacle, ObstacleKind};
pub use error::{WorldError, WorldResult};
pub use loader::{load_world, load_world_reader};
pub use world::{World, WorldBuilder};
