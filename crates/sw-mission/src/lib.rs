//! `sw-mission`: mission list and progress model.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                      |
//! |-------------|---------------------------------------------------------------|
//! | [`mission`] | `Mission`, `MissionKind`, `MissionStatus`, `TargetArea`       |
//! | [`board`]   | `MissionBoard` (seeding, per-tick progress, spawns), `MissionTally` |
//! | [`loader`]  | `load_missions_csv`, `load_missions_reader`                   |
//! | [`error`]   | `MissionError`, `MissionResult<T>`                            |
//!
//! Missions are bookkeeping only: assigned agents are not steered toward the
//! target area, and progress is a random walk toward 1.

pub mod board;
pub mod error;
pub mod loader;
pub mod mission;


pub use board::{MissionBoard, MissionTally};
pub use error::{MissionError, MissionResult};
pub use loader::{load_missions_csv, load_missions_reader};
pub use mission::{Mission, MissionKind, MissionStatus, TargetArea};
