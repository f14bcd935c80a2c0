//! `sw-motion`: per-tick agent motion and energy transitions.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`policy`]     | `MotionPolicy` trait, `RandomWalk`, `HoldCourse`           |
//! | [`integrator`] | `MotionIntegrator`: position, velocity, energy per tick    |
//! | [`energy`]     | `EnergyStateMachine`, `Transition`                         |
//!
//! # Ordering
//!
//! sw-sim runs the two phases back to back for every agent in id order:
//!
//! 1. `MotionIntegrator::integrate`, passing `docking =
//!    EnergyStateMachine::should_dock(..)` so an agent about to dock holds
//!    still;
//! 2. `EnergyStateMachine::update`.

pub mod energy;
pub mod integrator;
pub mod policy;


pub use energy::{EnergyStateMachine, Transition, apply};
pub use integrator::MotionIntegrator;
pub use policy::{HoldCourse, MotionPolicy, RandomWalk};
