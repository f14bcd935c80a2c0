//! `sw-link`: ephemeral proximity links between agents.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                      |
//! |-------------|---------------------------------------------------------------|
//! | [`link`]    | `Link` (normalised pair), `LinkSet` (one tick's links)        |
//! | [`index`]   | `ProximityIndex` trait, `BruteForceIndex`, `IndexKind`        |
//! | [`grid`]    | `UniformGridIndex`: hash grid with `comm_range` cells         |
//! | [`rtree`]   | `RTreeIndex`: `rstar` radius queries                          |
//! | [`builder`] | `ProximityLinkBuilder`: candidates + per-pair random draw     |
//! | [`error`]   | `LinkError`, `LinkResult<T>`                                  |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `parallel` | Brute-force scan on Rayon's pool.                          |
//! | `fx-hash`  | `FxHashMap` for grid buckets.                              |
//! | `serde`    | Derives `Serialize`/`Deserialize` on `Link` and `LinkSet`. |

pub mod builder;
pub mod error;
pub mod grid;
pub mod index;
pub mod link;
pub mod rtree;

#[cfg(test)]
mod tests;

pub use builder::ProximityLinkBuilder;
pub use error::{LinkError, LinkResult};
pub use grid::UniformGridIndex;
pub use index::{BruteForceIndex, IndexKind, ProximityIndex};
pub use link::{Link, LinkSet};
pub use rtree::RTreeIndex;
