//! Fluent builder for constructing `AgentStore` + `AgentRngs` in one step.
//!
//! # Usage
//!
//! ```rust
//! use sw_agent::AgentStoreBuilder;
//! use sw_core::WorldParams;
//!
//! let (store, rngs) = AgentStoreBuilder::new(100, /*seed=*/ 42)
//!     .world(WorldParams::default())
//!     .build();
//!
//! assert_eq!(store.len(), 100);
//! assert_eq!(rngs.len(),  100);
//! ```

use sw_core::WorldParams;

use crate::{AgentRngs, AgentStore};

/// Fluent builder for [`AgentStore`] + [`AgentRngs`].
pub struct AgentStoreBuilder {
    count: usize,
    seed:  u64,
    world: WorldParams,
}

impl AgentStoreBuilder {
    /// Create a builder for `count` agents using `seed` as the global RNG seed.
    pub fn new(count: usize, seed: u64) -> Self {
        Self { count, seed, world: WorldParams::default() }
    }

    /// Plane and height band new agents spawn into.
    pub fn world(mut self, world: WorldParams) -> Self {
        self.world = world;
        self
    }

    /// Spawn `count` randomized agents with ids `0..count`.
    pub fn build(self) -> (AgentStore, AgentRngs) {
        let mut store = AgentStore::default();
        let mut rngs = AgentRngs::empty(self.seed);
        store.resize(self.count, &mut rngs, &self.world);
        (store, rngs)
    }
}
