//! Population storage: `AgentStore` (agent records) and `AgentRngs`
//! (per-agent RNG).
//!
//! # Why two structs?
//!
//! The motion pass needs `&mut Agent` and `&mut AgentRng` for the same agent
//! while snapshots clone `AgentStore` wholesale.  Keeping the RNGs in a
//! separate, index-aligned `AgentRngs` keeps them out of snapshots and lets
//! both be borrowed mutably at once:
//!
//! ```ignore
//! for (agent, rng) in store.iter_mut_with(&mut rngs) {
//!     integrator.integrate(agent, rng, &policy, dt, hold);
//! }
//! ```

use sw_core::{AgentId, AgentRng, WorldParams};

use crate::Agent;

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG state, index-aligned with [`AgentStore`].
pub struct AgentRngs {
    pub inner: Vec<AgentRng>,
    seed: u64,
}

impl AgentRngs {
    pub(crate) fn empty(global_seed: u64) -> Self {
        Self { inner: Vec::new(), seed: global_seed }
    }

    /// The global seed new agents' streams are derived from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// All live agents, sorted by ascending `AgentId`.
///
/// Updates walk the list in this order, which makes every tick
/// deterministic.  Ids are handed out as `max + 1`; because removal always
/// takes from the high end, the ids of a population of `n` are `0..n`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentStore {
    agents: Vec<Agent>,
}

impl AgentStore {
    #[inline]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn as_slice(&self) -> &[Agent] {
        &self.agents
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Agent> {
        self.agents.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Agent> {
        self.agents.iter_mut()
    }

    /// Agents zipped with their RNGs, in id order.
    pub fn iter_mut_with<'a>(
        &'a mut self,
        rngs: &'a mut AgentRngs,
    ) -> impl Iterator<Item = (&'a mut Agent, &'a mut AgentRng)> + 'a {
        debug_assert_eq!(self.agents.len(), rngs.inner.len());
        self.agents.iter_mut().zip(rngs.inner.iter_mut())
    }

    /// Iterator over all `AgentId`s in ascending order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.agents.iter().map(|a| a.id)
    }

    /// The id the next created agent will receive.
    pub fn next_id(&self) -> AgentId {
        self.agents.last().map_or(AgentId(0), |a| a.id.next())
    }

    pub fn contains(&self, id: AgentId) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.position(id).map(|i| &self.agents[i])
    }

    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.position(id).map(|i| &mut self.agents[i])
    }

    /// Grow or shrink to exactly `target` agents.
    ///
    /// New agents get ascending ids after the current maximum and a freshly
    /// seeded RNG; removal drops the highest ids first.  Returns the removed
    /// ids in ascending order (empty when growing).
    pub fn resize(
        &mut self,
        target: usize,
        rngs:   &mut AgentRngs,
        world:  &WorldParams,
    ) -> Vec<AgentId> {
        if target < self.agents.len() {
            let removed = self.agents.split_off(target);
            rngs.inner.truncate(target);
            return removed.into_iter().map(|a| a.id).collect();
        }

        self.agents.reserve(target - self.agents.len());
        while self.agents.len() < target {
            let id = self.next_id();
            let mut rng = AgentRng::new(rngs.seed, id);
            self.agents.push(Agent::spawn(id, &mut rng, world));
            rngs.inner.push(rng);
        }
        Vec::new()
    }

    /// Re-randomize every agent in place, keeping ids.  Each agent draws from
    /// its existing stream, so a respawn never repeats the previous layout.
    pub fn respawn_all(&mut self, rngs: &mut AgentRngs, world: &WorldParams) {
        for (agent, rng) in self.iter_mut_with(rngs) {
            *agent = Agent::spawn(agent.id, rng, world);
        }
    }

    fn position(&self, id: AgentId) -> Option<usize> {
        self.agents.binary_search_by_key(&id, |a| a.id).ok()
    }
}
