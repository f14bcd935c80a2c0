//! `ProximityLinkBuilder`: candidate pairs plus random inclusion.

use sw_agent::Agent;
use sw_core::{AgentId, LinkParams, SimRng, Vec3};

use crate::{Link, LinkSet, ProximityIndex};

/// Rebuilds the link set from scratch every tick.
///
/// 1. Gather every non-Failed agent, in id order.
/// 2. Ask the index for all pairs strictly inside `comm_range`.
/// 3. Keep each pair independently with probability `link_probability`.
///
/// Exactly one draw is consumed per candidate, in ascending pair order.
pub struct ProximityLinkBuilder<I: ProximityIndex> {
    pub index:            I,
    pub comm_range:       f64,
    pub link_probability: f64,
    // Scratch buffers reused across ticks.
    ids:    Vec<AgentId>,
    points: Vec<Vec3>,
}

impl<I: ProximityIndex> ProximityLinkBuilder<I> {
    pub fn new(index: I, params: &LinkParams) -> Self {
        Self {
            index,
            comm_range:       params.comm_range,
            link_probability: params.link_probability,
            ids:              Vec::new(),
            points:           Vec::new(),
        }
    }

    /// Compute this tick's links over `agents` (which must be sorted by id).
    pub fn rebuild(&mut self, agents: &[Agent], rng: &mut SimRng) -> LinkSet {
        self.ids.clear();
        self.points.clear();
        for agent in agents.iter().filter(|a| a.is_active()) {
            self.ids.push(agent.id);
            self.points.push(agent.position);
        }

        let candidates = self.index.candidate_pairs(&self.points, self.comm_range);
        let links = candidates
            .iter()
            .filter(|_| rng.gen_bool(self.link_probability))
            .map(|&(i, j)| Link::new(self.ids[i], self.ids[j]))
            .collect();

        LinkSet { links, candidates: candidates.len() }
    }
}
