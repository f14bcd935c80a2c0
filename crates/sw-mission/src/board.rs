//! `MissionBoard`: the mission list and its per-tick progress model.

use sw_core::{AgentId, MissionId, MissionParams, SimRng, Vec3};
use tracing::debug;

use crate::{Mission, MissionKind, MissionStatus, TargetArea};

/// Counts for the metrics panel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MissionTally {
    pub active:    usize,
    pub completed: usize,
    pub total:     usize,
}

/// Every mission created since the last reset, in creation order.
///
/// Mission ids equal their position in the list; missions are never removed
/// except by [`reset`](Self::reset).
#[derive(Clone, Debug)]
pub struct MissionBoard {
    missions:     Vec<Mission>,
    params:       MissionParams,
    plane_radius: f64,
    /// Loaded missions restored on reset instead of a random seeding.
    preset:       Option<Vec<Mission>>,
}

impl MissionBoard {
    pub fn new(params: MissionParams, plane_radius: f64) -> Self {
        Self { missions: Vec::new(), params, plane_radius, preset: None }
    }

    /// Use `missions` as the initial list, now and after every reset.
    ///
    /// Ids are renumbered to their position.
    pub fn with_preset(mut self, mut missions: Vec<Mission>) -> Self {
        for (i, m) in missions.iter_mut().enumerate() {
            m.id = MissionId(i as u32);
        }
        self.missions = missions.clone();
        self.preset = Some(missions);
        self
    }

    pub fn missions(&self) -> &[Mission] {
        &self.missions
    }

    pub fn len(&self) -> usize {
        self.missions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.missions.is_empty()
    }

    pub fn get(&self, id: MissionId) -> Option<&Mission> {
        self.missions.get(id.index())
    }

    pub fn active(&self) -> impl Iterator<Item = &Mission> + '_ {
        self.missions.iter().filter(|m| m.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    pub fn tally(&self) -> MissionTally {
        let active = self.active_count();
        let completed = self.missions.iter().filter(|m| m.status == MissionStatus::Completed).count();
        MissionTally { active, completed, total: self.missions.len() }
    }

    /// Active missions `agent` is assigned to.
    pub fn missions_for(&self, agent: AgentId) -> Vec<MissionId> {
        self.active().filter(|m| m.is_assigned(agent)).map(|m| m.id).collect()
    }

    /// Discard everything and start over from the preset, or from
    /// `initial_missions` random missions.
    pub fn reset(&mut self, rng: &mut SimRng, agent_count: usize) {
        self.missions.clear();
        match self.preset.clone() {
            Some(preset) => self.missions = preset,
            None => {
                for _ in 0..self.params.initial_missions {
                    let kind = random_kind(rng);
                    let center = self.random_center(rng);
                    let radius = rng.gen_range(10.0..=25.0);
                    let agents = sample_agents(rng, agent_count, 20, 3, 8);
                    let progress = rng.gen_range(0.2..=0.8);
                    self.push(kind, TargetArea { center, radius }, agents, progress);
                }
            }
        }
        self.prune_agents(agent_count);
    }

    /// One tick of progress plus the occasional spontaneous mission.
    ///
    /// Returns the ids of missions completed during this call.
    pub fn advance(&mut self, dt: f64, rng: &mut SimRng, agent_count: usize) -> Vec<MissionId> {
        let rate = self.params.progress_rate.max(0.0);
        let mut completed = Vec::new();
        for m in self.missions.iter_mut().filter(|m| m.is_active()) {
            let step = rng.gen_range(0.0..=rate) * dt;
            if m.advance(step) {
                debug!(mission = %m.id, kind = %m.kind, "mission completed");
                completed.push(m.id);
            }
        }

        if rng.gen_bool(self.params.spawn_probability)
            && self.active_count() < self.params.max_active
        {
            self.spawn_random(rng, agent_count);
        }
        completed
    }

    /// A random mission with 2 to 6 agents drawn from the first 30 ids.
    pub fn spawn_random(&mut self, rng: &mut SimRng, agent_count: usize) -> MissionId {
        let kind = random_kind(rng);
        let center = self.random_center(rng);
        let radius = rng.gen_range(10.0..=25.0);
        let agents = sample_agents(rng, agent_count, 30, 2, 6);
        let id = self.push(kind, TargetArea { center, radius }, agents, 0.0);
        debug!(mission = %id, %kind, "mission spawned");
        id
    }

    /// Operator-placed mission centred on `(x, y, 5)` with radius 15.
    pub fn create_at(
        &mut self,
        x:           f64,
        y:           f64,
        kind:        MissionKind,
        rng:         &mut SimRng,
        agent_count: usize,
    ) -> MissionId {
        let agents = sample_agents(rng, agent_count, 20, 3, 8);
        let target = TargetArea { center: Vec3::new(x, y, 5.0), radius: 15.0 };
        self.push(kind, target, agents, 0.0)
    }

    /// Remove every assignment to an agent id `>= agent_count`.
    pub fn prune_agents(&mut self, agent_count: usize) {
        for m in &mut self.missions {
            m.assigned_agents.retain(|a| a.index() < agent_count);
        }
    }

    fn push(
        &mut self,
        kind:     MissionKind,
        target:   TargetArea,
        agents:   Vec<AgentId>,
        progress: f64,
    ) -> MissionId {
        let id = MissionId(self.missions.len() as u32);
        self.missions.push(Mission {
            id,
            kind,
            target,
            assigned_agents: agents,
            status: MissionStatus::Active,
            progress,
        });
        id
    }

    fn random_center(&self, rng: &mut SimRng) -> Vec3 {
        let third = self.plane_radius / 3.0;
        Vec3::new(
            rng.gen_range(-third..=third),
            rng.gen_range(-third..=third),
            rng.gen_range(2.0..=8.0),
        )
    }
}

fn random_kind(rng: &mut SimRng) -> MissionKind {
    rng.choose(&MissionKind::ALL).copied().unwrap_or(MissionKind::Mapping)
}

/// `lo..=hi` distinct ids drawn from `0..min(pool, agent_count)`, ascending.
fn sample_agents(
    rng:         &mut SimRng,
    agent_count: usize,
    pool:        usize,
    lo:          usize,
    hi:          usize,
) -> Vec<AgentId> {
    let amount = rng.gen_range(lo..=hi);
    rng.sample_indices(pool.min(agent_count), amount)
        .into_iter()
        .map(|i| AgentId(i as u32))
        .collect()
}
