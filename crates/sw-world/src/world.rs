//! The `World` container and its builder.

#[cfg(not(feature = "fx-hash"))]
type IdSet<T> = std::collections::HashSet<T>;
#[cfg(feature = "fx-hash")]
type IdSet<T> = rustc_hash::FxHashSet<T>;

use sw_core::{ObstacleId, SimRng, StationId, Vec3, WorldParams};

use crate::{ChargingStation, Obstacle, ObstacleKind, WorldError, WorldResult};

// ── World ─────────────────────────────────────────────────────────────────────

/// Charging stations and obstacles, in insertion order.
///
/// Do not construct directly; use [`WorldBuilder`], [`World::generate`], or
/// the JSON loader.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct World {
    pub stations: Vec<ChargingStation>,
    pub obstacles: Vec<Obstacle>,
}

impl World {
    /// A world with no stations and no obstacles.
    ///
    /// Valid: agents in an empty world never start charging.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    pub fn has_stations(&self) -> bool {
        !self.stations.is_empty()
    }

    pub fn station(&self, id: StationId) -> Option<&ChargingStation> {
        self.stations.iter().find(|s| s.id == id)
    }

    /// Nearest station to `pos` by planar distance, with that distance.
    ///
    /// Linear scan in insertion order; on an exact tie the station seen first
    /// wins.  Returns `None` only when there are no stations.
    pub fn nearest_station(&self, pos: Vec3) -> Option<(&ChargingStation, f64)> {
        let mut best: Option<(&ChargingStation, f64)> = None;
        for station in &self.stations {
            let d = pos.planar_distance(station.position);
            match best {
                Some((_, best_d)) if d >= best_d => {}
                _ => best = Some((station, d)),
            }
        }
        best
    }

    /// Random world: 10–25 obstacles and `max(3, agent_count / 15)` stations
    /// scattered over the plane.
    pub fn generate(rng: &mut SimRng, params: &WorldParams, agent_count: usize) -> World {
        let r = params.plane_radius;
        let mut builder = WorldBuilder::new().station_height(params.station_height);

        let top = (params.min_height + 8.0).min(params.max_height);
        let obstacles: u32 = rng.gen_range(10..=25);
        for _ in 0..obstacles {
            let position = Vec3::new(
                rng.gen_range(-r..=r),
                rng.gen_range(-r..=r),
                rng.gen_range(params.min_height..=top),
            );
            let size = rng.gen_range(3.0..=10.0);
            let kind = if rng.gen_bool(0.5) { ObstacleKind::Static } else { ObstacleKind::Dynamic };
            builder.add_obstacle(position, size, kind);
        }

        let stations = (agent_count / 15).max(3);
        for _ in 0..stations {
            let x = rng.gen_range(-r..=r);
            let y = rng.gen_range(-r..=r);
            let rate = rng.gen_range(30.0..=60.0);
            let capacity = rng.gen_range(5..=12);
            builder.add_station(x, y, rate, capacity);
        }

        builder.into_world()
    }
}

// ── WorldBuilder ──────────────────────────────────────────────────────────────

/// Incrementally assembles a [`World`].
///
/// `add_*` methods assign the next sequential id; `push_*` methods take a
/// fully specified entity (e.g. from a loaded file) and [`build`] checks the
/// ids are unique.
///
/// [`build`]: WorldBuilder::build
#[derive(Default)]
pub struct WorldBuilder {
    station_height: f64,
    stations: Vec<ChargingStation>,
    obstacles: Vec<Obstacle>,
}

impl WorldBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Height given to stations added with [`add_station`](Self::add_station).
    pub fn station_height(mut self, height: f64) -> Self {
        self.station_height = height;
        self
    }

    /// Add a station at `(x, y)` and return its id.
    pub fn add_station(&mut self, x: f64, y: f64, charging_rate: f64, capacity: u32) -> StationId {
        let id = StationId(self.stations.len() as u32);
        self.stations.push(ChargingStation {
            id,
            position: Vec3::new(x, y, self.station_height),
            charging_rate,
            capacity,
        });
        id
    }

    /// Add an obstacle and return its id.
    pub fn add_obstacle(&mut self, position: Vec3, size: f64, kind: ObstacleKind) -> ObstacleId {
        let id = ObstacleId(self.obstacles.len() as u32);
        self.obstacles.push(Obstacle { id, position, size, kind });
        id
    }

    pub fn push_station(&mut self, station: ChargingStation) {
        self.stations.push(station);
    }

    pub fn push_obstacle(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    /// Validate and return the world.
    ///
    /// # Errors
    /// `WorldError::Invalid` for duplicate ids, non-finite positions,
    /// non-positive charging rates, or non-positive obstacle sizes.
    pub fn build(self) -> WorldResult<World> {
        let mut seen = IdSet::default();
        for s in &self.stations {
            if !seen.insert(s.id) {
                return Err(WorldError::Invalid(format!("duplicate station id {}", s.id)));
            }
            if !s.position.is_finite() {
                return Err(WorldError::Invalid(format!("station {} has a non-finite position", s.id)));
            }
            if !(s.charging_rate.is_finite() && s.charging_rate > 0.0) {
                return Err(WorldError::Invalid(format!(
                    "station {} charging_rate must be > 0, got {}",
                    s.id, s.charging_rate
                )));
            }
        }

        let mut seen = IdSet::default();
        for o in &self.obstacles {
            if !seen.insert(o.id) {
                return Err(WorldError::Invalid(format!("duplicate obstacle id {}", o.id)));
            }
            if !o.position.is_finite() {
                return Err(WorldError::Invalid(format!("obstacle {} has a non-finite position", o.id)));
            }
            if !(o.size.is_finite() && o.size > 0.0) {
                return Err(WorldError::Invalid(format!(
                    "obstacle {} size must be > 0, got {}",
                    o.id, o.size
                )));
            }
        }

        Ok(self.into_world())
    }

    /// Skip validation.  Used by [`World::generate`], whose ids and values are
    /// valid by construction.
    fn into_world(self) -> World {
        World { stations: self.stations, obstacles: self.obstacles }
    }
}
