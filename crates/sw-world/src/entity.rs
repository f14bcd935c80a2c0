//! Immutable world entities.

use sw_core::{ObstacleId, StationId, Vec3};

/// A fixed-location energy source.
///
/// `charging_rate` and `capacity` are descriptive: agents charge at their own
/// `harvesting_rate` and any number of agents may dock at one station.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChargingStation {
    pub id: StationId,
    /// Planar position; `z` is the world's fixed station height.
    pub position: Vec3,
    pub charging_rate: f64,
    pub capacity: u32,
}

/// Whether an obstacle is expected to move.  Nothing in the core moves or
/// collides with obstacles; the kind is carried for renderers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ObstacleKind {
    #[default]
    Static,
    Dynamic,
}

impl ObstacleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ObstacleKind::Static  => "static",
            ObstacleKind::Dynamic => "dynamic",
        }
    }
}

impl std::fmt::Display for ObstacleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A static piece of scenery.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obstacle {
    pub id: ObstacleId,
    pub position: Vec3,
    pub size: f64,
    pub kind: ObstacleKind,
}
