//! JSON world loader.
//!
//! # File format
//!
//! ```json
//! {
//!   "stations": [
//!     { "id": 0, "x": -40.0, "y": 25.0, "charging_rate": 45.0, "capacity": 8 }
//!   ],
//!   "obstacles": [
//!     { "id": 0, "x": 10.0, "y": -5.0, "z": 3.0, "size": 6.0, "type": "static" }
//!   ]
//! }
//! ```
//!
//! Stations are planar; every station gets `WorldParams::station_height` as
//! its `z`.  Either list may be omitted.  An obstacle without `type` is
//! `static`.  Entities keep file order, which is also the tie-break order of
//! the nearest-station lookup.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use sw_core::{ObstacleId, StationId, Vec3, WorldParams};

use crate::{ChargingStation, Obstacle, ObstacleKind, World, WorldBuilder, WorldResult};

// ── JSON records ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct WorldRecord {
    #[serde(default)]
    stations:  Vec<StationRecord>,
    #[serde(default)]
    obstacles: Vec<ObstacleRecord>,
}

#[derive(Deserialize)]
struct StationRecord {
    id:            u32,
    x:             f64,
    y:             f64,
    charging_rate: f64,
    capacity:      u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum KindRecord {
    Static,
    Dynamic,
}

#[derive(Deserialize)]
struct ObstacleRecord {
    id:   u32,
    x:    f64,
    y:    f64,
    #[serde(default)]
    z:    f64,
    size: f64,
    #[serde(rename = "type", default)]
    kind: Option<KindRecord>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`World`] from a JSON file.
///
/// # Errors
/// I/O and JSON errors, plus every validation error of [`WorldBuilder::build`].
pub fn load_world(path: &Path, params: &WorldParams) -> WorldResult<World> {
    let file = File::open(path)?;
    load_world_reader(BufReader::new(file), params)
}

/// Load a [`World`] from any JSON reader (e.g. an in-memory `Cursor`).
pub fn load_world_reader<R: Read>(reader: R, params: &WorldParams) -> WorldResult<World> {
    let record: WorldRecord = serde_json::from_reader(reader)?;

    let mut builder = WorldBuilder::new().station_height(params.station_height);
    for s in record.stations {
        builder.push_station(ChargingStation {
            id:            StationId(s.id),
            position:      Vec3::new(s.x, s.y, params.station_height),
            charging_rate: s.charging_rate,
            capacity:      s.capacity,
        });
    }
    for o in record.obstacles {
        let kind = match o.kind {
            Some(KindRecord::Dynamic) => ObstacleKind::Dynamic,
            Some(KindRecord::Static) | None => ObstacleKind::Static,
        };
        builder.push_obstacle(Obstacle {
            id:       ObstacleId(o.id),
            position: Vec3::new(o.x, o.y, o.z),
            size:     o.size,
            kind,
        });
    }

    builder.build()
}
