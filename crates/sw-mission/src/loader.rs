//! CSV mission loader.
//!
//! # CSV format
//!
//! One row per mission.  Ids are assigned in row order.
//!
//! ```csv
//! kind,center_x,center_y,center_z,radius,assigned_agents,progress
//! mapping,-20.0,15.0,5.0,18.0,0;3;7,0.25
//! formation_control,30.0,-10.0,4.0,12.0,,0.0
//! ```
//!
//! `assigned_agents` is a `;`-separated list of agent ids and may be empty.
//! `progress` is clamped to `[0, 1]`; a row loaded at 1.0 starts Completed.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use sw_core::{AgentId, MissionId, Vec3};

use crate::{Mission, MissionError, MissionResult, MissionStatus, TargetArea};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct MissionRecord {
    kind:            String,
    center_x:        f64,
    center_y:        f64,
    center_z:        f64,
    radius:          f64,
    #[serde(default)]
    assigned_agents: String,
    #[serde(default)]
    progress:        f64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load missions from a CSV file.
pub fn load_missions_csv(path: &Path) -> MissionResult<Vec<Mission>> {
    let file = std::fs::File::open(path)?;
    load_missions_reader(file)
}

/// Like [`load_missions_csv`] but accepts any `Read` source.
pub fn load_missions_reader<R: Read>(reader: R) -> MissionResult<Vec<Mission>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut missions = Vec::new();

    for (row_no, result) in csv_reader.deserialize::<MissionRecord>().enumerate() {
        let row = result.map_err(|e| MissionError::Parse(e.to_string()))?;
        if !(row.radius.is_finite() && row.radius > 0.0) {
            return Err(MissionError::Parse(format!(
                "row {row_no}: radius must be finite and > 0, got {}",
                row.radius
            )));
        }
        let center = Vec3::new(row.center_x, row.center_y, row.center_z);
        if !center.is_finite() {
            return Err(MissionError::Parse(format!("row {row_no}: non-finite center")));
        }

        let progress = if row.progress.is_nan() { 0.0 } else { row.progress.clamp(0.0, 1.0) };
        missions.push(Mission {
            id:              MissionId(row_no as u32),
            kind:            row.kind.parse()?,
            target:          TargetArea { center, radius: row.radius },
            assigned_agents: parse_agents(&row.assigned_agents)?,
            status:          if progress >= 1.0 { MissionStatus::Completed } else { MissionStatus::Active },
            progress,
        });
    }

    Ok(missions)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_agents(s: &str) -> MissionResult<Vec<AgentId>> {
    let mut ids = s
        .split(';')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| {
            t.parse::<u32>()
                .map(AgentId)
                .map_err(|_| MissionError::Parse(format!("invalid agent id {t:?}")))
        })
        .collect::<MissionResult<Vec<_>>>()?;
    ids.sort_unstable();
    ids.dedup();
    Ok(ids)
}
