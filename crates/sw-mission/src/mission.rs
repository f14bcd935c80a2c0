//! Mission records.

use std::str::FromStr;

use sw_core::{AgentId, MissionId, Vec3};

use crate::MissionError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MissionKind {
    Mapping,
    ObjectDetection,
    DataAggregation,
    FormationControl,
}

impl MissionKind {
    pub const ALL: [MissionKind; 4] = [
        MissionKind::Mapping,
        MissionKind::ObjectDetection,
        MissionKind::DataAggregation,
        MissionKind::FormationControl,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MissionKind::Mapping          => "mapping",
            MissionKind::ObjectDetection  => "object_detection",
            MissionKind::DataAggregation  => "data_aggregation",
            MissionKind::FormationControl => "formation_control",
        }
    }
}

impl std::fmt::Display for MissionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MissionKind {
    type Err = MissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        MissionKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| MissionError::Parse(format!("unknown mission kind {s:?}")))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MissionStatus {
    #[default]
    Active,
    Completed,
}

/// Circular area a mission covers.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetArea {
    pub center: Vec3,
    pub radius: f64,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mission {
    pub id: MissionId,
    pub kind: MissionKind,
    pub target: TargetArea,
    /// Ascending, no duplicates.
    pub assigned_agents: Vec<AgentId>,
    pub status: MissionStatus,
    /// Completion in `[0, 1]`.  Reaching 1 completes the mission.
    pub progress: f64,
}

impl Mission {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == MissionStatus::Active
    }

    pub fn is_assigned(&self, agent: AgentId) -> bool {
        self.assigned_agents.binary_search(&agent).is_ok()
    }

    /// Add `amount` to the progress.  Returns `true` if this completed the
    /// mission.
    pub fn advance(&mut self, amount: f64) -> bool {
        if !self.is_active() {
            return false;
        }
        self.progress = (self.progress + amount.max(0.0)).min(1.0);
        if self.progress >= 1.0 {
            self.status = MissionStatus::Completed;
            return true;
        }
        false
    }
}
