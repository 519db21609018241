//! Missions, assignments and their resolved outcomes.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::events::RandomEvent;
use crate::hero::{HeroClass, HeroId};
use crate::items::RareItem;
use crate::resources::ResourceDelta;

/// One of the three fixed daily phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Morning,
    Afternoon,
    Evening,
}

impl Phase {
    /// Phase that follows this one in the daily cycle.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Morning => Self::Afternoon,
            Self::Afternoon => Self::Evening,
            Self::Evening => Self::Morning,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Afternoon => "Afternoon",
            Self::Evening => "Evening",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MissionId(pub u64);

impl fmt::Display for MissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mission-{:016x}", self.0)
    }
}

/// A job on the daily board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub id: MissionId,
    pub name: String,
    pub description: String,
    /// 1..=5
    pub difficulty: i32,
    /// Afternoon or Evening.
    pub phase: Phase,
    pub duration_phases: i32,
    pub reward: ResourceDelta,
    #[serde(default)]
    pub preferred_classes: Vec<HeroClass>,
    #[serde(default)]
    pub rare_item: Option<RareItem>,
    /// Independent drop chance for `rare_item`, in `[0, 1]`.
    #[serde(default)]
    pub rare_item_chance: f64,
    #[serde(default)]
    pub assigned_heroes: Vec<HeroId>,
}

impl Mission {
    #[must_use]
    pub fn is_nocturnal(&self) -> bool {
        self.phase == Phase::Evening
    }

    #[must_use]
    pub fn prefers(&self, class: HeroClass) -> bool {
        self.preferred_classes.contains(&class)
    }
}

/// Heroes committed to a mission for a future phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionAssignment {
    pub mission: Mission,
    pub heroes: Vec<HeroId>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub outcome: Option<MissionOutcome>,
}

impl MissionAssignment {
    #[must_use]
    pub fn new(mission: Mission, heroes: Vec<HeroId>) -> Self {
        Self {
            mission,
            heroes,
            completed: false,
            outcome: None,
        }
    }
}

/// What actually happened when an assignment was resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionOutcome {
    pub success: bool,
    /// Reward on success, penalty on failure.
    pub reward: ResourceDelta,
    pub summary: String,
    /// Injury severity dealt on failure, 0 otherwise.
    pub injury: i32,
    pub hero_died: bool,
    #[serde(default)]
    pub rare_item: Option<RareItem>,
    #[serde(default)]
    pub random_event: Option<RandomEvent>,
}

impl MissionOutcome {
    /// Outcome used when no living hero showed up.
    #[must_use]
    pub fn no_party() -> Self {
        Self {
            success: false,
            reward: ResourceDelta::ZERO,
            summary: "No valid heroes for the mission.".to_string(),
            injury: 0,
            hero_died: false,
            rare_item: None,
            random_event: None,
        }
    }
}
