//! Errors raised for caller mistakes. Simulation setbacks are data, not errors.
use thiserror::Error;

use crate::guild::DefeatReason;
use crate::hero::HeroId;
use crate::mission::MissionId;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("unknown heal tier `{0}`")]
    UnknownHealTier(String),
    #[error("the guild has already fallen: {reason}")]
    Defeated { reason: DefeatReason },
    #[error("no hero with id {0}")]
    UnknownHero(HeroId),
    #[error("{0} is not on today's board")]
    UnknownMission(MissionId),
    #[error("no rare item at pool index {0}")]
    ItemNotInPool(usize),
    #[error("{0} has no free equipment slot")]
    NoEquipSlot(HeroId),
    #[error("{hero} has nothing equipped in slot {slot}")]
    ItemNotEquipped { hero: HeroId, slot: usize },
}

/// Errors raised when engine configuration invariants are violated.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be between 0 and 1 (got {value:.2})")]
    ProbabilityRange { field: &'static str, value: f64 },
    #[error("{field} must be at least {min} (got {value})")]
    MinViolation {
        field: &'static str,
        min: usize,
        value: usize,
    },
    #[error("invalid engine configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
