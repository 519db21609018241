//! Engine-level tuning knobs.
use serde::{Deserialize, Serialize};

use crate::content::DEFAULT_MISSION_COUNT;
use crate::error::ConfigError;
use crate::resources::ResourceStock;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Ledger for a freshly founded guild.
    #[serde(default)]
    pub starting_resources: ResourceStock,
    #[serde(default = "EngineConfig::default_missions_per_day")]
    pub missions_per_day: usize,
    /// Odds of a random event after each successful mission.
    #[serde(default = "EngineConfig::default_random_event_chance")]
    pub random_event_chance: f64,
    /// Odds of a scripted event at the end of each afternoon.
    #[serde(default = "EngineConfig::default_daily_event_chance")]
    pub daily_event_chance: f64,
    #[serde(default = "EngineConfig::default_recruitment_board_size")]
    pub recruitment_board_size: usize,
    #[serde(default = "EngineConfig::default_recruit_arrival_days")]
    pub recruit_arrival_days: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            starting_resources: ResourceStock::default(),
            missions_per_day: Self::default_missions_per_day(),
            random_event_chance: Self::default_random_event_chance(),
            daily_event_chance: Self::default_daily_event_chance(),
            recruitment_board_size: Self::default_recruitment_board_size(),
            recruit_arrival_days: Self::default_recruit_arrival_days(),
        }
    }
}

impl EngineConfig {
    const fn default_missions_per_day() -> usize {
        DEFAULT_MISSION_COUNT
    }

    const fn default_random_event_chance() -> f64 {
        0.15
    }

    const fn default_daily_event_chance() -> f64 {
        0.35
    }

    const fn default_recruitment_board_size() -> usize {
        5
    }

    const fn default_recruit_arrival_days() -> u32 {
        1
    }

    /// Parse and validate a JSON document. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the JSON is malformed or a field is out of
    /// bounds.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// # Errors
    ///
    /// Returns `ConfigError` when any field violates its documented bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::validate_probability("random_event_chance", self.random_event_chance)?;
        Self::validate_probability("daily_event_chance", self.daily_event_chance)?;
        if self.missions_per_day < 1 {
            return Err(ConfigError::MinViolation {
                field: "missions_per_day",
                min: 1,
                value: self.missions_per_day,
            });
        }
        Ok(())
    }

    fn validate_probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::ProbabilityRange { field, value });
        }
        Ok(())
    }
}
