//! Centralized balance and tuning constants for the guild simulation.
//!
//! These values define the deterministic math for the core simulation.
//! Engine-level knobs that callers may tune (event odds, board sizes) live in
//! [`crate::config::EngineConfig`] instead.

// Hero bounds --------------------------------------------------------------
pub(crate) const HERO_STAT_CAP: i32 = 120;
pub(crate) const HERO_SOFT_CAP: i32 = 100;
pub(crate) const HERO_CRITICAL_HEALTH: i32 = 20;
pub(crate) const HERO_EQUIP_SLOTS: usize = 3;
pub(crate) const HERO_MIN_RANDOM_LEVEL: u32 = 1;
pub(crate) const HERO_MAX_RANDOM_LEVEL: u32 = 3;
pub(crate) const STARTING_HERO_LEVEL: u32 = 2;

// Mission resolution -------------------------------------------------------
pub(crate) const BRAVE_POWER_BONUS: i32 = 2;
pub(crate) const LUCKY_POWER_BONUS: i32 = 2;
pub(crate) const UNLUCKY_POWER_PENALTY: i32 = 1;
pub(crate) const DIFFICULTY_WEIGHT: f64 = 1.5;
pub(crate) const BASE_SUCCESS_CHANCE: f64 = 0.55;
pub(crate) const POWER_CHANCE_STEP: f64 = 0.05;
pub(crate) const MIN_SUCCESS_CHANCE: f64 = 0.10;
pub(crate) const MAX_SUCCESS_CHANCE: f64 = 0.95;
pub(crate) const MISSION_FATIGUE_BASE: i32 = 10;
pub(crate) const MISSION_FATIGUE_PER_DIFFICULTY: i32 = 5;
pub(crate) const MISSION_HUNGER_BASE: i32 = 5;
pub(crate) const MISSION_HUNGER_PER_PHASE: i32 = 5;
pub(crate) const INJURY_MIN: i32 = 10;
pub(crate) const INJURY_MAX_EXCLUSIVE: i32 = 35;
pub(crate) const INJURY_PER_DIFFICULTY: i32 = 5;
pub(crate) const FAILURE_MONEY_PER_DIFFICULTY: i32 = 3;
pub(crate) const FAILURE_EQUIPMENT_LOSS: i32 = 1;
pub(crate) const MIN_DIFFICULTY: i32 = 1;
pub(crate) const MAX_DIFFICULTY: i32 = 5;

// Random events ------------------------------------------------------------
pub(crate) const AMBUSH_DAMAGE_MIN: i32 = 5;
pub(crate) const AMBUSH_DAMAGE_MAX_EXCLUSIVE: i32 = 15;
pub(crate) const BONUS_GOLD_MIN: i32 = 20;
pub(crate) const BONUS_GOLD_MAX_EXCLUSIVE: i32 = 50;
pub(crate) const BONUS_FOOD_MIN: i32 = 10;
pub(crate) const BONUS_FOOD_MAX_EXCLUSIVE: i32 = 25;

// Daily upkeep -------------------------------------------------------------
pub(crate) const STARVATION_HUNGER: i32 = 15;
pub(crate) const EVENING_FATIGUE_RECOVERY: i32 = 20;
pub(crate) const EVENING_HUNGER_RECOVERY: i32 = 10;

// Defeat thresholds --------------------------------------------------------
pub(crate) const DEBT_LIMIT: i32 = 100;
pub(crate) const MONEY_FLOOR: i32 = -20;

// Prosperity banner --------------------------------------------------------
pub(crate) const PROSPEROUS_MONEY: i32 = 150;
pub(crate) const PROSPEROUS_FOOD: i32 = 60;

// Mission board scaling ----------------------------------------------------
pub(crate) const DIFFICULTY_BIAS_DAYS: u32 = 3;
pub(crate) const DIFFICULTY_DRIFT_DAYS: u32 = 5;
pub(crate) const REWARD_BONUS_DAYS: u32 = 4;
