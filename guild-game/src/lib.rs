//! Guild Game Engine
//!
//! Platform-agnostic simulation core for a turn-based adventurers' guild.
//! Heroes are hired, fed, paid and sent on missions through a fixed
//! Morning, Afternoon, Evening cycle until the guild falls. This crate holds
//! every rule and leaves presentation to its callers.

pub mod config;
pub mod constants;
pub mod content;
pub mod engine;
pub mod error;
pub mod events;
pub mod guild;
pub mod healing;
pub mod hero;
pub mod items;
pub mod merchant;
pub mod mission;
pub mod numbers;
pub mod resolver;
pub mod resources;
pub mod rng;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use config::EngineConfig;
pub use content::{
    build_daily_events, create_random_hero, create_starting_hero, generate_mission_board,
    generate_missions, recruitment_candidates, starting_armor, starting_heroes, starting_weapon,
};
pub use engine::{GameEngine, PhaseResult};
pub use error::{ConfigError, GameError};
pub use events::{
    DailyEffect, DailyEvent, EventResolver, RandomEvent, apply_daily_event, apply_random_event,
};
pub use guild::{DefeatReason, GuildState};
pub use healing::{HealTier, can_heal_hero, heal_guild_hero, try_heal_hero};
pub use hero::{EquipmentSlots, Hero, HeroClass, HeroId, Trait, TraitSet};
pub use items::{RareBuffType, RareItem, RareItemCategory};
pub use merchant::{MerchantOffer, can_execute_offer, daily_offers, execute_offer};
pub use mission::{Mission, MissionAssignment, MissionId, MissionOutcome, Phase};
pub use resolver::{MissionResolver, party_power, success_chance};
pub use resources::{ResourceDelta, ResourceStock};
pub use rng::CountingRng;
