//! Priced healing tiers.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GameError;
use crate::guild::GuildState;
use crate::hero::{Hero, HeroId};
use crate::resources::{ResourceDelta, ResourceStock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealTier {
    Minor,
    Major,
    Full,
}

impl HealTier {
    pub const ALL: [Self; 3] = [Self::Minor, Self::Major, Self::Full];

    /// Non-positive cost charged before healing.
    #[must_use]
    pub const fn cost(self) -> ResourceDelta {
        match self {
            Self::Minor => ResourceDelta::new(-5, 0, -1, 0),
            Self::Major => ResourceDelta::new(-15, 0, -3, 0),
            Self::Full => ResourceDelta::new(-30, 0, -5, 0),
        }
    }

    /// Health restored, capped by the hero's maximum.
    #[must_use]
    pub const fn amount(self) -> i32 {
        match self {
            Self::Minor => 25,
            Self::Major => 50,
            Self::Full => 999,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Minor => "minor",
            Self::Major => "major",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for HealTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HealTier {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minor" => Ok(Self::Minor),
            "major" => Ok(Self::Major),
            "full" => Ok(Self::Full),
            _ => Err(GameError::UnknownHealTier(s.to_string())),
        }
    }
}

/// True when the hero is alive, injured and the guild can pay for `tier`.
#[must_use]
pub fn can_heal_hero(stock: &ResourceStock, hero: &Hero, tier: HealTier) -> bool {
    hero.is_alive() && hero.is_injured() && stock.can_afford(&tier.cost())
}

/// Charge `tier` and heal the hero. Nothing changes when the check fails.
pub fn try_heal_hero(stock: &mut ResourceStock, hero: &mut Hero, tier: HealTier) -> bool {
    if !can_heal_hero(stock, hero, tier) {
        return false;
    }
    stock.apply(&tier.cost());
    hero.heal(tier.amount());
    log::debug!("{} received {tier} healing", hero.name);
    true
}

/// Heal a roster member by id, paying from the guild ledger.
pub fn heal_guild_hero(guild: &mut GuildState, id: HeroId, tier: HealTier) -> bool {
    let GuildState {
        heroes, resources, ..
    } = guild;
    heroes
        .iter_mut()
        .find(|hero| hero.id == id)
        .is_some_and(|hero| try_heal_hero(resources, hero, tier))
}
