//! Random mission events and scripted daily events.
//!
//! Both kinds are plain data. [`apply_random_event`] and [`apply_daily_event`]
//! are the only places that turn them into guild mutations.
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{
    AMBUSH_DAMAGE_MAX_EXCLUSIVE, AMBUSH_DAMAGE_MIN, BONUS_FOOD_MAX_EXCLUSIVE, BONUS_FOOD_MIN,
    BONUS_GOLD_MAX_EXCLUSIVE, BONUS_GOLD_MIN,
};
use crate::content::create_random_hero;
use crate::guild::GuildState;
use crate::hero::{Hero, HeroId};
use crate::resources::ResourceDelta;

/// Event that may follow a successful mission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RandomEvent {
    NewHeroEncounter { hero: Box<Hero> },
    Ambush { damage: i32 },
    BonusResources { bonus: ResourceDelta },
}

impl RandomEvent {
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::NewHeroEncounter { .. } => "A new hero appears",
            Self::Ambush { .. } => "Ambush!",
            Self::BonusResources { .. } => "Hidden cache",
        }
    }

    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::NewHeroEncounter { hero } => format!(
                "You meet {}, a {} looking to join your guild!",
                hero.name, hero.class
            ),
            Self::Ambush { damage } => format!(
                "Your heroes were ambushed! Every member of the party takes {damage} damage."
            ),
            Self::BonusResources { bonus } => format!(
                "You uncover hidden supplies! Gold +{}, Food +{}",
                bonus.money, bonus.food
            ),
        }
    }
}

/// Rolls for a [`RandomEvent`] after a successful mission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventResolver {
    chance: f64,
}

impl Default for EventResolver {
    fn default() -> Self {
        Self::new(0.15)
    }
}

impl EventResolver {
    #[must_use]
    pub const fn new(chance: f64) -> Self {
        Self { chance }
    }

    #[must_use]
    pub const fn chance(&self) -> f64 {
        self.chance
    }

    /// Draw the gate and, on a hit, one of the three archetypes uniformly.
    pub fn generate_random_event<R: Rng + ?Sized>(
        &self,
        _guild: &GuildState,
        rng: &mut R,
    ) -> Option<RandomEvent> {
        if rng.r#gen::<f64>() >= self.chance {
            return None;
        }
        let event = match rng.gen_range(0..3u32) {
            0 => RandomEvent::NewHeroEncounter {
                hero: Box::new(create_random_hero(rng)),
            },
            1 => RandomEvent::Ambush {
                damage: rng.gen_range(AMBUSH_DAMAGE_MIN..AMBUSH_DAMAGE_MAX_EXCLUSIVE),
            },
            _ => {
                let gold = rng.gen_range(BONUS_GOLD_MIN..BONUS_GOLD_MAX_EXCLUSIVE);
                let food = rng.gen_range(BONUS_FOOD_MIN..BONUS_FOOD_MAX_EXCLUSIVE);
                RandomEvent::BonusResources {
                    bonus: ResourceDelta::new(gold, food, 0, 0),
                }
            }
        };
        log::debug!("random event rolled: {}", event.title());
        Some(event)
    }
}

/// Apply a random event. Ambush damage lands on `party` only.
pub fn apply_random_event(event: &RandomEvent, guild: &mut GuildState, party: &[HeroId]) {
    match event {
        RandomEvent::NewHeroEncounter { hero } => guild.recruit(hero.as_ref().clone()),
        RandomEvent::Ambush { damage } => {
            for hero in guild
                .heroes
                .iter_mut()
                .filter(|hero| party.contains(&hero.id))
            {
                hero.apply_injury(*damage);
            }
        }
        RandomEvent::BonusResources { bonus } => guild.resources.apply(bonus),
    }
}

/// Effect carried by a scripted daily event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DailyEffect {
    /// Applied to the ledger without an affordability check.
    Resources { delta: ResourceDelta },
    /// Added to every hero's fatigue.
    FatigueAll { amount: i32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyEvent {
    pub title: String,
    pub description: String,
    pub effect: DailyEffect,
}

impl DailyEvent {
    #[must_use]
    pub fn new(title: &str, description: &str, effect: DailyEffect) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            effect,
        }
    }
}

pub fn apply_daily_event(event: &DailyEvent, guild: &mut GuildState) {
    match event.effect {
        DailyEffect::Resources { delta } => guild.resources.apply(&delta),
        DailyEffect::FatigueAll { amount } => {
            for hero in &mut guild.heroes {
                hero.apply_fatigue(amount);
            }
        }
    }
}
