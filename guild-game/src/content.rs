//! Content generation: heroes, mission boards, rare items and daily events.
//!
//! Every function here only builds data. Nothing touches guild state.
use rand::Rng;

use crate::constants::{
    DIFFICULTY_BIAS_DAYS, DIFFICULTY_DRIFT_DAYS, HERO_MAX_RANDOM_LEVEL, HERO_MIN_RANDOM_LEVEL,
    MAX_DIFFICULTY, MIN_DIFFICULTY, REWARD_BONUS_DAYS, STARTING_HERO_LEVEL,
};
use crate::events::{DailyEffect, DailyEvent};
use crate::hero::{EquipmentSlots, Hero, HeroClass, HeroId, Trait, TraitSet};
use crate::items::{RareBuffType, RareItem, RareItemCategory};
use crate::mission::{Mission, MissionId, Phase};
use crate::resources::ResourceDelta;

pub const DEFAULT_MISSION_COUNT: usize = 5;

const HERO_NAMES: [&str; 40] = [
    "Aria", "Borin", "Cassia", "Darius", "Elly", "Falk", "Galen", "Hex", "Isla", "Joren", "Kira",
    "Lys", "Mara", "Nox", "Orrin", "Pia", "Quin", "Rhea", "Soren", "Tess", "Ulric", "Vexa", "Wynn",
    "Ysolda", "Zarek", "Anwen", "Brann", "Cleo", "Drystan", "Eira", "Fen", "Gwen", "Hale", "Ilan",
    "Jade", "Kael", "Leif", "Mika", "Nyra", "Oona",
];

fn build_hero(id: HeroId, name: &str, class: HeroClass, traits: TraitSet, level: u32) -> Hero {
    let health = class.base_health();
    let level_pay = i32::try_from(level).unwrap_or(i32::MAX);
    Hero {
        id,
        name: name.to_string(),
        class,
        traits,
        level,
        max_health: health,
        health,
        fatigue: 0,
        hunger: 0,
        salary: class.base_salary().saturating_add(level_pay),
        max_fatigue: class.base_fatigue(),
        on_mission: false,
        arriving_in: None,
        equipment: EquipmentSlots::new(),
    }
}

/// Deterministic level-2 Brave founder for `class`.
#[must_use]
pub fn create_starting_hero(class: HeroClass) -> Hero {
    let name = match class {
        HeroClass::Warrior => "Corin",
        HeroClass::Mage => "Elara",
        HeroClass::Cleric => "Thaddeus",
        _ => HERO_NAMES[0],
    };
    let id = HeroId(class.index() as u64 + 1);
    build_hero(
        id,
        name,
        class,
        TraitSet::only(Trait::Brave),
        STARTING_HERO_LEVEL,
    )
}

/// The founding party of a new guild: one Warrior, one Mage, one Cleric.
#[must_use]
pub fn starting_heroes() -> Vec<Hero> {
    [HeroClass::Warrior, HeroClass::Mage, HeroClass::Cleric]
        .into_iter()
        .map(create_starting_hero)
        .collect()
}

/// Uniform name, class, single trait and level 1..=3.
pub fn create_random_hero<R: Rng + ?Sized>(rng: &mut R) -> Hero {
    let name = HERO_NAMES[rng.gen_range(0..HERO_NAMES.len())];
    let class = HeroClass::ALL[rng.gen_range(0..HeroClass::ALL.len())];
    let traits = TraitSet::only(Trait::ALL[rng.gen_range(0..Trait::ALL.len())]);
    let level = rng.gen_range(HERO_MIN_RANDOM_LEVEL..=HERO_MAX_RANDOM_LEVEL);
    let id = HeroId(rng.r#gen::<u64>());
    build_hero(id, name, class, traits, level)
}

/// Candidates for the recruitment board, each arriving after `arrival_days`.
pub fn recruitment_candidates<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    arrival_days: u32,
) -> Vec<Hero> {
    (0..count)
        .map(|_| {
            let mut hero = create_random_hero(rng);
            hero.arriving_in = (arrival_days > 0).then_some(arrival_days);
            hero
        })
        .collect()
}

#[must_use]
pub fn starting_weapon() -> RareItem {
    RareItem::new(
        "Iron Sword",
        RareBuffType::Vitality,
        5,
        "A sturdy starting weapon",
        RareItemCategory::Weapon,
        1,
    )
}

#[must_use]
pub fn starting_armor() -> RareItem {
    RareItem::new(
        "Leather Cuirass",
        RareBuffType::Rest,
        5,
        "Light starting armor",
        RareItemCategory::Armor,
        1,
    )
}

/// `base + gen_range(0..spread)`; a zero spread draws nothing.
#[derive(Debug, Clone, Copy)]
struct AmountRoll {
    base: i32,
    spread: i32,
}

impl AmountRoll {
    const ZERO: Self = Self::fixed(0);

    const fn fixed(base: i32) -> Self {
        Self { base, spread: 0 }
    }

    const fn spread(base: i32, spread: i32) -> Self {
        Self { base, spread }
    }

    fn roll<R: Rng + ?Sized>(self, rng: &mut R) -> i32 {
        if self.spread > 0 {
            self.base + rng.gen_range(0..self.spread)
        } else {
            self.base
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct RareDrop {
    name: &'static str,
    buff: RareBuffType,
    magnitude: i32,
    description: &'static str,
    category: RareItemCategory,
    power_bonus: i32,
    chance: f64,
}

#[derive(Debug, Clone, Copy)]
struct MissionTemplate {
    name: &'static str,
    description: &'static str,
    /// Half-open offset range added to the day bias.
    offset: (i32, i32),
    /// Inclusive clamp applied after the offset.
    clamp: (i32, i32),
    phase: Phase,
    duration_phases: i32,
    money: AmountRoll,
    food: AmountRoll,
    medicine: AmountRoll,
    equipment: AmountRoll,
    preferred: &'static [HeroClass],
    rare: Option<RareDrop>,
}

const MISSION_TEMPLATES: [MissionTemplate; 6] = [
    MissionTemplate {
        name: "Merchant Escort",
        description: "Protect a convoy along uncertain roads.",
        offset: (-1, 1),
        clamp: (1, 5),
        phase: Phase::Afternoon,
        duration_phases: 1,
        money: AmountRoll::spread(10, 6),
        food: AmountRoll::spread(1, 3),
        medicine: AmountRoll::ZERO,
        equipment: AmountRoll::ZERO,
        preferred: &[HeroClass::Rogue, HeroClass::Ranger],
        rare: None,
    },
    MissionTemplate {
        name: "Basilisk Hunt",
        description: "Hunt a rare beast for its components.",
        offset: (0, 2),
        clamp: (2, 5),
        phase: Phase::Afternoon,
        duration_phases: 1,
        money: AmountRoll::spread(6, 5),
        food: AmountRoll::ZERO,
        medicine: AmountRoll::spread(1, 3),
        equipment: AmountRoll::fixed(1),
        preferred: &[HeroClass::Ranger, HeroClass::Rogue],
        rare: Some(RareDrop {
            name: "Basilisk Scale",
            buff: RareBuffType::Vitality,
            magnitude: 12,
            description: "+12 vitality",
            category: RareItemCategory::Armor,
            power_bonus: 2,
            chance: 0.20,
        }),
    },
    MissionTemplate {
        name: "Night Rituals",
        description: "Break a dark ritual before dawn.",
        offset: (1, 3),
        clamp: (2, 5),
        phase: Phase::Evening,
        duration_phases: 1,
        money: AmountRoll::spread(12, 8),
        food: AmountRoll::ZERO,
        medicine: AmountRoll::spread(0, 2),
        equipment: AmountRoll::ZERO,
        preferred: &[HeroClass::Mage, HeroClass::Cleric, HeroClass::Paladin],
        rare: Some(RareDrop {
            name: "Runic Fragment",
            buff: RareBuffType::Luck,
            magnitude: 2,
            description: "+2 luck",
            category: RareItemCategory::Accessory,
            power_bonus: 2,
            chance: 0.25,
        }),
    },
    MissionTemplate {
        name: "Ruin Expedition",
        description: "Explore ancient ruins in search of artifacts.",
        offset: (-1, 2),
        clamp: (1, 5),
        phase: Phase::Afternoon,
        duration_phases: 2,
        money: AmountRoll::spread(14, 10),
        food: AmountRoll::ZERO,
        medicine: AmountRoll::ZERO,
        equipment: AmountRoll::fixed(2),
        preferred: &[HeroClass::Rogue, HeroClass::Ranger],
        rare: Some(RareDrop {
            name: "Forgotten Relic",
            buff: RareBuffType::Rest,
            magnitude: 10,
            description: "+10 rest",
            category: RareItemCategory::Accessory,
            power_bonus: 1,
            chance: 0.30,
        }),
    },
    MissionTemplate {
        name: "Border Patrol",
        description: "Secure the roads for travellers.",
        offset: (-2, 1),
        clamp: (1, 4),
        phase: Phase::Afternoon,
        duration_phases: 1,
        money: AmountRoll::spread(8, 4),
        food: AmountRoll::spread(0, 3),
        medicine: AmountRoll::ZERO,
        equipment: AmountRoll::ZERO,
        preferred: &[HeroClass::Warrior, HeroClass::Paladin],
        rare: None,
    },
    MissionTemplate {
        name: "Camp Infiltration",
        description: "Sabotage an enemy camp under cover of night.",
        offset: (0, 3),
        clamp: (2, 5),
        phase: Phase::Evening,
        duration_phases: 1,
        money: AmountRoll::spread(16, 6),
        food: AmountRoll::ZERO,
        medicine: AmountRoll::ZERO,
        equipment: AmountRoll::spread(1, 2),
        preferred: &[HeroClass::Rogue, HeroClass::Berserker],
        rare: Some(RareDrop {
            name: "Silent Blade",
            buff: RareBuffType::Satiety,
            magnitude: 12,
            description: "+12 satiety",
            category: RareItemCategory::Weapon,
            power_bonus: 3,
            chance: 0.18,
        }),
    },
];

fn difficulty_bias(day: u32) -> i32 {
    let bias = i32::try_from(1 + day / DIFFICULTY_BIAS_DAYS).unwrap_or(MAX_DIFFICULTY);
    bias.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY)
}

impl MissionTemplate {
    fn instantiate<R: Rng + ?Sized>(&self, rng: &mut R, bias: i32) -> Mission {
        let id = MissionId(rng.r#gen::<u64>());
        let difficulty =
            (bias + rng.gen_range(self.offset.0..self.offset.1)).clamp(self.clamp.0, self.clamp.1);
        let money = self.money.roll(rng);
        let food = self.food.roll(rng);
        let medicine = self.medicine.roll(rng);
        let equipment = self.equipment.roll(rng);
        let (rare_item, rare_item_chance) = self.rare.map_or((None, 0.0), |drop| {
            (
                Some(RareItem::new(
                    drop.name,
                    drop.buff,
                    drop.magnitude,
                    drop.description,
                    drop.category,
                    drop.power_bonus,
                )),
                drop.chance,
            )
        });
        Mission {
            id,
            name: self.name.to_string(),
            description: self.description.to_string(),
            difficulty,
            phase: self.phase,
            duration_phases: self.duration_phases,
            reward: ResourceDelta::new(money, food, medicine, equipment),
            preferred_classes: self.preferred.to_vec(),
            rare_item,
            rare_item_chance,
            assigned_heroes: Vec::new(),
        }
    }
}

/// Standard five-mission board for `day`.
pub fn generate_missions<R: Rng + ?Sized>(rng: &mut R, day: u32) -> Vec<Mission> {
    generate_mission_board(rng, day, DEFAULT_MISSION_COUNT)
}

/// Sample `count` missions with replacement from the template set, then
/// layer on the day's difficulty drift and reward bonus.
pub fn generate_mission_board<R: Rng + ?Sized>(
    rng: &mut R,
    day: u32,
    count: usize,
) -> Vec<Mission> {
    let bias = difficulty_bias(day);
    let drift_cap = i32::try_from(day / DIFFICULTY_DRIFT_DAYS + 1).unwrap_or(MAX_DIFFICULTY);
    let reward_bonus = i32::try_from(day / REWARD_BONUS_DAYS).unwrap_or(0);
    (0..count)
        .map(|_| {
            let template = &MISSION_TEMPLATES[rng.gen_range(0..MISSION_TEMPLATES.len())];
            let mut mission = template.instantiate(rng, bias);
            let drift = rng.gen_range(0..drift_cap);
            mission.difficulty = (mission.difficulty + drift).clamp(MIN_DIFFICULTY, MAX_DIFFICULTY);
            mission.reward.money += reward_bonus;
            mission
        })
        .collect()
}

/// Fixed catalogue of scripted daily events.
#[must_use]
pub fn build_daily_events() -> Vec<DailyEvent> {
    vec![
        DailyEvent::new(
            "Generous Merchant",
            "A merchant offers a few provisions.",
            DailyEffect::Resources {
                delta: ResourceDelta::new(-2, 4, 0, 0),
            },
        ),
        DailyEvent::new(
            "Patron Visit",
            "A noble pays to support the guild.",
            DailyEffect::Resources {
                delta: ResourceDelta::money(12),
            },
        ),
        DailyEvent::new(
            "Tense Watch",
            "The heroes are on edge and wear themselves out.",
            DailyEffect::FatigueAll { amount: 5 },
        ),
    ]
}
