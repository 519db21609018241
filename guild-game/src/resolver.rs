//! Mission resolution: party power, the success roll, and its consequences.
use rand::Rng;

use crate::constants::{
    BASE_SUCCESS_CHANCE, BRAVE_POWER_BONUS, DIFFICULTY_WEIGHT, FAILURE_EQUIPMENT_LOSS,
    FAILURE_MONEY_PER_DIFFICULTY, INJURY_MAX_EXCLUSIVE, INJURY_MIN, INJURY_PER_DIFFICULTY,
    LUCKY_POWER_BONUS, MAX_SUCCESS_CHANCE, MIN_SUCCESS_CHANCE, MISSION_FATIGUE_BASE,
    MISSION_FATIGUE_PER_DIFFICULTY, MISSION_HUNGER_BASE, MISSION_HUNGER_PER_PHASE,
    POWER_CHANCE_STEP, UNLUCKY_POWER_PENALTY,
};
use crate::events::{EventResolver, RandomEvent, apply_random_event};
use crate::guild::GuildState;
use crate::hero::{Hero, HeroId, Trait};
use crate::items::{RareBuffType, RareItem};
use crate::mission::{Mission, MissionAssignment, MissionOutcome};
use crate::numbers::{percent, usize_to_i32};
use crate::resources::ResourceDelta;

/// Aggregate party score fed into [`success_chance`].
#[must_use]
pub fn party_power(party: &[&Hero], mission: &Mission) -> i32 {
    let levels: i32 = party
        .iter()
        .map(|hero| i32::try_from(hero.level).unwrap_or(i32::MAX))
        .sum();
    let gear: i32 = party.iter().map(|hero| hero.equipment_power()).sum();
    let any = |t: Trait| party.iter().any(|hero| hero.traits.contains(t));

    let mut power = levels + usize_to_i32(party.len()) + gear;
    if any(Trait::Brave) {
        power += BRAVE_POWER_BONUS;
    }
    if any(Trait::Lucky) {
        power += LUCKY_POWER_BONUS;
    }
    if any(Trait::Unlucky) {
        power -= UNLUCKY_POWER_PENALTY;
    }
    power + usize_to_i32(party.iter().filter(|hero| mission.prefers(hero.class)).count())
}

/// `clamp(0.55 + (power - difficulty * 1.5) * 0.05, 0.10, 0.95)`
#[must_use]
pub fn success_chance(power: i32, difficulty: i32) -> f64 {
    let score = f64::from(difficulty) * DIFFICULTY_WEIGHT;
    (BASE_SUCCESS_CHANCE + (f64::from(power) - score) * POWER_CHANCE_STEP)
        .clamp(MIN_SUCCESS_CHANCE, MAX_SUCCESS_CHANCE)
}

fn apply_buff(hero: &mut Hero, item: &RareItem) {
    match item.buff {
        RareBuffType::Vitality => hero.heal(item.magnitude),
        RareBuffType::Rest => hero.apply_fatigue(-item.magnitude),
        RareBuffType::Satiety => hero.apply_hunger(-item.magnitude),
        RareBuffType::Luck => hero.traits.insert(Trait::Lucky),
    }
}

/// Resolves assignments against the guild, chaining into an [`EventResolver`]
/// on success.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MissionResolver {
    events: EventResolver,
}

impl MissionResolver {
    #[must_use]
    pub const fn new(events: EventResolver) -> Self {
        Self { events }
    }

    #[must_use]
    pub const fn events(&self) -> &EventResolver {
        &self.events
    }

    /// Living members of the assignment, deduplicated, in assignment order.
    fn living_party(assignment: &MissionAssignment, guild: &GuildState) -> Vec<HeroId> {
        let mut party: Vec<HeroId> = Vec::with_capacity(assignment.heroes.len());
        for id in &assignment.heroes {
            let alive = guild.hero(*id).is_some_and(Hero::is_alive);
            if alive && !party.contains(id) {
                party.push(*id);
            }
        }
        party
    }

    /// Roll the assignment and apply every consequence to `guild`.
    pub fn resolve<R: Rng + ?Sized>(
        &self,
        assignment: &MissionAssignment,
        guild: &mut GuildState,
        rng: &mut R,
    ) -> MissionOutcome {
        let mission = &assignment.mission;
        let party = Self::living_party(assignment, guild);
        if party.is_empty() {
            log::debug!("{}: no living heroes, skipping", mission.name);
            return MissionOutcome::no_party();
        }

        let power = {
            let members: Vec<&Hero> = party.iter().filter_map(|id| guild.hero(*id)).collect();
            party_power(&members, mission)
        };
        let chance = success_chance(power, mission.difficulty);
        let roll = rng.r#gen::<f64>();
        let success = roll <= chance;
        log::debug!(
            "{}: power {power}, chance {chance:.3}, roll {roll:.3}, success {success}",
            mission.name
        );

        let fatigue = MISSION_FATIGUE_BASE + mission.difficulty * MISSION_FATIGUE_PER_DIFFICULTY;
        let hunger = MISSION_HUNGER_BASE + mission.duration_phases * MISSION_HUNGER_PER_PHASE;
        for hero in guild.heroes.iter_mut().filter(|h| party.contains(&h.id)) {
            hero.apply_fatigue(fatigue);
            hero.apply_hunger(hunger);
            hero.on_mission = false;
        }

        if success {
            self.succeed(mission, &party, chance, guild, rng)
        } else {
            Self::fail(mission, &party, chance, guild, rng)
        }
    }

    fn succeed<R: Rng + ?Sized>(
        &self,
        mission: &Mission,
        party: &[HeroId],
        chance: f64,
        guild: &mut GuildState,
        rng: &mut R,
    ) -> MissionOutcome {
        let reward = mission.reward;
        guild.resources.apply(&reward);
        let mut summary = format!(
            "Success on {} (chance {}%). Rewards: Gold +{}, Food +{}, Equip +{}",
            mission.name,
            percent(chance),
            reward.money,
            reward.food,
            reward.equipment
        );

        let mut dropped = None;
        if let Some(item) = &mission.rare_item
            && mission.rare_item_chance > 0.0
            && rng.r#gen::<f64>() <= mission.rare_item_chance
        {
            Self::award_rare_item(item, party, guild, rng);
            summary.push_str(&format!(" + Rare item: {}", item.name));
            dropped = Some(item.clone());
        }

        let random_event = self.events.generate_random_event(guild, rng);
        let mut injury = 0;
        let mut hero_died = false;
        if let Some(event) = &random_event {
            apply_random_event(event, guild, party);
            if let RandomEvent::Ambush { damage } = event {
                injury = *damage;
                let fallen: Vec<&str> = party
                    .iter()
                    .filter_map(|id| guild.hero(*id))
                    .filter(|hero| !hero.is_alive())
                    .map(|hero| hero.name.as_str())
                    .collect();
                hero_died = !fallen.is_empty();
                if hero_died {
                    summary.push_str(&format!(". Ambush! {} died!", fallen.join(", ")));
                    log::info!("{} died in an ambush after {}", fallen.join(", "), mission.name);
                } else {
                    summary.push_str(&format!(". Ambush! The party took {damage} damage."));
                }
            }
        }

        MissionOutcome {
            success: true,
            reward,
            summary,
            injury,
            hero_died,
            rare_item: dropped,
            random_event,
        }
    }

    /// Pool the drop, buff one participant, and move it onto them if they
    /// have a free slot.
    fn award_rare_item<R: Rng + ?Sized>(
        item: &RareItem,
        party: &[HeroId],
        guild: &mut GuildState,
        rng: &mut R,
    ) {
        guild.rare_items.push(item.clone());
        let target = party[rng.gen_range(0..party.len())];
        let can_equip = match guild.hero_mut(target) {
            Some(hero) => {
                apply_buff(hero, item);
                hero.can_equip()
            }
            None => false,
        };
        if can_equip {
            let pool_index = guild.rare_items.len() - 1;
            if let Err(err) = guild.equip_from_pool(target, pool_index) {
                log::warn!("could not equip {}: {err}", item.name);
            }
        }
        log::info!("rare item {} awarded to {target}", item.name);
    }

    fn fail<R: Rng + ?Sized>(
        mission: &Mission,
        party: &[HeroId],
        chance: f64,
        guild: &mut GuildState,
        rng: &mut R,
    ) -> MissionOutcome {
        let injury = rng.gen_range(INJURY_MIN..INJURY_MAX_EXCLUSIVE)
            + mission.difficulty * INJURY_PER_DIFFICULTY;
        let target = party[rng.gen_range(0..party.len())];

        let mut hero_died = false;
        let mut victim = String::new();
        if let Some(hero) = guild.hero_mut(target) {
            hero.apply_injury(injury);
            hero_died = !hero.is_alive();
            victim.clone_from(&hero.name);
        }

        let penalty = ResourceDelta::new(
            -mission.difficulty * FAILURE_MONEY_PER_DIFFICULTY,
            0,
            0,
            -FAILURE_EQUIPMENT_LOSS,
        );
        guild.resources.apply(&penalty);

        let consequence = if hero_died {
            format!("{victim} died!")
        } else {
            format!("{victim} took {injury} damage.")
        };
        let summary = format!(
            "Failure on {} (chance {}%). Penalties: Gold {}, Equip {}. {consequence}",
            mission.name,
            percent(chance),
            penalty.money,
            penalty.equipment
        );
        if hero_died {
            log::info!("{victim} died on {}", mission.name);
        }

        MissionOutcome {
            success: false,
            reward: penalty,
            summary,
            injury,
            hero_died,
            rare_item: None,
            random_event: None,
        }
    }
}
