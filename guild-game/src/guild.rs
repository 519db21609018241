//! Guild state: roster, ledger, rare-item pool, debt and the day counter.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{DEBT_LIMIT, MONEY_FLOOR, PROSPEROUS_FOOD, PROSPEROUS_MONEY};
use crate::error::GameError;
use crate::hero::{Hero, HeroId};
use crate::items::RareItem;
use crate::resources::ResourceStock;

/// Why the guild fell. Checked in declaration order; the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefeatReason {
    AllHeroesLost,
    OutOfFood,
    Debt,
}

impl DefeatReason {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::AllHeroesLost => "All heroes are dead or gravely wounded.",
            Self::OutOfFood => "No food left to feed the guild.",
            Self::Debt => "The guild is drowning in debt.",
        }
    }
}

impl fmt::Display for DefeatReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuildState {
    /// Roster in recruitment order. Dead heroes stay listed.
    pub heroes: Vec<Hero>,
    pub resources: ResourceStock,
    /// Unequipped rare items owned by the guild.
    pub rare_items: Vec<RareItem>,
    debt: i32,
    day: u32,
}

impl Default for GuildState {
    fn default() -> Self {
        Self::new(ResourceStock::default())
    }
}

impl GuildState {
    /// Empty guild on day 1 holding `resources`.
    #[must_use]
    pub const fn new(resources: ResourceStock) -> Self {
        Self {
            heroes: Vec::new(),
            resources,
            rare_items: Vec::new(),
            debt: 0,
            day: 1,
        }
    }

    #[must_use]
    pub const fn day(&self) -> u32 {
        self.day
    }

    #[must_use]
    pub const fn debt(&self) -> i32 {
        self.debt
    }

    pub(crate) const fn next_day(&mut self) {
        self.day += 1;
    }

    pub(crate) const fn add_debt(&mut self, amount: i32) {
        self.debt += amount;
    }

    #[must_use]
    pub fn has_living_heroes(&self) -> bool {
        self.heroes.iter().any(Hero::is_alive)
    }

    #[must_use]
    pub fn hero(&self, id: HeroId) -> Option<&Hero> {
        self.heroes.iter().find(|hero| hero.id == id)
    }

    pub fn hero_mut(&mut self, id: HeroId) -> Option<&mut Hero> {
        self.heroes.iter_mut().find(|hero| hero.id == id)
    }

    pub fn living_heroes(&self) -> impl Iterator<Item = &Hero> {
        self.heroes.iter().filter(|hero| hero.is_alive())
    }

    pub fn available_heroes(&self) -> impl Iterator<Item = &Hero> {
        self.heroes
            .iter()
            .filter(|hero| hero.is_alive() && hero.is_available())
    }

    /// Add a hero to the end of the roster.
    pub fn recruit(&mut self, hero: Hero) {
        self.heroes.push(hero);
    }

    /// Total rare items owned, pooled or equipped.
    #[must_use]
    pub fn rare_item_count(&self) -> usize {
        self.rare_items.len()
            + self
                .heroes
                .iter()
                .map(|hero| hero.equipment.len())
                .sum::<usize>()
    }

    /// Move the pooled item at `pool_index` onto a hero.
    ///
    /// # Errors
    ///
    /// Fails when the hero or item does not exist, or the hero has no free
    /// slot. The item stays in the pool on failure.
    pub fn equip_from_pool(&mut self, id: HeroId, pool_index: usize) -> Result<(), GameError> {
        if pool_index >= self.rare_items.len() {
            return Err(GameError::ItemNotInPool(pool_index));
        }
        let hero = self
            .heroes
            .iter_mut()
            .find(|hero| hero.id == id)
            .ok_or(GameError::UnknownHero(id))?;
        if !hero.can_equip() {
            return Err(GameError::NoEquipSlot(id));
        }
        let item = self.rare_items.remove(pool_index);
        hero.equip(item).map_err(|_| GameError::NoEquipSlot(id))
    }

    /// Move the item in a hero's `slot` back into the guild pool.
    ///
    /// # Errors
    ///
    /// Fails when the hero does not exist or the slot is empty.
    pub fn unequip_to_pool(&mut self, id: HeroId, slot: usize) -> Result<(), GameError> {
        let hero = self.hero_mut(id).ok_or(GameError::UnknownHero(id))?;
        let item = hero
            .unequip(slot)
            .ok_or(GameError::ItemNotEquipped { hero: id, slot })?;
        self.rare_items.push(item);
        Ok(())
    }

    /// Evaluate the defeat conditions in priority order.
    #[must_use]
    pub fn check_defeat(&self) -> Option<DefeatReason> {
        if !self.has_living_heroes() {
            return Some(DefeatReason::AllHeroesLost);
        }
        if self.resources.food <= 0 {
            return Some(DefeatReason::OutOfFood);
        }
        if self.debt >= DEBT_LIMIT || self.resources.money < MONEY_FLOOR {
            return Some(DefeatReason::Debt);
        }
        None
    }

    #[must_use]
    pub const fn is_prosperous(&self) -> bool {
        self.resources.money >= PROSPEROUS_MONEY
            && self.resources.food >= PROSPEROUS_FOOD
            && self.debt <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hero::HeroClass;
    use crate::hero::fixtures::hero;
    use crate::items::{RareBuffType, RareItemCategory};

    fn guild_with(heroes: Vec<Hero>) -> GuildState {
        let mut guild = GuildState::default();
        for h in heroes {
            guild.recruit(h);
        }
        guild
    }

    fn relic(name: &str) -> RareItem {
        RareItem::new(
            name,
            RareBuffType::Vitality,
            5,
            "test relic",
            RareItemCategory::Armor,
            1,
        )
    }

    #[test]
    fn new_guild_starts_on_day_one_without_debt() {
        let guild = GuildState::default();
        assert_eq!(guild.day(), 1);
        assert_eq!(guild.debt(), 0);
        assert!(!guild.has_living_heroes());
    }

    #[test]
    fn defeat_priority_prefers_dead_roster() {
        let mut dead = hero(1, HeroClass::Warrior);
        dead.health = 0;
        let mut guild = guild_with(vec![dead]);
        guild.resources.food = 0;
        guild.add_debt(500);
        assert_eq!(guild.check_defeat(), Some(DefeatReason::AllHeroesLost));
        assert_eq!(
            DefeatReason::AllHeroesLost.to_string(),
            "All heroes are dead or gravely wounded."
        );
    }

    #[test]
    fn defeat_checks_food_then_debt() {
        let mut guild = guild_with(vec![hero(1, HeroClass::Mage)]);
        assert_eq!(guild.check_defeat(), None);

        guild.resources.food = 0;
        guild.add_debt(100);
        assert_eq!(guild.check_defeat(), Some(DefeatReason::OutOfFood));

        guild.resources.food = 5;
        assert_eq!(guild.check_defeat(), Some(DefeatReason::Debt));
    }

    #[test]
    fn money_floor_triggers_debt_defeat() {
        let mut guild = guild_with(vec![hero(1, HeroClass::Cleric)]);
        guild.resources.money = -20;
        assert_eq!(guild.check_defeat(), None);
        guild.resources.money = -21;
        assert_eq!(guild.check_defeat(), Some(DefeatReason::Debt));
    }

    #[test]
    fn equip_and_unequip_move_single_owner() {
        let mut guild = guild_with(vec![hero(7, HeroClass::Ranger)]);
        guild.rare_items.push(relic("a"));
        guild.rare_items.push(relic("b"));
        assert_eq!(guild.rare_item_count(), 2);

        guild.equip_from_pool(HeroId(7), 1).expect("equip b");
        assert_eq!(guild.rare_items.len(), 1);
        assert_eq!(guild.rare_items[0].name, "a");
        assert_eq!(guild.hero(HeroId(7)).map(|h| h.equipment.len()), Some(1));
        assert_eq!(guild.rare_item_count(), 2);

        guild.unequip_to_pool(HeroId(7), 0).expect("unequip b");
        assert_eq!(guild.rare_items.len(), 2);
        assert_eq!(guild.rare_item_count(), 2);
    }

    #[test]
    fn equip_errors_leave_pool_intact() {
        let mut guild = guild_with(vec![hero(7, HeroClass::Ranger)]);
        guild.rare_items.push(relic("a"));

        assert_eq!(
            guild.equip_from_pool(HeroId(7), 3),
            Err(GameError::ItemNotInPool(3))
        );
        assert_eq!(
            guild.equip_from_pool(HeroId(99), 0),
            Err(GameError::UnknownHero(HeroId(99)))
        );

        if let Some(h) = guild.hero_mut(HeroId(7)) {
            for idx in 0..3 {
                h.equip(relic(&format!("worn{idx}"))).expect("free slot");
            }
        }
        assert_eq!(
            guild.equip_from_pool(HeroId(7), 0),
            Err(GameError::NoEquipSlot(HeroId(7)))
        );
        assert_eq!(guild.rare_items.len(), 1);
        assert_eq!(
            guild.unequip_to_pool(HeroId(7), 9),
            Err(GameError::ItemNotEquipped {
                hero: HeroId(7),
                slot: 9
            })
        );
    }

    #[test]
    fn prosperity_needs_money_food_and_no_debt() {
        let mut guild = guild_with(vec![hero(1, HeroClass::Rogue)]);
        guild.resources.money = 150;
        guild.resources.food = 60;
        assert!(guild.is_prosperous());
        guild.add_debt(1);
        assert!(!guild.is_prosperous());
    }

    #[test]
    fn available_heroes_skip_arrivals_and_dead() {
        let mut late = hero(2, HeroClass::Rogue);
        late.arriving_in = Some(1);
        let mut dead = hero(3, HeroClass::Rogue);
        dead.health = 0;
        let guild = guild_with(vec![hero(1, HeroClass::Rogue), late, dead]);
        assert_eq!(guild.available_heroes().count(), 1);
        assert_eq!(guild.living_heroes().count(), 2);
    }
}
