//! Heroes: classes, traits and per-hero attrition state.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::ops::BitOr;

use crate::constants::{HERO_CRITICAL_HEALTH, HERO_EQUIP_SLOTS, HERO_SOFT_CAP, HERO_STAT_CAP};
use crate::items::RareItem;

/// Equipped rare items, stored inline up to the slot limit.
pub type EquipmentSlots = SmallVec<[RareItem; HERO_EQUIP_SLOTS]>;

/// Stable identity for a hero within a guild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeroId(pub u64);

impl fmt::Display for HeroId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hero-{:016x}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeroClass {
    Warrior,
    Paladin,
    Berserker,
    Ranger,
    Rogue,
    Mage,
    Cleric,
}

impl HeroClass {
    pub const ALL: [Self; 7] = [
        Self::Warrior,
        Self::Paladin,
        Self::Berserker,
        Self::Ranger,
        Self::Rogue,
        Self::Mage,
        Self::Cleric,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Warrior => "Warrior",
            Self::Paladin => "Paladin",
            Self::Berserker => "Berserker",
            Self::Ranger => "Ranger",
            Self::Rogue => "Rogue",
            Self::Mage => "Mage",
            Self::Cleric => "Cleric",
        }
    }

    #[must_use]
    pub const fn base_health(self) -> i32 {
        match self {
            Self::Warrior => 110,
            Self::Paladin => 105,
            Self::Berserker => 115,
            Self::Ranger | Self::Cleric => 95,
            Self::Rogue => 90,
            Self::Mage => 80,
        }
    }

    #[must_use]
    pub const fn base_fatigue(self) -> i32 {
        match self {
            Self::Warrior | Self::Paladin => 15,
            Self::Berserker => 20,
            Self::Ranger | Self::Rogue => 10,
            Self::Mage | Self::Cleric => 12,
        }
    }

    #[must_use]
    pub const fn base_salary(self) -> i32 {
        match self {
            Self::Warrior | Self::Paladin | Self::Berserker => 8,
            Self::Ranger | Self::Rogue | Self::Mage | Self::Cleric => 7,
        }
    }

    /// Position in [`HeroClass::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Warrior => 0,
            Self::Paladin => 1,
            Self::Berserker => 2,
            Self::Ranger => 3,
            Self::Rogue => 4,
            Self::Mage => 5,
            Self::Cleric => 6,
        }
    }
}

impl fmt::Display for HeroClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trait {
    Brave,
    Cautious,
    Lucky,
    Unlucky,
    Agile,
    Sturdy,
}

impl Trait {
    pub const ALL: [Self; 6] = [
        Self::Brave,
        Self::Cautious,
        Self::Lucky,
        Self::Unlucky,
        Self::Agile,
        Self::Sturdy,
    ];

    const fn bit(self) -> u8 {
        match self {
            Self::Brave => 1 << 0,
            Self::Cautious => 1 << 1,
            Self::Lucky => 1 << 2,
            Self::Unlucky => 1 << 3,
            Self::Agile => 1 << 4,
            Self::Sturdy => 1 << 5,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Brave => "Brave",
            Self::Cautious => "Cautious",
            Self::Lucky => "Lucky",
            Self::Unlucky => "Unlucky",
            Self::Agile => "Agile",
            Self::Sturdy => "Sturdy",
        }
    }
}

/// Zero or more independently combinable traits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraitSet(u8);

impl TraitSet {
    pub const NONE: Self = Self(0);

    #[must_use]
    pub const fn only(value: Trait) -> Self {
        Self(value.bit())
    }

    #[must_use]
    pub const fn contains(self, value: Trait) -> bool {
        self.0 & value.bit() != 0
    }

    pub const fn insert(&mut self, value: Trait) {
        self.0 |= value.bit();
    }

    pub const fn remove(&mut self, value: Trait) {
        self.0 &= !value.bit();
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Trait> {
        Trait::ALL.into_iter().filter(move |t| self.contains(*t))
    }
}

impl From<Trait> for TraitSet {
    fn from(value: Trait) -> Self {
        Self::only(value)
    }
}

impl BitOr<Trait> for TraitSet {
    type Output = Self;

    fn bitor(mut self, rhs: Trait) -> Self::Output {
        self.insert(rhs);
        self
    }
}

impl fmt::Display for TraitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("None");
        }
        let labels: Vec<&str> = self.iter().map(Trait::as_str).collect();
        f.write_str(&labels.join(", "))
    }
}

/// A member of the guild roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub id: HeroId,
    pub name: String,
    pub class: HeroClass,
    #[serde(default)]
    pub traits: TraitSet,
    pub level: u32,
    pub max_health: i32,
    pub health: i32,
    pub fatigue: i32,
    pub hunger: i32,
    pub salary: i32,
    pub max_fatigue: i32,
    #[serde(default)]
    pub on_mission: bool,
    /// Days until the hero reaches the guild; `None` or `Some(0)` means present.
    #[serde(default)]
    pub arriving_in: Option<u32>,
    #[serde(default)]
    pub equipment: EquipmentSlots,
}

impl Hero {
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.health > 0
    }

    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.fatigue >= HERO_SOFT_CAP
            || self.hunger >= HERO_SOFT_CAP
            || self.health <= HERO_CRITICAL_HEALTH
    }

    #[must_use]
    pub const fn is_available(&self) -> bool {
        match self.arriving_in {
            None | Some(0) => true,
            Some(_) => false,
        }
    }

    #[must_use]
    pub const fn is_injured(&self) -> bool {
        self.health < self.max_health
    }

    #[must_use]
    pub fn can_equip(&self) -> bool {
        self.equipment.len() < HERO_EQUIP_SLOTS
    }

    /// Sum of equipped power bonuses.
    #[must_use]
    pub fn equipment_power(&self) -> i32 {
        self.equipment.iter().map(|item| item.power_bonus).sum()
    }

    /// Evening rest: sheds fatigue and hunger and releases the hero.
    pub fn rest(&mut self, fatigue_recovery: i32, hunger_recovery: i32) {
        self.fatigue = (self.fatigue - fatigue_recovery).max(0);
        self.hunger = (self.hunger - hunger_recovery).max(0);
        self.on_mission = false;
    }

    pub fn apply_injury(&mut self, severity: i32) {
        self.health = (self.health - severity).max(0);
    }

    pub fn apply_fatigue(&mut self, amount: i32) {
        self.fatigue = (self.fatigue + amount).clamp(0, HERO_STAT_CAP);
    }

    pub fn apply_hunger(&mut self, amount: i32) {
        self.hunger = (self.hunger + amount).clamp(0, HERO_STAT_CAP);
    }

    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    /// Move `item` into a free slot, handing it back when every slot is taken.
    ///
    /// # Errors
    ///
    /// Returns the item unchanged when the hero has no free slot.
    pub fn equip(&mut self, item: RareItem) -> Result<(), RareItem> {
        if !self.can_equip() {
            return Err(item);
        }
        self.equipment.push(item);
        Ok(())
    }

    /// Remove the item in `slot`, if any.
    pub fn unequip(&mut self, slot: usize) -> Option<RareItem> {
        (slot < self.equipment.len()).then(|| self.equipment.remove(slot))
    }

    /// Days-until-arrival label for display, empty when present.
    #[must_use]
    pub fn arrival_label(&self) -> String {
        match self.arriving_in {
            Some(days) if days > 0 => format!("Arrives in {days} day(s)"),
            _ => String::new(),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::hero;
    use super::*;
    use crate::items::{RareBuffType, RareItemCategory};

    fn trinket(name: &str) -> RareItem {
        RareItem::new(
            name,
            RareBuffType::Rest,
            5,
            "test trinket",
            RareItemCategory::Accessory,
            1,
        )
    }

    #[test]
    fn trait_set_combines_independently() {
        let mut traits = TraitSet::NONE;
        assert!(traits.is_empty());
        assert_eq!(traits.to_string(), "None");

        traits.insert(Trait::Brave);
        traits.insert(Trait::Unlucky);
        assert!(traits.contains(Trait::Brave));
        assert!(traits.contains(Trait::Unlucky));
        assert!(!traits.contains(Trait::Lucky));
        assert_eq!(traits.to_string(), "Brave, Unlucky");

        traits.remove(Trait::Brave);
        assert_eq!(traits, TraitSet::only(Trait::Unlucky));
        assert_eq!((TraitSet::NONE | Trait::Agile | Trait::Sturdy).iter().count(), 2);
    }

    #[test]
    fn predicates_follow_thresholds() {
        let mut h = hero(1, HeroClass::Rogue);
        assert!(h.is_alive());
        assert!(!h.is_exhausted());
        assert!(h.is_available());
        assert!(!h.is_injured());

        h.health = 20;
        assert!(h.is_exhausted());
        assert!(h.is_injured());

        h.health = 50;
        h.fatigue = 100;
        assert!(h.is_exhausted());

        h.fatigue = 0;
        h.hunger = 100;
        assert!(h.is_exhausted());

        h.arriving_in = Some(2);
        assert!(!h.is_available());
        assert_eq!(h.arrival_label(), "Arrives in 2 day(s)");
        h.arriving_in = Some(0);
        assert!(h.is_available());
        assert!(h.arrival_label().is_empty());

        h.health = 0;
        assert!(!h.is_alive());
    }

    #[test]
    fn attrition_clamps_to_bounds() {
        let mut h = hero(2, HeroClass::Warrior);
        h.apply_fatigue(200);
        h.apply_hunger(200);
        assert_eq!(h.fatigue, 120);
        assert_eq!(h.hunger, 120);

        h.apply_fatigue(-500);
        h.apply_hunger(-500);
        assert_eq!(h.fatigue, 0);
        assert_eq!(h.hunger, 0);

        h.apply_injury(500);
        assert_eq!(h.health, 0);
        h.heal(999);
        assert_eq!(h.health, h.max_health);
    }

    #[test]
    fn rest_recovers_and_releases() {
        let mut h = hero(3, HeroClass::Mage);
        h.fatigue = 50;
        h.hunger = 30;
        h.on_mission = true;
        h.rest(20, 10);
        assert_eq!((h.fatigue, h.hunger), (30, 20));
        assert!(!h.on_mission);

        h.fatigue = 5;
        h.hunger = 3;
        h.rest(20, 10);
        assert_eq!((h.fatigue, h.hunger), (0, 0));
    }

    #[test]
    fn equip_respects_slot_limit() {
        let mut h = hero(4, HeroClass::Paladin);
        for idx in 0..3 {
            assert!(h.equip(trinket(&format!("t{idx}"))).is_ok());
        }
        assert!(!h.can_equip());
        let rejected = h.equip(trinket("overflow")).expect_err("slots are full");
        assert_eq!(rejected.name, "overflow");
        assert_eq!(h.equipment_power(), 3);

        let removed = h.unequip(1).expect("slot one is filled");
        assert_eq!(removed.name, "t1");
        assert!(h.unequip(5).is_none());
        assert!(h.can_equip());
    }

    #[test]
    fn class_table_matches_roster_rules() {
        assert_eq!(HeroClass::Berserker.base_health(), 115);
        assert_eq!(HeroClass::Mage.base_fatigue(), 12);
        assert_eq!(HeroClass::Rogue.base_salary(), 7);
        for (idx, class) in HeroClass::ALL.iter().enumerate() {
            assert_eq!(class.index(), idx);
        }
    }
}
