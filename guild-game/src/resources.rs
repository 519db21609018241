//! Guild resource ledger.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Neg};

/// Signed change across the four fungible resources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceDelta {
    #[serde(default)]
    pub money: i32,
    #[serde(default)]
    pub food: i32,
    #[serde(default)]
    pub medicine: i32,
    #[serde(default)]
    pub equipment: i32,
}

impl ResourceDelta {
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    #[must_use]
    pub const fn new(money: i32, food: i32, medicine: i32, equipment: i32) -> Self {
        Self {
            money,
            food,
            medicine,
            equipment,
        }
    }

    #[must_use]
    pub const fn money(money: i32) -> Self {
        Self::new(money, 0, 0, 0)
    }

    #[must_use]
    pub const fn food(food: i32) -> Self {
        Self::new(0, food, 0, 0)
    }

    /// True when no field would increase a stock (a pure cost).
    #[must_use]
    pub const fn is_cost(&self) -> bool {
        self.money <= 0 && self.food <= 0 && self.medicine <= 0 && self.equipment <= 0
    }

    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.money == 0 && self.food == 0 && self.medicine == 0 && self.equipment == 0
    }
}

impl Add for ResourceDelta {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            money: self.money + rhs.money,
            food: self.food + rhs.food,
            medicine: self.medicine + rhs.medicine,
            equipment: self.equipment + rhs.equipment,
        }
    }
}

impl Neg for ResourceDelta {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            money: -self.money,
            food: -self.food,
            medicine: -self.medicine,
            equipment: -self.equipment,
        }
    }
}

impl fmt::Display for ResourceDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Gold {:+}, Food {:+}, Medicine {:+}, Equip {:+}",
            self.money, self.food, self.medicine, self.equipment
        )
    }
}

/// Current holdings of the guild.
///
/// Money is the only field allowed to dip below zero (unpaid salaries and
/// mission penalties); every other field is kept non-negative by callers
/// checking [`ResourceStock::can_afford`] first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceStock {
    pub money: i32,
    pub food: i32,
    pub medicine: i32,
    pub equipment: i32,
}

impl ResourceStock {
    #[must_use]
    pub const fn new(money: i32, food: i32, medicine: i32, equipment: i32) -> Self {
        Self {
            money,
            food,
            medicine,
            equipment,
        }
    }

    /// Whether applying `delta` would leave every field at zero or above.
    #[must_use]
    pub const fn can_afford(&self, delta: &ResourceDelta) -> bool {
        self.money + delta.money >= 0
            && self.food + delta.food >= 0
            && self.medicine + delta.medicine >= 0
            && self.equipment + delta.equipment >= 0
    }

    /// Add `delta` to every field without any affordability check.
    pub const fn apply(&mut self, delta: &ResourceDelta) {
        self.money += delta.money;
        self.food += delta.food;
        self.medicine += delta.medicine;
        self.equipment += delta.equipment;
    }
}

impl Default for ResourceStock {
    fn default() -> Self {
        Self::new(200, 60, 20, 15)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn apply_then_negated_apply_restores_stock() {
        let mut rng = ChaCha20Rng::seed_from_u64(0x1ED6E5);
        for _ in 0..256 {
            let mut stock = ResourceStock::new(
                rng.gen_range(-50..300),
                rng.gen_range(0..100),
                rng.gen_range(0..40),
                rng.gen_range(0..40),
            );
            let before = stock;
            let delta = ResourceDelta::new(
                rng.gen_range(-100..100),
                rng.gen_range(-100..100),
                rng.gen_range(-100..100),
                rng.gen_range(-100..100),
            );
            stock.apply(&delta);
            stock.apply(&-delta);
            assert_eq!(stock, before);
        }
    }

    #[test]
    fn can_afford_matches_post_delta_state() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        for _ in 0..256 {
            let stock = ResourceStock::new(
                rng.gen_range(0..30),
                rng.gen_range(0..30),
                rng.gen_range(0..30),
                rng.gen_range(0..30),
            );
            let delta = ResourceDelta::new(
                rng.gen_range(-40..10),
                rng.gen_range(-40..10),
                rng.gen_range(-40..10),
                rng.gen_range(-40..10),
            );
            let mut after = stock;
            after.apply(&delta);
            let expected =
                after.money >= 0 && after.food >= 0 && after.medicine >= 0 && after.equipment >= 0;
            assert_eq!(stock.can_afford(&delta), expected);
        }
    }

    #[test]
    fn exact_balance_is_affordable() {
        let stock = ResourceStock::new(5, 0, 1, 0);
        assert!(stock.can_afford(&ResourceDelta::new(-5, 0, -1, 0)));
        assert!(!stock.can_afford(&ResourceDelta::new(-6, 0, 0, 0)));
        assert!(!stock.can_afford(&ResourceDelta::food(-1)));
    }

    #[test]
    fn delta_helpers_and_display() {
        let total = ResourceDelta::money(10) + ResourceDelta::food(-3);
        assert_eq!(total, ResourceDelta::new(10, -3, 0, 0));
        assert!(ResourceDelta::new(-5, 0, -1, 0).is_cost());
        assert!(!total.is_cost());
        assert!(ResourceDelta::ZERO.is_zero());
        assert_eq!(
            total.to_string(),
            "Gold +10, Food -3, Medicine +0, Equip +0"
        );
    }

    #[test]
    fn default_stock_matches_new_guild() {
        assert_eq!(ResourceStock::default(), ResourceStock::new(200, 60, 20, 15));
    }
}
