//! Rare items: unique equipment pieces granting a passive buff.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Passive effect granted when a rare item drops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RareBuffType {
    /// Restores health.
    Vitality,
    /// Reduces fatigue.
    Rest,
    /// Reduces hunger.
    Satiety,
    /// Grants the Lucky trait permanently.
    Luck,
}

impl RareBuffType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vitality => "Vitality",
            Self::Rest => "Rest",
            Self::Satiety => "Satiety",
            Self::Luck => "Luck",
        }
    }
}

impl fmt::Display for RareBuffType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RareItemCategory {
    Weapon,
    Armor,
    Accessory,
}

/// A rare item. Immutable once built; ownership moves between the guild pool
/// and a hero's equipment slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RareItem {
    pub name: String,
    pub description: String,
    pub buff: RareBuffType,
    pub magnitude: i32,
    pub category: RareItemCategory,
    /// Added to party power while equipped.
    pub power_bonus: i32,
}

impl RareItem {
    #[must_use]
    pub fn new(
        name: &str,
        buff: RareBuffType,
        magnitude: i32,
        description: &str,
        category: RareItemCategory,
        power_bonus: i32,
    ) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            buff,
            magnitude,
            category,
            power_bonus,
        }
    }

    /// Short buff label such as `Vitality (+12)`.
    #[must_use]
    pub fn buff_label(&self) -> String {
        format!("{} (+{})", self.buff, self.magnitude)
    }
}
