//! Daily merchant offers.
use serde::{Deserialize, Serialize};

use crate::guild::GuildState;
use crate::hero::Hero;
use crate::resources::{ResourceDelta, ResourceStock};

/// A priced trade: pay `cost`, receive `gain`, and optionally a recruit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantOffer {
    pub name: String,
    pub description: String,
    pub cost: ResourceDelta,
    pub gain: ResourceDelta,
    #[serde(default)]
    pub recruit: Option<Box<Hero>>,
}

impl MerchantOffer {
    #[must_use]
    pub fn new(name: &str, description: &str, cost: ResourceDelta, gain: ResourceDelta) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            cost,
            gain,
            recruit: None,
        }
    }

    /// Offer whose payload is a hero joining the guild.
    #[must_use]
    pub fn recruit(name: &str, cost: ResourceDelta, hero: Hero) -> Self {
        let description = format!("{} the {} offers their services.", hero.name, hero.class);
        Self {
            name: name.to_string(),
            description,
            cost,
            gain: ResourceDelta::ZERO,
            recruit: Some(Box::new(hero)),
        }
    }
}

/// The fixed three-offer catalogue.
#[must_use]
pub fn daily_offers() -> Vec<MerchantOffer> {
    vec![
        MerchantOffer::new(
            "Food Pack",
            "Travel rations for the whole guild.",
            ResourceDelta::money(-6),
            ResourceDelta::food(8),
        ),
        MerchantOffer::new(
            "Healing Kit",
            "Bandages and tinctures.",
            ResourceDelta::money(-5),
            ResourceDelta::new(0, 0, 2, 0),
        ),
        MerchantOffer::new(
            "Gear Pack",
            "Spare blades, straps and whetstones.",
            ResourceDelta::money(-8),
            ResourceDelta::new(0, 0, 0, 3),
        ),
    ]
}

#[must_use]
pub const fn can_execute_offer(stock: &ResourceStock, offer: &MerchantOffer) -> bool {
    stock.can_afford(&offer.cost)
}

/// Pay, collect, and enlist any recruit. Nothing changes when unaffordable.
pub fn execute_offer(guild: &mut GuildState, offer: &MerchantOffer) -> bool {
    if !can_execute_offer(&guild.resources, offer) {
        return false;
    }
    guild.resources.apply(&offer.cost);
    guild.resources.apply(&offer.gain);
    if let Some(hero) = &offer.recruit {
        guild.recruit(hero.as_ref().clone());
    }
    log::debug!("merchant offer taken: {}", offer.name);
    true
}
