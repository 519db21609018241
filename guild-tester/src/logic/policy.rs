use std::fmt;
use std::str::FromStr;

use guild_game::{
    GameEngine, HealTier, Hero, HeroId, Mission, MissionAssignment, MissionId, party_power,
    success_chance,
};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;

/// Policy interface for automated guild management.
pub trait GuildPolicy {
    /// Name used for logging/debug output.
    fn name(&self) -> &'static str;

    /// Spend resources after morning upkeep. Returns a line per action taken.
    fn morning(&mut self, engine: &mut GameEngine) -> Vec<String>;

    /// Commit heroes to today's missions.
    fn plan(&mut self, engine: &mut GameEngine) -> Vec<MissionAssignment>;
}

#[derive(Debug, Error)]
#[error("unknown strategy `{0}` (expected conservative, balanced, aggressive or all)")]
pub struct UnknownStrategy(String);

/// Built-in play strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameplayStrategy {
    Conservative,
    Balanced,
    Aggressive,
}

impl GameplayStrategy {
    pub const ALL: [Self; 3] = [Self::Conservative, Self::Balanced, Self::Aggressive];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Conservative => "Conservative",
            Self::Balanced => "Balanced",
            Self::Aggressive => "Aggressive",
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Balanced => "balanced",
            Self::Aggressive => "aggressive",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Conservative => "Heals early, stockpiles food, takes one safe mission a day",
            Self::Balanced => "Keeps heroes patched up and runs two reasonable missions",
            Self::Aggressive => "Sends everyone out on the richest jobs and rarely spends",
        }
    }

    #[must_use]
    pub fn create_policy(self, seed: u64) -> Box<dyn GuildPolicy> {
        match self {
            Self::Conservative => Box::new(ConservativePolicy),
            Self::Balanced => Box::new(BalancedPolicy),
            Self::Aggressive => Box::new(AggressivePolicy::new(seed)),
        }
    }
}

impl fmt::Display for GameplayStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GameplayStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownStrategy(s.to_string()))
    }
}

struct ConservativePolicy;
struct BalancedPolicy;

struct AggressivePolicy {
    rng: ChaCha20Rng,
}

impl AggressivePolicy {
    fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

/// Free heroes fit for duty, preferred classes first, then by level.
fn candidates(engine: &GameEngine, mission: &Mission) -> Vec<HeroId> {
    let mut pool: Vec<&Hero> = engine
        .guild()
        .available_heroes()
        .filter(|h| !h.on_mission && !h.is_exhausted())
        .collect();
    pool.sort_by_key(|h| (!mission.prefers(h.class), std::cmp::Reverse(h.level)));
    pool.into_iter().map(|h| h.id).collect()
}

fn party_chance(engine: &GameEngine, mission: &Mission, party: &[HeroId]) -> f64 {
    let members: Vec<&Hero> = party.iter().filter_map(|id| engine.guild().hero(*id)).collect();
    success_chance(party_power(&members, mission), mission.difficulty)
}

/// Heal every living hero under `threshold` percent health with `tier`.
fn heal_below(engine: &mut GameEngine, threshold: i32, tier: HealTier) -> Vec<String> {
    let wounded: Vec<(HeroId, String)> = engine
        .guild()
        .living_heroes()
        .filter(|h| h.health * 100 < h.max_health * threshold)
        .map(|h| (h.id, h.name.clone()))
        .collect();
    wounded
        .into_iter()
        .filter(|(id, _)| engine.heal_hero(*id, tier))
        .map(|(_, name)| format!("Healed {name} ({tier})"))
        .collect()
}

/// Buy food packs until the larder reaches `target` or money runs out.
fn stock_food(engine: &mut GameEngine, target: i32, max_packs: usize) -> Vec<String> {
    let Some(pack) = engine
        .merchant_offers()
        .into_iter()
        .find(|offer| offer.gain.food > 0)
    else {
        return Vec::new();
    };
    let mut actions = Vec::new();
    for _ in 0..max_packs {
        if engine.guild().resources.food >= target || !engine.execute_offer(&pack) {
            break;
        }
        actions.push(format!("Bought {}", pack.name));
    }
    actions
}

fn commit(
    engine: &mut GameEngine,
    mission_id: MissionId,
    party: &[HeroId],
    out: &mut Vec<MissionAssignment>,
) {
    match engine.assign_mission(mission_id, party) {
        Ok(Some(assignment)) => out.push(assignment),
        Ok(None) => {}
        Err(err) => log::warn!("assignment rejected: {err}"),
    }
}

impl GuildPolicy for ConservativePolicy {
    fn name(&self) -> &'static str {
        "Conservative"
    }

    fn morning(&mut self, engine: &mut GameEngine) -> Vec<String> {
        let mut actions = heal_below(engine, 60, HealTier::Major);
        actions.extend(heal_below(engine, 60, HealTier::Minor));
        actions.extend(stock_food(engine, 30, 3));
        actions
    }

    fn plan(&mut self, engine: &mut GameEngine) -> Vec<MissionAssignment> {
        let view: &GameEngine = engine;
        let best = view
            .missions()
            .iter()
            .map(|m| {
                let party: Vec<HeroId> = candidates(view, m).into_iter().take(3).collect();
                (m.id, party_chance(view, m, &party), party)
            })
            .filter(|(_, chance, party)| !party.is_empty() && *chance >= 0.7)
            .max_by(|a, b| a.1.total_cmp(&b.1));
        let mut out = Vec::new();
        if let Some((id, _, party)) = best {
            commit(engine, id, &party, &mut out);
        }
        out
    }
}

impl GuildPolicy for BalancedPolicy {
    fn name(&self) -> &'static str {
        "Balanced"
    }

    fn morning(&mut self, engine: &mut GameEngine) -> Vec<String> {
        let mut actions = heal_below(engine, 40, HealTier::Minor);
        actions.extend(stock_food(engine, 15, 2));
        actions
    }

    fn plan(&mut self, engine: &mut GameEngine) -> Vec<MissionAssignment> {
        let mut out = Vec::new();
        let board: Vec<MissionId> = engine.missions().iter().map(|m| m.id).collect();
        for id in board {
            if out.len() >= 2 {
                break;
            }
            let Some(mission) = engine.missions().iter().find(|m| m.id == id) else {
                continue;
            };
            let party: Vec<HeroId> = candidates(engine, mission).into_iter().take(2).collect();
            if party.is_empty() || party_chance(engine, mission, &party) < 0.5 {
                continue;
            }
            commit(engine, id, &party, &mut out);
        }
        out
    }
}

impl GuildPolicy for AggressivePolicy {
    fn name(&self) -> &'static str {
        "Aggressive"
    }

    fn morning(&mut self, engine: &mut GameEngine) -> Vec<String> {
        let mut actions = heal_below(engine, 25, HealTier::Minor);
        actions.extend(stock_food(engine, 8, 1));
        actions
    }

    fn plan(&mut self, engine: &mut GameEngine) -> Vec<MissionAssignment> {
        let mut board: Vec<(MissionId, i32)> = engine
            .missions()
            .iter()
            .map(|m| (m.id, m.reward.money))
            .collect();
        board.sort_by_key(|(_, money)| std::cmp::Reverse(*money));

        let mut out = Vec::new();
        for (id, _) in board {
            let mut free: Vec<HeroId> = engine
                .guild()
                .available_heroes()
                .filter(|h| !h.on_mission)
                .map(|h| h.id)
                .collect();
            if free.is_empty() {
                break;
            }
            free.shuffle(&mut self.rng);
            free.truncate(2);
            commit(engine, id, &free, &mut out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guild_game::Phase;

    #[test]
    fn strategies_parse_by_key() {
        assert_eq!(
            "Balanced".parse::<GameplayStrategy>().ok(),
            Some(GameplayStrategy::Balanced)
        );
        assert!("reckless".parse::<GameplayStrategy>().is_err());
        for strategy in GameplayStrategy::ALL {
            assert_eq!(strategy.key().parse::<GameplayStrategy>().ok(), Some(strategy));
            assert_eq!(strategy.create_policy(1).name(), strategy.label());
        }
    }

    #[test]
    fn plans_only_use_free_heroes_once() {
        for strategy in GameplayStrategy::ALL {
            let mut engine = GameEngine::with_seed(None, 31);
            engine.run_phase(Phase::Morning, Vec::new()).expect("day one");
            let mut policy = strategy.create_policy(31);
            policy.morning(&mut engine);
            let plan = policy.plan(&mut engine);

            let mut seen: Vec<HeroId> = Vec::new();
            for assignment in &plan {
                assert!(!assignment.heroes.is_empty());
                for id in &assignment.heroes {
                    assert!(!seen.contains(id), "{strategy}: hero sent twice");
                    seen.push(*id);
                }
            }
            assert_eq!(engine.missions().len(), 5 - plan.len());
        }
    }

    #[test]
    fn conservative_restocks_food() {
        let mut engine = GameEngine::with_seed(None, 4);
        engine.guild_mut().resources.food = 5;
        let actions = ConservativePolicy.morning(&mut engine);
        assert_eq!(actions.len(), 3);
        assert_eq!(engine.guild().resources.food, 29);
    }

    #[test]
    fn wounded_heroes_get_patched_up() {
        let mut engine = GameEngine::with_seed(None, 4);
        engine.guild_mut().heroes[0].health = 10;
        let actions = BalancedPolicy.morning(&mut engine);
        assert_eq!(actions.len(), 1);
        assert_eq!(engine.guild().heroes[0].health, 35);
    }
}
