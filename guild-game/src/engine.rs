//! Phase orchestrator owning the guild, the mission board and the random source.
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::constants::{EVENING_FATIGUE_RECOVERY, EVENING_HUNGER_RECOVERY, STARVATION_HUNGER};
use crate::content::{
    build_daily_events, generate_mission_board, recruitment_candidates, starting_armor,
    starting_heroes, starting_weapon,
};
use crate::error::{ConfigError, GameError};
use crate::events::{DailyEvent, EventResolver, apply_daily_event};
use crate::guild::{DefeatReason, GuildState};
use crate::healing::{HealTier, heal_guild_hero};
use crate::hero::{Hero, HeroId};
use crate::merchant::{MerchantOffer, daily_offers, execute_offer};
use crate::mission::{Mission, MissionAssignment, MissionId, Phase};
use crate::numbers::usize_to_i32;
use crate::resolver::MissionResolver;
use crate::resources::ResourceDelta;
use crate::rng::CountingRng;

/// Everything a caller needs to report one phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseResult {
    pub phase: Phase,
    /// Day on which the phase ran.
    pub day: u32,
    pub logs: Vec<String>,
    pub resolved: Vec<MissionAssignment>,
    pub triggered_event: Option<DailyEvent>,
    pub defeat: Option<DefeatReason>,
    pub prosperous: bool,
}

impl PhaseResult {
    fn new(phase: Phase, day: u32) -> Self {
        Self {
            phase,
            day,
            logs: Vec::new(),
            resolved: Vec::new(),
            triggered_event: None,
            defeat: None,
            prosperous: false,
        }
    }

    #[must_use]
    pub const fn is_defeat(&self) -> bool {
        self.defeat.is_some()
    }

    /// Player-facing defeat message, if any.
    #[must_use]
    pub fn defeat_reason(&self) -> Option<&'static str> {
        self.defeat.map(DefeatReason::message)
    }
}

/// A single guild session driven serially by one caller.
#[derive(Debug, Clone)]
pub struct GameEngine<R: RngCore = ChaCha20Rng> {
    guild: GuildState,
    missions: Vec<Mission>,
    daily_events: Vec<DailyEvent>,
    resolver: MissionResolver,
    config: EngineConfig,
    rng: CountingRng<R>,
    defeat: Option<DefeatReason>,
}

impl GameEngine<ChaCha20Rng> {
    /// Engine seeded from OS entropy.
    #[must_use]
    pub fn new(guild: Option<GuildState>) -> Self {
        Self::with_rng(guild, ChaCha20Rng::from_entropy())
    }

    /// Reproducible engine for a fixed seed.
    #[must_use]
    pub fn with_seed(guild: Option<GuildState>, seed: u64) -> Self {
        Self::with_rng(guild, ChaCha20Rng::seed_from_u64(seed))
    }
}

impl<R: RngCore> GameEngine<R> {
    #[must_use]
    pub fn with_rng(guild: Option<GuildState>, rng: R) -> Self {
        Self::build(guild, EngineConfig::default(), rng)
    }

    /// Build with custom tuning.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when `config` fails validation.
    pub fn with_config(
        guild: Option<GuildState>,
        config: EngineConfig,
        rng: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(guild, config, rng))
    }

    fn build(guild: Option<GuildState>, config: EngineConfig, rng: R) -> Self {
        let mut guild = guild.unwrap_or_else(|| GuildState::new(config.starting_resources));
        if guild.heroes.is_empty() {
            for hero in starting_heroes() {
                guild.recruit(hero);
            }
        }
        if guild.rare_item_count() == 0 {
            guild.rare_items.push(starting_weapon());
            guild.rare_items.push(starting_armor());
        }
        let mut engine = Self {
            guild,
            missions: Vec::new(),
            daily_events: build_daily_events(),
            resolver: MissionResolver::new(EventResolver::new(config.random_event_chance)),
            config,
            rng: CountingRng::new(rng),
            defeat: None,
        };
        engine.refresh_missions();
        engine
    }

    #[must_use]
    pub const fn guild(&self) -> &GuildState {
        &self.guild
    }

    /// Direct access for callers that equip items or tweak the roster.
    pub const fn guild_mut(&mut self) -> &mut GuildState {
        &mut self.guild
    }

    /// Today's unassigned missions.
    #[must_use]
    pub fn missions(&self) -> &[Mission] {
        &self.missions
    }

    #[must_use]
    pub fn daily_events(&self) -> &[DailyEvent] {
        &self.daily_events
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Defeat recorded by the last phase, if any.
    #[must_use]
    pub const fn defeat(&self) -> Option<DefeatReason> {
        self.defeat
    }

    /// Draw calls made against the random source so far.
    #[must_use]
    pub const fn rng_draws(&self) -> u64 {
        self.rng.draws()
    }

    /// Replace the board with a fresh one for the current day.
    pub fn refresh_missions(&mut self) {
        self.missions =
            generate_mission_board(&mut self.rng, self.guild.day(), self.config.missions_per_day);
    }

    /// Commit heroes to one of today's missions.
    ///
    /// Heroes that are unknown, dead, still travelling or already on a
    /// mission are dropped. Returns `Ok(None)` when nobody is left, in which
    /// case the board is untouched.
    ///
    /// # Errors
    ///
    /// Returns `GameError::UnknownMission` when `mission_id` is not on the board.
    pub fn assign_mission(
        &mut self,
        mission_id: MissionId,
        heroes: &[HeroId],
    ) -> Result<Option<MissionAssignment>, GameError> {
        let index = self
            .missions
            .iter()
            .position(|mission| mission.id == mission_id)
            .ok_or(GameError::UnknownMission(mission_id))?;

        let mut party: Vec<HeroId> = Vec::with_capacity(heroes.len());
        for id in heroes {
            let eligible = self
                .guild
                .hero(*id)
                .is_some_and(|h| h.is_alive() && h.is_available() && !h.on_mission);
            if eligible && !party.contains(id) {
                party.push(*id);
            }
        }
        if party.is_empty() {
            return Ok(None);
        }

        for hero in self
            .guild
            .heroes
            .iter_mut()
            .filter(|hero| party.contains(&hero.id))
        {
            hero.on_mission = true;
        }
        let mut mission = self.missions.remove(index);
        mission.assigned_heroes.clone_from(&party);
        log::debug!("{} assigned to {} heroes", mission.name, party.len());
        Ok(Some(MissionAssignment::new(mission, party)))
    }

    /// Fresh candidates for hire; they join only through [`Self::recruit`].
    pub fn recruitment_board(&mut self) -> Vec<Hero> {
        recruitment_candidates(
            &mut self.rng,
            self.config.recruitment_board_size,
            self.config.recruit_arrival_days,
        )
    }

    pub fn recruit(&mut self, hero: Hero) {
        log::info!("{} recruited", hero.name);
        self.guild.recruit(hero);
    }

    /// Pay for and apply a healing tier.
    pub fn heal_hero(&mut self, id: HeroId, tier: HealTier) -> bool {
        heal_guild_hero(&mut self.guild, id, tier)
    }

    #[must_use]
    pub fn merchant_offers(&self) -> Vec<MerchantOffer> {
        daily_offers()
    }

    pub fn execute_offer(&mut self, offer: &MerchantOffer) -> bool {
        execute_offer(&mut self.guild, offer)
    }

    /// Run one phase with the assignments due in it.
    ///
    /// Assignments whose mission belongs to another phase are ignored.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Defeated` once a previous phase has flagged defeat.
    pub fn run_phase(
        &mut self,
        phase: Phase,
        assignments: Vec<MissionAssignment>,
    ) -> Result<PhaseResult, GameError> {
        if let Some(reason) = self.defeat {
            return Err(GameError::Defeated { reason });
        }

        let mut result = PhaseResult::new(phase, self.guild.day());
        log::debug!("day {} {phase} begins", result.day);
        match phase {
            Phase::Morning => {
                self.refresh_missions();
                self.handle_morning(&mut result);
            }
            Phase::Afternoon => {
                self.handle_missions(phase, assignments, &mut result);
                self.maybe_trigger_event(&mut result);
            }
            Phase::Evening => {
                self.handle_missions(phase, assignments, &mut result);
                self.handle_evening_recovery(&mut result);
                self.guild.next_day();
            }
        }

        if let Some(reason) = self.guild.check_defeat() {
            log::warn!("guild defeated on day {}: {reason}", result.day);
            result.logs.push(format!("Defeat: {reason}"));
            result.defeat = Some(reason);
            self.defeat = Some(reason);
        }
        result.prosperous = self.guild.is_prosperous();
        Ok(result)
    }

    fn handle_morning(&mut self, result: &mut PhaseResult) {
        for hero in &mut self.guild.heroes {
            match hero.arriving_in {
                Some(days) if days > 1 => hero.arriving_in = Some(days - 1),
                Some(1) => {
                    hero.arriving_in = None;
                    result
                        .logs
                        .push(format!("{} has arrived at the guild!", hero.name));
                }
                Some(_) => hero.arriving_in = None,
                None => {}
            }
        }

        let food_cost = usize_to_i32(
            self.guild
                .heroes
                .iter()
                .filter(|h| h.is_alive() && h.is_available())
                .count(),
        );
        if self.guild.resources.food >= food_cost {
            self.guild.resources.apply(&ResourceDelta::food(-food_cost));
            result.logs.push(format!("Food distributed (-{food_cost})."));
        } else {
            for hero in &mut self.guild.heroes {
                hero.apply_hunger(STARVATION_HUNGER);
            }
            result
                .logs
                .push("Not enough food, the heroes go hungry.".to_string());
        }

        let salary_cost: i32 = self
            .guild
            .heroes
            .iter()
            .filter(|h| h.is_available())
            .map(|h| h.salary)
            .sum();
        self.guild.resources.apply(&ResourceDelta::money(-salary_cost));
        if self.guild.resources.money < 0 {
            self.guild.add_debt(self.guild.resources.money.abs());
        }
        result.logs.push(format!(
            "Salaries paid (-{salary_cost}). Debt: {}.",
            self.guild.debt()
        ));

        for hero in &mut self.guild.heroes {
            hero.on_mission = false;
        }
    }

    fn handle_missions(
        &mut self,
        phase: Phase,
        assignments: Vec<MissionAssignment>,
        result: &mut PhaseResult,
    ) {
        for mut assignment in assignments {
            if assignment.mission.phase != phase || assignment.completed {
                log::debug!(
                    "skipping {} during {phase}",
                    assignment.mission.name
                );
                continue;
            }
            for hero in self
                .guild
                .heroes
                .iter_mut()
                .filter(|hero| assignment.heroes.contains(&hero.id))
            {
                hero.on_mission = true;
            }

            let outcome = self
                .resolver
                .resolve(&assignment, &mut self.guild, &mut self.rng);
            result.logs.push(outcome.summary.clone());
            if let Some(event) = &outcome.random_event {
                result
                    .logs
                    .push(format!("{}: {}", event.title(), event.description()));
            }
            assignment.outcome = Some(outcome);
            assignment.completed = true;
            result.resolved.push(assignment);
        }
    }

    fn maybe_trigger_event(&mut self, result: &mut PhaseResult) {
        if self.daily_events.is_empty() {
            return;
        }
        if self.rng.r#gen::<f64>() >= self.config.daily_event_chance {
            return;
        }
        let event = self.daily_events[self.rng.gen_range(0..self.daily_events.len())].clone();
        apply_daily_event(&event, &mut self.guild);
        log::info!("daily event: {}", event.title);
        result.logs.push(format!("Event: {}.", event.title));
        result.triggered_event = Some(event);
    }

    fn handle_evening_recovery(&mut self, result: &mut PhaseResult) {
        for hero in self.guild.heroes.iter_mut().filter(|h| !h.on_mission) {
            hero.rest(EVENING_FATIGUE_RECOVERY, EVENING_HUNGER_RECOVERY);
        }
        result
            .logs
            .push("End of day: rest and light recovery.".to_string());
    }
}
