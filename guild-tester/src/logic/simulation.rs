use guild_game::{
    DefeatReason, GameEngine, GameError, GuildState, MissionAssignment, Phase, PhaseResult,
    ResourceStock,
};
use serde::Serialize;

use crate::logic::policy::{GameplayStrategy, GuildPolicy};

const STAT_CAP: i32 = 120;
const EQUIP_SLOTS: usize = 3;

/// Configuration for a single seeded campaign.
#[derive(Debug, Clone, Copy)]
pub struct CampaignConfig {
    pub seed: u64,
    pub strategy: GameplayStrategy,
    pub max_days: u32,
    pub verbose: bool,
}

impl CampaignConfig {
    #[must_use]
    pub const fn new(strategy: GameplayStrategy, seed: u64) -> Self {
        Self {
            seed,
            strategy,
            max_days: 30,
            verbose: false,
        }
    }

    #[must_use]
    pub const fn with_max_days(mut self, max_days: u32) -> Self {
        self.max_days = max_days;
        self
    }

    #[must_use]
    pub const fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Summary of one finished campaign.
#[derive(Debug, Clone, Serialize)]
pub struct CampaignReport {
    pub strategy: String,
    pub seed: u64,
    pub days_survived: u32,
    pub defeat: Option<DefeatReason>,
    pub defeat_message: Option<String>,
    pub missions_won: usize,
    pub missions_lost: usize,
    pub heroes_alive: usize,
    pub heroes_total: usize,
    pub rare_items: usize,
    pub final_resources: ResourceStock,
    pub debt: i32,
    pub prosperous: bool,
    pub rng_draws: u64,
    pub violations: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub log: Vec<String>,
}

impl CampaignReport {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    #[must_use]
    pub fn missions_total(&self) -> usize {
        self.missions_won + self.missions_lost
    }
}

/// Tracks values that must only move in one direction across phases.
#[derive(Debug, Clone)]
pub struct InvariantTracker {
    day: u32,
    rare_items: usize,
}

impl InvariantTracker {
    #[must_use]
    pub fn new(guild: &GuildState) -> Self {
        Self {
            day: guild.day(),
            rare_items: guild.rare_item_count(),
        }
    }

    /// Check the guild after `phase` and remember the new baseline.
    pub fn check(&mut self, phase: Phase, guild: &GuildState) -> Vec<String> {
        let mut violations = Vec::new();
        let expected_day = if phase == Phase::Evening {
            self.day + 1
        } else {
            self.day
        };
        if guild.day() != expected_day {
            violations.push(format!(
                "day is {} after {phase}, expected {expected_day}",
                guild.day()
            ));
        }

        for hero in &guild.heroes {
            if !(0..=hero.max_health).contains(&hero.health) {
                violations.push(format!(
                    "{} health {} outside 0..={}",
                    hero.name, hero.health, hero.max_health
                ));
            }
            if !(0..=STAT_CAP).contains(&hero.fatigue) {
                violations.push(format!("{} fatigue {} out of range", hero.name, hero.fatigue));
            }
            if !(0..=STAT_CAP).contains(&hero.hunger) {
                violations.push(format!("{} hunger {} out of range", hero.name, hero.hunger));
            }
            if hero.equipment.len() > EQUIP_SLOTS {
                violations.push(format!(
                    "{} carries {} rare items",
                    hero.name,
                    hero.equipment.len()
                ));
            }
        }

        let items = guild.rare_item_count();
        if items < self.rare_items {
            violations.push(format!(
                "rare items dropped from {} to {items} during {phase}",
                self.rare_items
            ));
        }

        self.day = guild.day();
        self.rare_items = items;
        violations
    }
}

/// Drives one engine through a policy until defeat or the day cap.
pub struct CampaignRunner {
    config: CampaignConfig,
    engine: GameEngine,
    policy: Box<dyn GuildPolicy>,
    tracker: InvariantTracker,
    report: CampaignReport,
}

impl CampaignRunner {
    #[must_use]
    pub fn new(config: CampaignConfig) -> Self {
        let engine = GameEngine::with_seed(None, config.seed);
        let tracker = InvariantTracker::new(engine.guild());
        let report = CampaignReport {
            strategy: config.strategy.label().to_string(),
            seed: config.seed,
            days_survived: 0,
            defeat: None,
            defeat_message: None,
            missions_won: 0,
            missions_lost: 0,
            heroes_alive: 0,
            heroes_total: 0,
            rare_items: 0,
            final_resources: engine.guild().resources,
            debt: 0,
            prosperous: false,
            rng_draws: 0,
            violations: Vec::new(),
            log: Vec::new(),
        };
        Self {
            policy: config.strategy.create_policy(config.seed),
            config,
            engine,
            tracker,
            report,
        }
    }

    pub fn run(mut self) -> CampaignReport {
        log::info!(
            "campaign {} seed {} starting",
            self.policy.name(),
            self.config.seed
        );
        while self.engine.guild().day() <= self.config.max_days {
            match self.play_day() {
                Ok(true) => {}
                Ok(false) => break,
                Err(err) => {
                    self.report.violations.push(format!("engine error: {err}"));
                    break;
                }
            }
        }
        self.finish()
    }

    /// Walks one full phase cycle. Returns `Ok(false)` once the guild has fallen.
    fn play_day(&mut self) -> Result<bool, GameError> {
        let mut phase = Phase::Morning;
        let mut planned: Vec<MissionAssignment> = Vec::new();
        loop {
            let (due, later): (Vec<MissionAssignment>, Vec<MissionAssignment>) = planned
                .into_iter()
                .partition(|a| a.mission.phase == phase);
            planned = later;
            if !self.step(phase, due)? {
                return Ok(false);
            }
            if phase == Phase::Morning {
                planned = self.plan_day();
            }
            phase = phase.next();
            if phase == Phase::Morning {
                return Ok(true);
            }
        }
    }

    /// Let the policy spend and commit heroes after morning upkeep.
    fn plan_day(&mut self) -> Vec<MissionAssignment> {
        let actions = self.policy.morning(&mut self.engine);
        let plan = self.policy.plan(&mut self.engine);
        if self.config.verbose {
            let day = self.engine.guild().day();
            self.report
                .log
                .extend(actions.into_iter().map(|a| format!("[day {day}] {a}")));
        }
        plan
    }

    fn step(
        &mut self,
        phase: Phase,
        assignments: Vec<MissionAssignment>,
    ) -> Result<bool, GameError> {
        let result = self.engine.run_phase(phase, assignments)?;
        self.record(&result);
        let violations = self.tracker.check(phase, self.engine.guild());
        for violation in violations {
            log::error!("seed {}: {violation}", self.config.seed);
            self.report
                .violations
                .push(format!("day {} {phase}: {violation}", result.day));
        }
        Ok(!result.is_defeat())
    }

    fn record(&mut self, result: &PhaseResult) {
        for assignment in &result.resolved {
            match assignment.outcome.as_ref().map(|o| o.success) {
                Some(true) => self.report.missions_won += 1,
                Some(false) => self.report.missions_lost += 1,
                None => {}
            }
        }
        if let Some(reason) = result.defeat {
            self.report.defeat = Some(reason);
            self.report.defeat_message = Some(reason.message().to_string());
        }
        if self.config.verbose {
            let prefix = format!("[day {} {}]", result.day, result.phase);
            self.report
                .log
                .extend(result.logs.iter().map(|line| format!("{prefix} {line}")));
        }
    }

    fn finish(mut self) -> CampaignReport {
        let guild = self.engine.guild();
        self.report.days_survived = guild.day().saturating_sub(1);
        self.report.heroes_alive = guild.living_heroes().count();
        self.report.heroes_total = guild.heroes.len();
        self.report.rare_items = guild.rare_item_count();
        self.report.final_resources = guild.resources;
        self.report.debt = guild.debt();
        self.report.prosperous = guild.is_prosperous();
        self.report.rng_draws = self.engine.rng_draws();
        self.report
    }
}

/// Run every strategy against every seed.
#[must_use]
pub fn run_campaigns(
    strategies: &[GameplayStrategy],
    seeds: &[u64],
    max_days: u32,
    verbose: bool,
) -> Vec<CampaignReport> {
    let mut reports = Vec::with_capacity(strategies.len() * seeds.len());
    for strategy in strategies {
        for seed in seeds {
            let config = CampaignConfig::new(*strategy, *seed)
                .with_max_days(max_days)
                .with_verbose(verbose);
            reports.push(CampaignRunner::new(config).run());
        }
    }
    reports
}
