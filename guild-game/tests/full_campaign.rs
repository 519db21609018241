use guild_game::{
    DefeatReason, GameEngine, GameError, HealTier, HeroId, MissionAssignment, Phase, PhaseResult,
};

/// Send every free hero on the first mission of each phase, heal when hurt.
fn play_day(engine: &mut GameEngine) -> Result<Vec<PhaseResult>, GameError> {
    let mut results = vec![engine.run_phase(Phase::Morning, Vec::new())?];
    if engine.defeat().is_some() {
        return Ok(results);
    }

    let injured: Vec<HeroId> = engine
        .guild()
        .living_heroes()
        .filter(|h| h.health < h.max_health / 2)
        .map(|h| h.id)
        .collect();
    for id in injured {
        engine.heal_hero(id, HealTier::Minor);
    }

    let mut afternoon: Vec<MissionAssignment> = Vec::new();
    let mut evening: Vec<MissionAssignment> = Vec::new();
    let picks: Vec<_> = engine
        .missions()
        .iter()
        .take(2)
        .map(|m| (m.id, m.phase))
        .collect();
    for (mission_id, phase) in picks {
        let free: Vec<HeroId> = engine
            .guild()
            .available_heroes()
            .filter(|h| !h.on_mission && !h.is_exhausted())
            .take(2)
            .map(|h| h.id)
            .collect();
        if let Some(assignment) = engine.assign_mission(mission_id, &free)? {
            match phase {
                Phase::Evening => evening.push(assignment),
                _ => afternoon.push(assignment),
            }
        }
    }

    results.push(engine.run_phase(Phase::Afternoon, afternoon)?);
    if engine.defeat().is_some() {
        return Ok(results);
    }
    results.push(engine.run_phase(Phase::Evening, evening)?);
    Ok(results)
}

fn run_campaign(seed: u64, max_days: u32) -> (GameEngine, Vec<PhaseResult>) {
    let mut engine = GameEngine::with_seed(None, seed);
    let mut history = Vec::new();
    while engine.guild().day() <= max_days && engine.defeat().is_none() {
        let day = play_day(&mut engine).unwrap();
        history.extend(day);
    }
    (engine, history)
}

#[test]
fn seeded_campaigns_are_reproducible() {
    let (a, history_a) = run_campaign(0xC0FFEE, 20);
    let (b, history_b) = run_campaign(0xC0FFEE, 20);
    assert_eq!(history_a, history_b);
    assert_eq!(a.guild(), b.guild());
    assert_eq!(a.rng_draws(), b.rng_draws());
}

#[test]
fn campaign_respects_hero_bounds_every_phase() {
    for seed in [1_u64, 7, 42, 99] {
        let mut engine = GameEngine::with_seed(None, seed);
        let mut items = engine.guild().rare_item_count();
        while engine.guild().day() <= 15 && engine.defeat().is_none() {
            let before = engine.guild().day();
            let results = play_day(&mut engine).unwrap();
            for result in &results {
                for hero in &engine.guild().heroes {
                    assert!((0..=hero.max_health).contains(&hero.health));
                    assert!((0..=120).contains(&hero.fatigue));
                    assert!((0..=120).contains(&hero.hunger));
                    assert!(hero.equipment.len() <= 3);
                }
                assert!(result.day == before);
            }
            let count = engine.guild().rare_item_count();
            assert!(count >= items, "rare items were lost");
            items = count;
            if engine.defeat().is_none() {
                assert_eq!(engine.guild().day(), before + 1);
            }
        }
    }
}

#[test]
fn defeated_engine_refuses_more_phases() {
    let mut engine = GameEngine::with_seed(None, 3);
    engine.guild_mut().resources.food = 0;
    let morning = engine.run_phase(Phase::Morning, Vec::new()).unwrap();
    assert_eq!(morning.defeat, Some(DefeatReason::OutOfFood));
    assert!(morning.logs.iter().any(|l| l.starts_with("Defeat:")));
    assert!(matches!(
        engine.run_phase(Phase::Afternoon, Vec::new()),
        Err(GameError::Defeated { .. })
    ));
}

#[test]
fn reroll_replaces_the_whole_board() {
    let mut engine = GameEngine::with_seed(None, 11);
    let before: Vec<_> = engine.missions().iter().map(|m| m.id).collect();
    let day = engine.guild().day();
    let money = engine.guild().resources.money;
    engine.refresh_missions();
    let after: Vec<_> = engine.missions().iter().map(|m| m.id).collect();
    assert_eq!(after.len(), 5);
    assert_ne!(before, after);
    assert_eq!(engine.guild().day(), day);
    assert_eq!(engine.guild().resources.money, money);
}
