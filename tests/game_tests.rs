//! Level progression, command dispatch, and level decoding

use road_paver::simulation::{
    builtin_levels, Command, Event, Game, GridCoord, LevelDefinition, LevelError, Outcome, Phase,
    SimError, ToggleOutcome,
};

fn tiny_level() -> LevelDefinition {
    LevelDefinition {
        name: "tiny".to_string(),
        layout: vec![vec![80, 1, 90]],
        max_tiles: 5,
        max_turns: 5,
    }
}

fn run_to_resolution(game: &mut Game) -> u32 {
    let mut ticks = 0;
    while game.episode().phase() == Phase::Simulating {
        game.tick();
        ticks += 1;
        assert!(ticks < 1000, "simulation did not resolve");
    }
    ticks
}

#[test]
fn campaign_loads_with_only_the_first_level_unlocked() {
    let game = Game::with_campaign().expect("campaign should load");
    assert_eq!(game.level_count(), 4);
    assert!(game.is_unlocked(0));
    for index in 1..game.level_count() {
        assert!(!game.is_unlocked(index), "level {} should be locked", index);
    }
    assert_eq!(game.episode().phase(), Phase::Editing);
}

#[test]
fn builtin_levels_all_decode() {
    for def in builtin_levels() {
        let decoded = def.decode().unwrap_or_else(|e| panic!("{}: {}", def.name, e));
        assert!(!decoded.cars.is_empty(), "{} has no cars", def.name);
    }
}

#[test]
fn solving_the_first_level_unlocks_and_advances() {
    let mut game = Game::with_campaign().expect("campaign should load");

    // Car 0: (2, 0) -> (14, 2). Car 1: (1, 4) -> (14, 4). 25 of 30 tiles.
    for x in 3..=14 {
        game.toggle_tile(GridCoord::new(x, 0)).expect("in bounds");
    }
    game.toggle_tile(GridCoord::new(14, 1)).expect("in bounds");
    for x in 2..=13 {
        game.toggle_tile(GridCoord::new(x, 4)).expect("in bounds");
    }
    assert_eq!(game.episode().grid().tiles_used(), 25);

    let plans = game.start_simulation().expect("start should succeed");
    assert_eq!(plans.len(), 2);
    assert!(plans.iter().all(|p| p.is_routable()), "both cars routable");

    let ticks = run_to_resolution(&mut game);
    assert_eq!(game.episode().outcome(), Outcome::Success);
    assert_eq!(ticks, 14, "success lands on the longest route length");

    assert!(game.is_unlocked(1), "success unlocks the next level");
    game.advance_level().expect("advance after success");
    assert_eq!(game.current_level(), 1);
    assert_eq!(game.episode().phase(), Phase::Editing);
    assert_eq!(game.episode().level_name(), "Level 2");
}

#[test]
fn advance_requires_a_resolved_success() {
    let mut game = Game::with_campaign().expect("campaign should load");
    assert_eq!(game.advance_level(), Err(SimError::AdvanceWithoutSuccess));

    // Still not allowed mid-simulation.
    game.start_simulation().expect("start should succeed");
    assert_eq!(game.advance_level(), Err(SimError::AdvanceWithoutSuccess));
}

#[test]
fn advance_past_the_last_level_is_refused() {
    let mut game = Game::new(vec![tiny_level()]).expect("game should load");
    game.start_simulation().expect("start should succeed");
    run_to_resolution(&mut game);
    assert_eq!(game.episode().outcome(), Outcome::Success);
    assert_eq!(game.advance_level(), Err(SimError::NoNextLevel));
}

#[test]
fn locked_and_unknown_levels_cannot_be_selected() {
    let mut game = Game::with_campaign().expect("campaign should load");
    assert_eq!(game.select_level(2), Err(SimError::LevelLocked { index: 2 }));
    assert_eq!(
        game.select_level(9),
        Err(SimError::UnknownLevel { index: 9, count: 4 })
    );
    // Re-selecting the current level is a fresh reload, always allowed.
    assert!(game.select_level(0).is_ok());
}

#[test]
fn reset_discards_everything_back_to_editing() {
    let mut game = Game::new(vec![tiny_level()]).expect("game should load");
    let extra = GridCoord::new(1, 0);
    // Remove the pre-placed road, then run the (now unroutable) level.
    assert_eq!(
        game.toggle_tile(extra),
        Ok(ToggleOutcome::Removed { tiles_used: 0 })
    );
    game.start_simulation().expect("start should succeed");
    run_to_resolution(&mut game);
    assert!(matches!(game.episode().outcome(), Outcome::Fail(_)));

    game.reset().expect("reset should reload the level");
    assert_eq!(game.episode().phase(), Phase::Editing);
    assert_eq!(game.episode().outcome(), Outcome::InProgress);
    assert_eq!(game.episode().turns_left(), 5);
    assert_eq!(game.episode().grid().tiles_used(), 1, "pre-placed road is back");
}

#[test]
fn commands_drive_the_game_like_the_named_methods() {
    let mut game = Game::new(vec![tiny_level(), tiny_level()]).expect("game should load");

    let event = game
        .dispatch(Command::ToggleTile(GridCoord::new(1, 0)))
        .expect("toggle command");
    assert_eq!(
        event,
        Event::TileToggled(ToggleOutcome::Removed { tiles_used: 0 })
    );

    let event = game.dispatch(Command::Reset).expect("reset command");
    assert_eq!(event, Event::LevelLoaded { index: 0 });

    let event = game
        .dispatch(Command::StartSimulation)
        .expect("start command");
    match event {
        Event::RoutesPlanned(plans) => assert_eq!(plans.len(), 1),
        other => panic!("expected RoutesPlanned, got {:?}", other),
    }

    let mut outcome = Outcome::InProgress;
    for _ in 0..5 {
        match game.dispatch(Command::Tick).expect("tick command") {
            Event::Ticked { outcome: o, .. } => outcome = o,
            other => panic!("expected Ticked, got {:?}", other),
        }
        if outcome != Outcome::InProgress {
            break;
        }
    }
    assert_eq!(outcome, Outcome::Success);

    let event = game.dispatch(Command::AdvanceLevel).expect("advance command");
    assert_eq!(event, Event::LevelLoaded { index: 1 });
}

#[test]
fn malformed_levels_are_rejected_at_decode_time() {
    let ragged = LevelDefinition {
        name: "ragged".to_string(),
        layout: vec![vec![80, 0, 90], vec![0, 0]],
        max_tiles: 5,
        max_turns: 5,
    };
    assert_eq!(
        ragged.decode().unwrap_err(),
        LevelError::RaggedRow {
            row: 1,
            expected: 3,
            found: 2,
        }
    );

    let unknown = LevelDefinition {
        name: "unknown".to_string(),
        layout: vec![vec![80, 7, 90]],
        max_tiles: 5,
        max_turns: 5,
    };
    assert_eq!(
        unknown.decode().unwrap_err(),
        LevelError::UnknownCellCode { code: 7, x: 1, y: 0 }
    );

    let unbound = LevelDefinition {
        name: "unbound".to_string(),
        layout: vec![vec![80, 0, 91]],
        max_tiles: 5,
        max_turns: 5,
    };
    assert!(matches!(
        unbound.decode().unwrap_err(),
        LevelError::UnboundCar { .. }
    ));

    let over_budget = LevelDefinition {
        name: "over".to_string(),
        layout: vec![vec![80, 1, 1, 90]],
        max_tiles: 1,
        max_turns: 5,
    };
    assert_eq!(
        over_budget.decode().unwrap_err(),
        LevelError::RoadsOverBudget {
            roads: 2,
            max_tiles: 1,
        }
    );

    let empty = LevelDefinition {
        name: "empty".to_string(),
        layout: vec![],
        max_tiles: 5,
        max_turns: 5,
    };
    assert_eq!(empty.decode().unwrap_err(), LevelError::EmptyLayout);
}

#[test]
fn level_packs_load_from_json() {
    let raw = r#"[
        {
            "name": "Custom",
            "layout": [[80, 1, 1, 90]],
            "max_tiles": 5,
            "max_turns": 5
        }
    ]"#;
    let levels: Vec<LevelDefinition> = serde_json::from_str(raw).expect("pack should parse");
    let mut game = Game::new(levels).expect("game should load");
    game.start_simulation().expect("start should succeed");
    run_to_resolution(&mut game);
    assert_eq!(game.episode().outcome(), Outcome::Success);
}
