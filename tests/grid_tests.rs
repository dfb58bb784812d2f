//! Grid editing rules: what the player may toggle and when

use road_paver::simulation::{
    CellKind, Episode, GridCoord, LevelDefinition, SimError, ToggleOutcome,
};

fn level(layout: Vec<Vec<u8>>, max_tiles: u32, max_turns: u32) -> LevelDefinition {
    LevelDefinition {
        name: "test".to_string(),
        layout,
        max_tiles,
        max_turns,
    }
}

#[test]
fn toggle_places_and_removes_roads() {
    let def = level(vec![vec![80, 0, 0, 90]], 5, 10);
    let mut episode = Episode::load(&def).expect("level should load");

    let coord = GridCoord::new(1, 0);
    assert_eq!(
        episode.toggle_tile(coord),
        Ok(ToggleOutcome::Placed { tiles_used: 1 })
    );
    assert_eq!(episode.grid().kind(coord), Some(CellKind::Road));

    assert_eq!(
        episode.toggle_tile(coord),
        Ok(ToggleOutcome::Removed { tiles_used: 0 })
    );
    assert_eq!(episode.grid().kind(coord), Some(CellKind::Empty));
}

#[test]
fn toggle_at_full_budget_is_a_no_op() {
    let def = level(vec![vec![80, 0, 0, 90]], 1, 10);
    let mut episode = Episode::load(&def).expect("level should load");

    assert_eq!(
        episode.toggle_tile(GridCoord::new(1, 0)),
        Ok(ToggleOutcome::Placed { tiles_used: 1 })
    );

    // Budget exhausted: count and cell must both stay unchanged.
    let blocked = GridCoord::new(2, 0);
    assert_eq!(episode.toggle_tile(blocked), Ok(ToggleOutcome::Rejected));
    assert_eq!(episode.grid().tiles_used(), 1);
    assert_eq!(episode.grid().kind(blocked), Some(CellKind::Empty));

    // Removal is still allowed at full budget.
    assert_eq!(
        episode.toggle_tile(GridCoord::new(1, 0)),
        Ok(ToggleOutcome::Removed { tiles_used: 0 })
    );
}

#[test]
fn fixed_cells_are_never_editable() {
    let def = level(vec![vec![80, 4, 90, 0]], 5, 10);
    let mut episode = Episode::load(&def).expect("level should load");

    // Obstacle, destination, and the cell under the car spawn.
    for x in [1, 2, 0] {
        let coord = GridCoord::new(x, 0);
        let before = episode.grid().kind(coord);
        assert_eq!(episode.toggle_tile(coord), Ok(ToggleOutcome::Rejected));
        assert_eq!(episode.grid().kind(coord), before, "cell {} changed", x);
    }
    assert_eq!(episode.grid().tiles_used(), 0);
}

#[test]
fn out_of_bounds_toggle_is_rejected_before_the_grid() {
    let def = level(vec![vec![80, 0, 90]], 5, 10);
    let mut episode = Episode::load(&def).expect("level should load");

    for coord in [
        GridCoord::new(-1, 0),
        GridCoord::new(0, -1),
        GridCoord::new(3, 0),
        GridCoord::new(0, 1),
    ] {
        assert_eq!(
            episode.toggle_tile(coord),
            Err(SimError::InvalidCoordinate {
                coord,
                width: 3,
                height: 1,
            })
        );
    }
}

#[test]
fn preplaced_roads_count_against_the_budget() {
    let def = level(vec![vec![80, 1, 1, 90]], 3, 10);
    let mut episode = Episode::load(&def).expect("level should load");
    assert_eq!(episode.grid().tiles_used(), 2);
    assert_eq!(episode.grid().max_tiles(), 3);

    // Removing a pre-placed road frees budget like any other tile.
    assert_eq!(
        episode.toggle_tile(GridCoord::new(1, 0)),
        Ok(ToggleOutcome::Removed { tiles_used: 1 })
    );
}

#[test]
fn editing_is_only_allowed_before_the_simulation() {
    let def = level(vec![vec![80, 1, 90]], 5, 10);
    let mut episode = Episode::load(&def).expect("level should load");

    episode.start_simulation().expect("start should succeed");
    let result = episode.toggle_tile(GridCoord::new(1, 0));
    assert!(
        matches!(result, Err(SimError::WrongPhase { .. })),
        "toggle during simulation should be refused, got {:?}",
        result
    );
}
