use glimpse_core::config::AngleGrid;
use glimpse_core::scorespace::{ScoreSpace, Waypoint};

fn small_grid() -> AngleGrid {
    AngleGrid {
        phis: vec![-45.0, 0.0, 45.0],
        lambdas: vec![0.0, 90.0, 180.0, 270.0],
    }
}

#[test]
fn dominant_direction_wins_every_step() {
    let mut space = ScoreSpace::new(4, small_grid(), 0.0);
    for time in 0..4 {
        for phi in 0..3 {
            for lambda in 0..4 {
                space.set(time, phi, lambda, 0.1);
            }
        }
        space.set(time, 1, 2, 1.0);
    }

    let path = space.best_path().unwrap();
    assert_eq!(path.len(), 4);
    for waypoint in path {
        assert_eq!(waypoint, Waypoint { phi: 1, lambda: 2 });
    }
}

#[test]
fn smoothness_penalty_flips_a_tied_choice() {
    let grid = AngleGrid {
        phis: vec![0.0],
        lambdas: vec![0.0, 180.0],
    };

    // Segment 0 is a tie; segment 1 heavily favors pan 180°.
    let fill = |space: &mut ScoreSpace| {
        space.set(0, 0, 0, 1.0);
        space.set(0, 0, 1, 1.0);
        space.set(1, 0, 0, 0.0);
        space.set(1, 0, 1, 5.0);
    };

    // Zero transition cost: the tie at segment 0 breaks to the lowest
    // pan index, a greedy per-cell argmax.
    let mut greedy = ScoreSpace::new(2, grid.clone(), 0.0);
    fill(&mut greedy);
    let path = greedy.best_path().unwrap();
    assert_eq!(path[0], Waypoint { phi: 0, lambda: 0 });
    assert_eq!(path[1], Waypoint { phi: 0, lambda: 1 });

    // A nonzero smoothness cost makes the 180° jump expensive, so the
    // whole path settles on pan index 1 from the start.
    let mut smooth = ScoreSpace::new(2, grid, 0.01);
    fill(&mut smooth);
    let path = smooth.best_path().unwrap();
    assert_eq!(path[0], Waypoint { phi: 0, lambda: 1 });
    assert_eq!(path[1], Waypoint { phi: 0, lambda: 1 });
}

#[test]
fn repeated_queries_return_identical_paths() {
    let mut space = ScoreSpace::new(3, small_grid(), 0.005);
    // Everything tied: the result is decided purely by tie-breaking.
    for time in 0..3 {
        for phi in 0..3 {
            for lambda in 0..4 {
                space.set(time, phi, lambda, 0.5);
            }
        }
    }

    let first = space.best_path().unwrap();
    let second = space.best_path().unwrap();
    assert_eq!(first, second);
    // Ties resolve to the lowest indices.
    assert_eq!(first[0], Waypoint { phi: 0, lambda: 0 });
}

#[test]
fn unset_cells_are_never_selected() {
    let mut space = ScoreSpace::new(3, small_grid(), 0.0);
    // Only one direction is ever scored, and poorly: it must still win
    // over every unset cell.
    for time in 0..3 {
        space.set(time, 2, 3, -100.0);
    }

    let path = space.best_path().unwrap();
    for waypoint in path {
        assert_eq!(waypoint, Waypoint { phi: 2, lambda: 3 });
    }
}

#[test]
fn fully_unset_layer_is_an_error() {
    let mut space = ScoreSpace::new(2, small_grid(), 0.0);
    space.set(0, 0, 0, 1.0);
    // time 1 left entirely unset
    assert!(space.best_path().is_err());
}

#[test]
fn empty_space_is_an_error() {
    let space = ScoreSpace::new(0, small_grid(), 0.0);
    assert!(space.best_path().is_err());
}

#[test]
fn re_query_reflects_updated_scores() {
    let mut space = ScoreSpace::new(2, small_grid(), 0.0);
    for time in 0..2 {
        for phi in 0..3 {
            for lambda in 0..4 {
                space.set(time, phi, lambda, 0.1);
            }
        }
    }
    let before = space.best_path().unwrap();
    assert_eq!(before[1], Waypoint { phi: 0, lambda: 0 });

    // No stale caching: a later overwrite must show up in a new query.
    space.set(1, 2, 1, 9.0);
    let after = space.best_path().unwrap();
    assert_eq!(after[1], Waypoint { phi: 2, lambda: 1 });
}

#[test]
fn snapshot_round_trip_preserves_scores_and_path() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("scores.json");

    let mut space = ScoreSpace::new(3, small_grid(), 0.02);
    space.set(0, 0, 1, 0.7);
    space.set(1, 1, 1, 0.9);
    space.set(2, 2, 2, 0.4);
    space.save_snapshot(&path).unwrap();

    let restored = ScoreSpace::load_snapshot(&path).unwrap();
    assert_eq!(restored.dim(), space.dim());
    assert_eq!(restored.get(0, 0, 1), Some(0.7));
    assert_eq!(restored.get(0, 0, 0), None);
    assert_eq!(restored.best_path().unwrap(), space.best_path().unwrap());
}
