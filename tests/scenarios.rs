// tests/scenarios.rs
#![forbid(unsafe_code)]

/**
 * End-to-end scenarios through the public API.
 *
 * - Row scenarios for merge ordering and the single-merge rule.
 * - Terminal detection on hand-built grids.
 * - Spawn value distribution (statistical, seeded so it is stable).
 * - A full session played to game over under the move lock.
 */
use grid_2048::config::SessionConfig;
use grid_2048::engine::{scan_order, Cell, Direction, Grid, GridEngine};
use grid_2048::session::{MoveRequest, Phase, Session};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

fn one_row(row: [u32; 4]) -> Grid {
    Grid::from_rows(vec![row.to_vec(), vec![0; 4], vec![0; 4], vec![0; 4]]).unwrap()
}

fn slide_row(row: [u32; 4], dir: Direction) -> (Vec<u32>, u64, bool) {
    let mut engine = GridEngine::from_grid(one_row(row), 0);
    let before_spawn = grid_2048::engine::shift(engine.grid(), dir).0;
    let result = engine.apply_move(dir);
    (before_spawn.row(0).to_vec(), result.score_delta, result.moved)
}

#[test]
fn merge_then_slide_left() {
    assert_eq!(slide_row([2, 2, 4, 0], Direction::Left), (vec![4, 4, 0, 0], 4, true));
}

#[test]
fn empty_row_never_moves() {
    for dir in Direction::ALL {
        let mut engine = GridEngine::from_grid(Grid::new(4).unwrap(), 0);
        let result = engine.apply_move(dir);
        assert!(!result.moved);
        assert_eq!(result.score_delta, 0);
        assert_eq!(result.spawn, None);
    }
}

#[test]
fn right_merges_once_and_slides_the_leftover() {
    assert_eq!(slide_row([2, 0, 2, 2], Direction::Right), (vec![0, 0, 2, 4], 4, true));
}

#[test]
fn four_equal_tiles_make_two_merges() {
    assert_eq!(slide_row([2, 2, 2, 2], Direction::Left), (vec![4, 4, 0, 0], 8, true));
    assert_eq!(slide_row([2, 2, 2, 2], Direction::Right), (vec![0, 0, 4, 4], 8, true));
}

#[test]
fn no_op_twice_is_identical() {
    let mut engine = GridEngine::from_grid(one_row([2, 4, 0, 0]), 1);
    let before = engine.grid().clone();
    let first = engine.apply_move(Direction::Left);
    let second = engine.apply_move(Direction::Left);
    assert!(!first.moved && !second.moved);
    assert_eq!(first, second);
    assert_eq!(engine.grid(), &before);
    assert_eq!(engine.score(), 0);
}

#[test]
fn scan_order_starts_at_the_target_edge() {
    assert_eq!(scan_order(Direction::Right, 4)[0], Cell::new(2, 0));
    assert_eq!(scan_order(Direction::Down, 4)[0], Cell::new(0, 2));
    assert_eq!(scan_order(Direction::Left, 4)[0], Cell::new(0, 0));
    assert_eq!(scan_order(Direction::Up, 4)[0], Cell::new(0, 0));
}

#[test]
fn terminal_detection() {
    let full_stuck = Grid::from_rows(vec![
        vec![2, 4, 8, 16],
        vec![16, 8, 4, 2],
        vec![2, 4, 8, 16],
        vec![16, 8, 4, 2],
    ])
    .unwrap();
    assert!(GridEngine::from_grid(full_stuck, 0).is_game_over());

    let full_with_pair = Grid::from_rows(vec![
        vec![2, 4, 8, 16],
        vec![16, 8, 4, 2],
        vec![2, 4, 8, 16],
        vec![16, 8, 4, 4],
    ])
    .unwrap();
    assert!(!GridEngine::from_grid(full_with_pair, 0).is_game_over());

    let one_hole = Grid::from_rows(vec![
        vec![2, 4, 8, 16],
        vec![16, 8, 4, 2],
        vec![2, 4, 0, 16],
        vec![16, 8, 4, 2],
    ])
    .unwrap();
    assert!(!GridEngine::from_grid(one_hole, 0).is_game_over());
}

#[test]
fn spawn_distribution_is_about_ninety_ten() {
    let mut engine = GridEngine::with_seed(4, 0xC0FFEE).unwrap();
    let (mut twos, mut fours) = (0u32, 0u32);
    for _ in 0..5_000 {
        engine.restart();
        for &v in engine.grid().values() {
            match v {
                2 => twos += 1,
                4 => fours += 1,
                0 => {}
                other => panic!("spawned {other}"),
            }
        }
    }
    let total = f64::from(twos + fours);
    assert_eq!(total, 10_000.0);
    let four_rate = f64::from(fours) / total;
    assert!((0.08..0.12).contains(&four_rate), "4-rate was {four_rate}");
}

#[test]
fn spawns_cover_every_empty_cell() {
    let mut engine = GridEngine::with_seed(2, 3).unwrap();
    let mut seen = std::collections::HashSet::new();
    for _ in 0..400 {
        engine.restart();
        for cell in engine.grid().cells() {
            if engine.grid().get(cell) != 0 {
                seen.insert(cell);
            }
        }
    }
    assert_eq!(seen.len(), 4);
}

#[test]
fn session_plays_to_game_over_under_the_lock() {
    let mut config = SessionConfig::default();
    config.engine.seed = Some(77);
    config.engine.size = 3;
    let mut session = Session::new(config).unwrap();
    let mut policy = StdRng::seed_from_u64(77);
    let mut accepted = 0u32;

    while session.phase() != Phase::GameOver {
        assert_eq!(session.phase(), Phase::Ready);
        let dir = *Direction::ALL.choose(&mut policy).unwrap();
        match session.request_move(dir) {
            MoveRequest::Accepted(result) => {
                accepted += 1;
                assert_eq!(session.request_move(dir), MoveRequest::Ignored);
                assert_eq!(session.phase(), Phase::Settling);
                let phase = session.settle();
                assert_eq!(phase == Phase::GameOver, result.game_over);
            }
            MoveRequest::Unchanged => assert_eq!(session.phase(), Phase::Ready),
            MoveRequest::Ignored => panic!("ready session ignored a move"),
        }
        assert!(accepted < 10_000, "game should end on a 3x3 grid");
    }

    assert!(session.grid().is_game_over());
    assert_eq!(session.request_move(Direction::Left), MoveRequest::Ignored);
    assert!(session.best_score() >= session.score());
}
