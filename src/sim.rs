//! Random-policy rollouts, used for smoke-testing the engine at volume.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;

use crate::config::EngineConfig;
use crate::engine::GridEngine;
use crate::error::EngineError;

/// Final state of one rollout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    pub seed: u64,
    pub moves: u64,
    pub score: u64,
    pub highest_tile: u32,
    pub game_over: bool,
}

/// Play uniformly random legal moves until the game ends or `max_moves` is hit.
///
/// The same RNG seed drives spawns and move choice, so a seeded config replays exactly.
pub fn play_random_game(config: &EngineConfig, max_moves: Option<u64>) -> Result<GameSummary, EngineError> {
    let seed = config.seed.unwrap_or_else(rand::random);
    let mut engine = GridEngine::with_seed(config.size, seed)?;
    let mut policy = StdRng::seed_from_u64(seed ^ 0x9E37_79B9_7F4A_7C15);

    while !engine.is_game_over() && max_moves.map_or(true, |cap| engine.moves() < cap) {
        let legal = engine.legal_moves();
        let Some(&dir) = legal.choose(&mut policy) else { break };
        engine.apply_move(dir);
    }

    Ok(GameSummary {
        seed,
        moves: engine.moves(),
        score: engine.score(),
        highest_tile: engine.grid().highest_tile(),
        game_over: engine.is_game_over(),
    })
}

/// Run `games` rollouts in parallel, seeded `base_seed`, `base_seed + 1`, ...
///
/// `on_done` is called from worker threads after each game.
pub fn simulate<F>(
    games: u64,
    base_seed: u64,
    size: usize,
    max_moves: Option<u64>,
    on_done: F,
) -> Result<Vec<GameSummary>, EngineError>
where
    F: Fn(&GameSummary) + Sync,
{
    EngineConfig { size, seed: None }.validate()?;
    (0..games)
        .into_par_iter()
        .map(|i| {
            let config = EngineConfig { size, seed: Some(base_seed.wrapping_add(i)) };
            let summary = play_random_game(&config, max_moves)?;
            on_done(&summary);
            Ok(summary)
        })
        .collect()
}

/// Aggregate over a batch of rollouts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub games: usize,
    pub mean_score: f64,
    pub max_score: u64,
    pub mean_moves: f64,
    pub highest_tile: u32,
    /// `(tile, games whose highest tile was exactly this)`, ascending.
    pub tile_histogram: Vec<(u32, usize)>,
}

impl Summary {
    pub fn from_games(games: &[GameSummary]) -> Self {
        let n = games.len();
        let denom = n.max(1) as f64;
        let mut histogram: Vec<(u32, usize)> = Vec::new();
        for g in games {
            match histogram.iter_mut().find(|(tile, _)| *tile == g.highest_tile) {
                Some((_, count)) => *count += 1,
                None => histogram.push((g.highest_tile, 1)),
            }
        }
        histogram.sort_unstable();
        Summary {
            games: n,
            mean_score: games.iter().map(|g| g.score as f64).sum::<f64>() / denom,
            max_score: games.iter().map(|g| g.score).max().unwrap_or(0),
            mean_moves: games.iter().map(|g| g.moves as f64).sum::<f64>() / denom,
            highest_tile: games.iter().map(|g| g.highest_tile).max().unwrap_or(0),
            tile_histogram: histogram,
        }
    }
}
