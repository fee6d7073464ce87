use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::events::{MoveResult, SpawnEvent, TileId};
use super::grid::{Cell, Grid};
use super::ops::slide_pass;
use super::Direction;
use crate::config::EngineConfig;
use crate::error::EngineError;

/// Owns one game's grid, score and tile identities.
///
/// The grid only changes through [`GridEngine::apply_move`] (and its
/// follow-up spawn) or a full [`GridEngine::restart`].
#[derive(Debug, Clone)]
pub struct GridEngine {
    grid: Grid,
    ids: Vec<TileId>,
    next_id: u32,
    score: u64,
    moves: u64,
    rng: StdRng,
}

impl GridEngine {
    /// Start a game on an empty `size`×`size` grid with two random tiles.
    pub fn new(size: usize) -> Result<Self, EngineError> {
        Self::start(size, StdRng::from_entropy())
    }

    /// Like [`GridEngine::new`] but with a deterministic RNG.
    pub fn with_seed(size: usize, seed: u64) -> Result<Self, EngineError> {
        Self::start(size, StdRng::seed_from_u64(seed))
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self, EngineError> {
        match config.seed {
            Some(seed) => Self::with_seed(config.size, seed),
            None => Self::new(config.size),
        }
    }

    /// Resume from an existing grid (score 0, no spawns). Every tile gets a fresh id.
    pub fn from_grid(grid: Grid, seed: u64) -> Self {
        let mut engine = Self::blank(grid, StdRng::seed_from_u64(seed));
        for cell in engine.grid.cells().collect::<Vec<_>>() {
            if engine.grid.get(cell) != 0 {
                let idx = engine.grid.index(cell);
                engine.ids[idx] = engine.next_tile_id();
            }
        }
        engine
    }

    fn start(size: usize, rng: StdRng) -> Result<Self, EngineError> {
        let mut engine = Self::blank(Grid::new(size)?, rng);
        engine.spawn_random_tile();
        engine.spawn_random_tile();
        Ok(engine)
    }

    fn blank(grid: Grid, rng: StdRng) -> Self {
        let cells = grid.size() * grid.size();
        GridEngine { grid, ids: vec![TileId(0); cells], next_id: 0, score: 0, moves: 0, rng }
    }

    /// Throw the current game away and start over on a same-sized grid.
    ///
    /// Tile ids keep counting up so stale renderer handles never alias new tiles.
    pub fn restart(&mut self) {
        let size = self.grid.size();
        self.grid = self.grid.cleared();
        self.ids = vec![TileId(0); size * size];
        self.score = 0;
        self.moves = 0;
        self.spawn_random_tile();
        self.spawn_random_tile();
        info!("restarted {size}x{size} game");
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.grid.size()
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Number of moves that changed the grid since the last (re)start.
    #[inline]
    pub fn moves(&self) -> u64 {
        self.moves
    }

    /// Identity of the tile at `cell`, if occupied.
    pub fn tile_at(&self, cell: Cell) -> Option<TileId> {
        (self.grid.get(cell) != 0).then(|| self.ids[self.grid.index(cell)])
    }

    /// Place a 2 (90%) or 4 (10%) in a uniformly chosen empty cell.
    ///
    /// Returns `None` and leaves the grid alone when it is full.
    pub fn spawn_random_tile(&mut self) -> Option<SpawnEvent> {
        let empties = self.grid.empty_cells();
        let &cell = empties.choose(&mut self.rng)?;
        let value = random_tile_value(&mut self.rng);
        self.grid.set(cell, value);
        let tile = self.next_tile_id();
        let idx = self.grid.index(cell);
        self.ids[idx] = tile;
        trace!("spawned {value} at {cell} as tile {}", tile.0);
        Some(SpawnEvent { tile, cell, value })
    }

    /// Slide and merge towards `direction`; if anything moved, add the score,
    /// spawn one tile and re-check for game over.
    pub fn apply_move(&mut self, direction: Direction) -> MoveResult {
        let pass = slide_pass(&mut self.grid, &mut self.ids, direction);
        if !pass.moved {
            debug!("move {direction} changed nothing");
            return MoveResult {
                moved: false,
                grid: self.grid.clone(),
                score_delta: 0,
                score: self.score,
                events: Vec::new(),
                spawn: None,
                game_over: self.is_game_over(),
            };
        }

        self.score += pass.score;
        self.moves += 1;
        let spawn = self.spawn_random_tile();
        let game_over = self.is_game_over();
        debug!(
            "move {direction}: {} events, +{} (score {})",
            pass.events.len(),
            pass.score,
            self.score
        );
        if game_over {
            info!("game over after {} moves with score {}", self.moves, self.score);
        }

        MoveResult {
            moved: true,
            grid: self.grid.clone(),
            score_delta: pass.score,
            score: self.score,
            events: pass.events,
            spawn,
            game_over,
        }
    }

    /// True when the grid is full and no two neighbours are equal.
    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.grid.is_game_over()
    }

    /// Directions that would change the grid right now.
    pub fn legal_moves(&self) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|&dir| super::ops::shift(&self.grid, dir).0 != self.grid)
            .collect()
    }

    fn next_tile_id(&mut self) -> TileId {
        let id = TileId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }
}

fn random_tile_value<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    if rng.gen_range(0..10) < 9 { 2 } else { 4 }
}
