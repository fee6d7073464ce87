//! One player's game session with a move-in-flight lock.
//!
//! A presentation layer feeds decoded input into [`Session::request_move`].
//! An accepted move holds the lock until the caller reports that playback has
//! finished via [`Session::settle`]; requests arriving in between are dropped.
//! Moves therefore never interleave, and none is cancelled once accepted.

use std::time::Duration;

use log::{debug, info};
use serde::Serialize;

use crate::config::SessionConfig;
use crate::engine::{Direction, Grid, GridEngine, MoveResult};
use crate::error::EngineError;
use crate::input;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Accepting moves.
    Ready,
    /// A move was applied and its playback has not settled yet.
    Settling,
    /// No move remains; only `restart` leaves this phase.
    GameOver,
}

/// What happened to a move request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveRequest {
    /// The grid changed; the lock is held until `settle`.
    Accepted(MoveResult),
    /// Nothing could move; the lock was released straight away.
    Unchanged,
    /// Dropped because a move was in flight, the game is over, or the input
    /// did not decode to a direction.
    Ignored,
}

#[derive(Debug, Clone)]
pub struct Session {
    engine: GridEngine,
    config: SessionConfig,
    phase: Phase,
    best_score: u64,
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Self, EngineError> {
        let engine = GridEngine::from_config(&config.engine)?;
        Ok(Self::with_engine(engine, config))
    }

    /// Wrap an already-built engine, e.g. one resumed from a fixed grid.
    pub fn with_engine(engine: GridEngine, config: SessionConfig) -> Self {
        let phase = if engine.is_game_over() { Phase::GameOver } else { Phase::Ready };
        Session { best_score: engine.score(), engine, config, phase }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn engine(&self) -> &GridEngine {
        &self.engine
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        self.engine.grid()
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.engine.score()
    }

    /// Highest score seen by this session, across restarts.
    #[inline]
    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    #[inline]
    pub fn settle_delay(&self) -> Duration {
        self.config.settle_delay
    }

    pub fn request_move(&mut self, direction: Direction) -> MoveRequest {
        if self.phase != Phase::Ready {
            debug!("ignoring {direction} while {:?}", self.phase);
            return MoveRequest::Ignored;
        }
        let result = self.engine.apply_move(direction);
        if !result.moved {
            return MoveRequest::Unchanged;
        }
        self.best_score = self.best_score.max(result.score);
        self.phase = Phase::Settling;
        MoveRequest::Accepted(result)
    }

    pub fn handle_key(&mut self, code: &str) -> MoveRequest {
        match input::direction_from_key(code) {
            Some(direction) => self.request_move(direction),
            None => MoveRequest::Ignored,
        }
    }

    pub fn handle_swipe(&mut self, dx: f32, dy: f32) -> MoveRequest {
        match input::direction_from_swipe(dx, dy, self.config.swipe_threshold) {
            Some(direction) => self.request_move(direction),
            None => MoveRequest::Ignored,
        }
    }

    /// Finish the in-flight move and release the lock, unless the game just ended.
    ///
    /// Calling this outside `Settling` changes nothing.
    pub fn settle(&mut self) -> Phase {
        if self.phase == Phase::Settling {
            self.phase = if self.engine.is_game_over() {
                info!("final score {}", self.engine.score());
                Phase::GameOver
            } else {
                Phase::Ready
            };
        }
        self.phase
    }

    /// Start a brand new game. Allowed in any phase; the best score survives.
    pub fn restart(&mut self) {
        self.engine.restart();
        self.phase = Phase::Ready;
    }
}
