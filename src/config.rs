use std::time::Duration;

use crate::engine::DEFAULT_SIZE;
use crate::error::EngineError;

/// Slide animation length a renderer is expected to play.
pub const SLIDE_ANIMATION: Duration = Duration::from_millis(100);

/// Minimum swipe displacement, in pointer units, that counts as a move.
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 50.0;

/// Knobs for a single engine. Defaults give a classic 4×4 game with an
/// entropy-seeded RNG.
///
/// - `size`: grid edge length, at least 2.
/// - `seed`: fixes the spawn sequence when set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub size: usize,
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { size: DEFAULT_SIZE, seed: None }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.size < 2 {
            return Err(EngineError::InvalidSize { size: self.size });
        }
        Ok(())
    }
}

/// Session-level settings layered over [`EngineConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub engine: EngineConfig,
    /// How long a presentation layer should hold the move lock before calling `settle`.
    pub settle_delay: Duration,
    pub swipe_threshold: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            settle_delay: SLIDE_ANIMATION + Duration::from_millis(20),
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
        }
    }
}
