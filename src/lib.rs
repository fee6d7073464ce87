//! grid-2048: rule engine and session state machine for a sliding-tile merge puzzle
//!
//! This crate provides:
//! - A [`engine::GridEngine`] that owns an N×N grid and applies moves, returning
//!   ordered tile events for a renderer (`apply_move`, `spawn_random_tile`, `is_game_over`)
//! - The pure pieces behind it (`engine::scan_order`, `engine::shift`)
//! - A [`session::Session`] that serializes moves behind a move-in-flight lock
//! - Input decoding (`input`), a JSON-lines boundary (`protocol`) and random rollouts (`sim`)
//!
//! Quick start:
//! ```
//! use grid_2048::engine::{Direction, GridEngine};
//!
//! // Deterministic 4x4 game with two starting tiles
//! let mut engine = GridEngine::with_seed(4, 42).unwrap();
//! assert_eq!(engine.grid().count_empty(), 14);
//!
//! let result = engine.apply_move(Direction::Left);
//! if result.moved {
//!     assert!(result.spawn.is_some());
//! }
//! assert_eq!(engine.score(), result.score);
//! ```
//!
//! Session loop with the move lock:
//! ```
//! use grid_2048::config::SessionConfig;
//! use grid_2048::engine::Direction;
//! use grid_2048::session::{MoveRequest, Phase, Session};
//!
//! let mut config = SessionConfig::default();
//! config.engine.seed = Some(7);
//! let mut session = Session::new(config).unwrap();
//!
//! for dir in Direction::ALL {
//!     if let MoveRequest::Accepted(result) = session.request_move(dir) {
//!         // A renderer would play `result.events` for `session.settle_delay()` here.
//!         assert!(!result.events.is_empty());
//!         assert_eq!(result.events.iter().filter(|e| e.merged).count() as u64 > 0, result.score_delta > 0);
//!         assert_eq!(session.request_move(dir), MoveRequest::Ignored);
//!         assert_ne!(session.settle(), Phase::Settling);
//!         break;
//!     }
//! }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod protocol;
pub mod session;
pub mod sim;

pub use engine::{Direction, Grid, GridEngine, MoveResult};
pub use error::EngineError;
