use serde::{Deserialize, Serialize};

use super::grid::{Cell, Grid};

/// Stable handle for a tile, independent of where it currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(pub u32);

/// One tile changing cell during a move.
///
/// For a merge, `value` is the doubled value now at `to` and `absorbed_by`
/// names the tile that was already there and keeps living; `tile` retires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileEvent {
    pub tile: TileId,
    pub from: Cell,
    pub to: Cell,
    pub value: u32,
    pub merged: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub absorbed_by: Option<TileId>,
}

/// A tile appearing in a previously empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnEvent {
    pub tile: TileId,
    pub cell: Cell,
    pub value: u32,
}

/// Everything a single `apply_move` produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResult {
    /// Whether any tile changed cell.
    pub moved: bool,
    /// Grid after the slide, merges and spawn.
    pub grid: Grid,
    pub score_delta: u64,
    /// Cumulative score after this move.
    pub score: u64,
    /// Slide/merge events in processing order.
    pub events: Vec<TileEvent>,
    pub spawn: Option<SpawnEvent>,
    pub game_over: bool,
}

impl MoveResult {
    pub fn merges(&self) -> impl Iterator<Item = &TileEvent> {
        self.events.iter().filter(|e| e.merged)
    }
}
