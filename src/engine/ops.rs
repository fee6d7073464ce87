//! The slide-and-merge pass.

use super::events::{TileEvent, TileId};
use super::grid::Grid;
use super::scan::scan_order;
use super::Direction;

/// Largest tile value; it cannot merge further without leaving `u32`.
pub const MAX_TILE: u32 = 1 << 31;

/// Outcome of one slide-and-merge pass, before any spawn.
#[derive(Debug, Default)]
pub(crate) struct SlidePass {
    pub score: u64,
    pub events: Vec<TileEvent>,
    pub moved: bool,
}

/// Slide every tile of `grid` towards `direction`, merging equal pairs.
///
/// `ids` runs parallel to the grid cells and is only meaningful where the
/// grid is non-zero. A cell that received a merge is locked for the rest of
/// the pass; the lock lives only for this call.
pub(crate) fn slide_pass(grid: &mut Grid, ids: &mut [TileId], direction: Direction) -> SlidePass {
    let size = grid.size();
    debug_assert_eq!(ids.len(), size * size);
    let delta = direction.vector();
    let mut merged = vec![false; size * size];
    let mut pass = SlidePass::default();

    for source in scan_order(direction, size) {
        let value = grid.get(source);
        if value == 0 {
            continue;
        }
        let src = grid.index(source);

        let mut target = source;
        while let Some(next) = target.step(delta, size) {
            if grid.get(next) != 0 {
                break;
            }
            target = next;
        }

        if let Some(beyond) = target.step(delta, size) {
            let dst = grid.index(beyond);
            if value < MAX_TILE && grid.get(beyond) == value && !merged[dst] {
                let doubled = value * 2;
                grid.set(beyond, doubled);
                grid.set(source, 0);
                merged[dst] = true;
                pass.score += u64::from(doubled);
                pass.events.push(TileEvent {
                    tile: ids[src],
                    from: source,
                    to: beyond,
                    value: doubled,
                    merged: true,
                    absorbed_by: Some(ids[dst]),
                });
                pass.moved = true;
                continue;
            }
        }

        if target != source {
            let dst = grid.index(target);
            grid.set(target, value);
            grid.set(source, 0);
            ids[dst] = ids[src];
            pass.events.push(TileEvent {
                tile: ids[src],
                from: source,
                to: target,
                value,
                merged: false,
                absorbed_by: None,
            });
            pass.moved = true;
        }
    }
    pass
}

/// Slide/merge tiles in the given direction. No randomness, no spawn.
///
/// Returns the resulting grid and the score gained.
pub fn shift(grid: &Grid, direction: Direction) -> (Grid, u64) {
    let mut out = grid.clone();
    let mut ids: Vec<TileId> = (0..grid.values().len() as u32).map(TileId).collect();
    let pass = slide_pass(&mut out, &mut ids, direction);
    (out, pass.score)
}
