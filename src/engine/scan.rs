//! Direction-dependent processing order for a move.
//!
//! Tiles nearest the target edge are processed first, so every tile slides
//! into cells whose final content for this move is already settled. Rows are
//! the outer loop and columns the inner one; the leading edge row/column is
//! skipped for Right and Down because nothing there can move.

use super::grid::Cell;
use super::Direction;

/// Cells to visit, in order, when moving `direction` on a `size`×`size` grid.
pub fn scan_order(direction: Direction, size: usize) -> Vec<Cell> {
    let ys = axis(direction.vector().1, size);
    let xs = axis(direction.vector().0, size);
    let mut order = Vec::with_capacity(ys.len() * xs.len());
    for &y in &ys {
        for &x in &xs {
            order.push(Cell { x, y });
        }
    }
    order
}

fn axis(delta: isize, size: usize) -> Vec<usize> {
    if delta == 1 {
        (0..size.saturating_sub(1)).rev().collect()
    } else {
        (0..size).collect()
    }
}
