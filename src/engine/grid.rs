use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A grid coordinate: `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    #[inline]
    pub const fn new(x: usize, y: usize) -> Self {
        Cell { x, y }
    }

    /// The neighbouring cell one step along `(dx, dy)`, if it lies on a grid of `size`.
    #[inline]
    pub fn step(self, (dx, dy): (isize, isize), size: usize) -> Option<Cell> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        (x < size && y < size).then_some(Cell { x, y })
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Square N×N board of tile values, row-major.
///
/// `0` is an empty cell; every other value is a power of two `>= 2`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "GridRepr")]
pub struct Grid {
    size: usize,
    cells: Vec<u32>,
}

/// Unchecked wire shape of a [`Grid`]; only reachable through `TryFrom`.
#[derive(Deserialize)]
struct GridRepr {
    size: usize,
    cells: Vec<u32>,
}

impl TryFrom<GridRepr> for Grid {
    type Error = EngineError;

    fn try_from(repr: GridRepr) -> Result<Self, Self::Error> {
        let mut grid = Grid::new(repr.size)?;
        if repr.cells.len() != grid.cells.len() {
            return Err(EngineError::CellCount { size: repr.size, len: repr.cells.len() });
        }
        for (idx, &value) in repr.cells.iter().enumerate() {
            if !is_tile_value(value) {
                return Err(EngineError::InvalidTile { x: idx % repr.size, y: idx / repr.size, value });
            }
        }
        grid.cells = repr.cells;
        Ok(grid)
    }
}

impl Grid {
    /// An all-empty grid of `size`×`size`.
    pub fn new(size: usize) -> Result<Self, EngineError> {
        let cells = match size.checked_mul(size) {
            Some(cells) if size >= 2 => cells,
            _ => return Err(EngineError::InvalidSize { size }),
        };
        Ok(Grid { size, cells: vec![0; cells] })
    }

    /// Build a grid from explicit rows, validating shape and tile values.
    pub fn from_rows(rows: Vec<Vec<u32>>) -> Result<Self, EngineError> {
        let size = rows.len();
        let mut grid = Grid::new(size)?;
        for (y, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(EngineError::NotSquare { row: y, len: row.len(), size });
            }
            for (x, value) in row.into_iter().enumerate() {
                if !is_tile_value(value) {
                    return Err(EngineError::InvalidTile { x, y, value });
                }
                grid.cells[y * size + x] = value;
            }
        }
        Ok(grid)
    }

    /// Same-sized grid with every cell empty.
    pub(crate) fn cleared(&self) -> Grid {
        Grid { size: self.size, cells: vec![0; self.cells.len()] }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn get(&self, cell: Cell) -> u32 {
        self.cells[self.index(cell)]
    }

    #[inline]
    pub(crate) fn set(&mut self, cell: Cell, value: u32) {
        debug_assert!(is_tile_value(value), "not a tile value: {value}");
        let idx = self.index(cell);
        self.cells[idx] = value;
    }

    #[inline]
    pub(crate) fn index(&self, cell: Cell) -> usize {
        debug_assert!(cell.x < self.size && cell.y < self.size);
        cell.y * self.size + cell.x
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.size).flat_map(move |y| (0..self.size).map(move |x| Cell { x, y }))
    }

    /// Raw values in row-major order.
    #[inline]
    pub fn values(&self) -> &[u32] {
        &self.cells
    }

    pub fn row(&self, y: usize) -> &[u32] {
        &self.cells[y * self.size..(y + 1) * self.size]
    }

    pub fn rows(&self) -> Vec<Vec<u32>> {
        self.cells.chunks(self.size).map(<[u32]>::to_vec).collect()
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> Vec<Cell> {
        self.cells().filter(|&c| self.get(c) == 0).collect()
    }

    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|&&v| v == 0).count()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&0)
    }

    /// True if some cell equals its right or bottom neighbour.
    pub fn has_adjacent_pair(&self) -> bool {
        let n = self.size;
        for y in 0..n {
            for x in 0..n {
                let v = self.cells[y * n + x];
                if x + 1 < n && self.cells[y * n + x + 1] == v {
                    return true;
                }
                if y + 1 < n && self.cells[(y + 1) * n + x] == v {
                    return true;
                }
            }
        }
        false
    }

    /// Full grid with no equal horizontal or vertical neighbours.
    pub fn is_game_over(&self) -> bool {
        if !self.is_full() {
            return false;
        }
        !self.has_adjacent_pair()
    }

    pub fn sum(&self) -> u64 {
        self.cells.iter().map(|&v| u64::from(v)).sum()
    }

    /// Highest tile value on the grid, `0` when empty.
    pub fn highest_tile(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }
}

/// `0` or a power of two `>= 2`.
#[inline]
pub fn is_tile_value(value: u32) -> bool {
    value == 0 || (value >= 2 && value.is_power_of_two())
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid").field("size", &self.size).field("rows", &self.rows()).finish()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.highest_tile().to_string().len().max(4) + 2;
        let rule = "-".repeat((width + 1) * self.size - 1);
        for (y, row) in self.cells.chunks(self.size).enumerate() {
            if y > 0 {
                writeln!(f, "{rule}")?;
            }
            let line: Vec<String> = row.iter().map(|&v| format_val(v, width)).collect();
            writeln!(f, "{}", line.join("|"))?;
        }
        Ok(())
    }
}

fn format_val(val: u32, width: usize) -> String {
    match val {
        0 => " ".repeat(width),
        x => format!("{x:^width$}"),
    }
}
