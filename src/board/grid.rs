//! Rectangular block grid
//!
//! Row 0 is the top of the board; gravity pulls toward the last row.
//! Coordinates outside the grid are never an error: reads yield
//! [`Cell::Empty`] and writes are ignored.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Index of a block kind within the [`Palette`](super::Palette)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockId(pub u8);

/// Contents of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Block(BlockId),
}

impl Cell {
    #[inline]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    #[inline]
    pub fn block(self) -> Option<BlockId> {
        match self {
            Cell::Block(id) => Some(id),
            Cell::Empty => None,
        }
    }
}

impl From<BlockId> for Cell {
    fn from(id: BlockId) -> Self {
        Cell::Block(id)
    }
}

/// A grid position. Ordered row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// True if the two positions share an edge
    pub fn is_adjacent(self, other: Coord) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// The playfield
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

/// Unchecked wire form of [`Grid`]
#[derive(Deserialize)]
struct RawGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = String;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        if raw.rows.checked_mul(raw.cols) != Some(raw.cells.len()) {
            return Err(format!(
                "grid is {}x{} but has {} cells",
                raw.rows,
                raw.cols,
                raw.cells.len()
            ));
        }
        Ok(Self {
            rows: raw.rows,
            cols: raw.cols,
            cells: raw.cells,
        })
    }
}

impl Grid {
    /// Create an all-empty grid
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    /// Build a grid from nested rows. Short rows are padded with empty cells,
    /// the widest row sets the column count.
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = Cell>,
    {
        let nested: Vec<Vec<Cell>> = rows.into_iter().map(|r| r.into_iter().collect()).collect();
        let cols = nested.iter().map(Vec::len).max().unwrap_or(0);
        let mut grid = Self::new(nested.len(), cols);
        for (row, cells) in nested.into_iter().enumerate() {
            for (col, cell) in cells.into_iter().enumerate() {
                grid.set(row, col, cell);
            }
        }
        grid
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    #[inline]
    fn idx(&self, row: usize, col: usize) -> Option<usize> {
        self.in_bounds(row, col).then_some(row * self.cols + col)
    }

    /// Cell at `(row, col)`, or `Empty` outside the grid
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.idx(row, col)
            .and_then(|i| self.cells.get(i).copied())
            .unwrap_or(Cell::Empty)
    }

    /// Write a cell; out-of-bounds writes are dropped
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        if let Some(i) = self.idx(row, col) {
            self.cells[i] = cell;
        }
    }

    #[inline]
    pub fn at(&self, pos: Coord) -> Cell {
        self.get(pos.row, pos.col)
    }

    #[inline]
    pub fn put(&mut self, pos: Coord, cell: Cell) {
        self.set(pos.row, pos.col, cell);
    }

    /// Exchange two cells. Does nothing if either lies outside the grid.
    pub fn swap(&mut self, a: Coord, b: Coord) {
        if let (Some(i), Some(j)) = (self.idx(a.row, a.col), self.idx(b.row, b.col)) {
            self.cells.swap(i, j);
        }
    }

    /// All cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        let cols = self.cols.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| (Coord::new(i / cols, i % cols), cell))
    }

    /// Raw row-major cell slice (for renderers)
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|c| c.is_empty()).count()
    }
}

impl fmt::Display for Grid {
    /// One line per row; blocks print as `A`, `B`, ... and empty cells as `.`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let ch = match self.get(row, col) {
                    Cell::Empty => '.',
                    Cell::Block(BlockId(id)) if id < 26 => (b'A' + id) as char,
                    Cell::Block(_) => '#',
                };
                write!(f, "{ch}")?;
            }
            if row + 1 < self.rows {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
