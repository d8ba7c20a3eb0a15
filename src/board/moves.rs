//! Move search
//!
//! Finds adjacent swaps that would produce a match. Used for hints and to
//! notice a board with no moves left.

use serde::{Deserialize, Serialize};

use super::detect::find_runs;
use super::grid::{Coord, Grid};

/// Two adjacent cells to exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
}

impl Move {
    pub fn new(from: impl Into<Coord>, to: impl Into<Coord>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn is_adjacent(&self) -> bool {
        self.from.is_adjacent(self.to)
    }
}

/// True if swapping the two cells of `mv` would create at least one match.
/// The grid is swapped in place and restored before returning.
pub fn creates_match(grid: &mut Grid, mv: Move, min_match: usize) -> bool {
    if grid.at(mv.from) == grid.at(mv.to) {
        return false;
    }
    grid.swap(mv.from, mv.to);
    let found = !find_runs(grid, min_match).is_empty();
    grid.swap(mv.from, mv.to);
    found
}

/// Every rightward and downward swap that creates a match, row-major
pub fn find_valid_moves(grid: &Grid, min_match: usize) -> Vec<Move> {
    let mut scratch = grid.clone();
    candidates(grid)
        .filter(|&mv| creates_match(&mut scratch, mv, min_match))
        .collect()
}

/// First valid move in row-major order, if any
pub fn find_hint(grid: &Grid, min_match: usize) -> Option<Move> {
    let mut scratch = grid.clone();
    candidates(grid).find(|&mv| creates_match(&mut scratch, mv, min_match))
}

fn candidates(grid: &Grid) -> impl Iterator<Item = Move> + '_ {
    grid.iter().flat_map(move |(pos, _)| {
        let right = (pos.col + 1 < grid.cols()).then(|| Move::new(pos, (pos.row, pos.col + 1)));
        let down = (pos.row + 1 < grid.rows()).then(|| Move::new(pos, (pos.row + 1, pos.col)));
        right.into_iter().chain(down)
    })
}
