//! Initial grid generation
//!
//! Cells are filled row-major. A candidate is rejected when the `min_match - 1`
//! cells to its left, or the `min_match - 1` cells above it, all hold the same
//! block, since placing it would complete a run. The finished grid therefore
//! contains no matches.

use rand::Rng;

use super::grid::{BlockId, Cell, Grid};
use super::palette::Palette;
use super::Rules;
use crate::error::EngineError;

/// Random draws per cell before falling back to an explicit candidate list
pub const MAX_DRAWS_PER_CELL: u32 = 64;

/// True if `block` at `(row, col)` would complete a run with the cells to its
/// left or above it
fn completes_run(grid: &Grid, row: usize, col: usize, block: BlockId, min_match: usize) -> bool {
    let needed = min_match.saturating_sub(1);
    if needed == 0 {
        return true;
    }
    let cell = Cell::Block(block);
    let left = col >= needed && (1..=needed).all(|k| grid.get(row, col - k) == cell);
    let above = row >= needed && (1..=needed).all(|k| grid.get(row - k, col) == cell);
    left || above
}

/// Produce a fresh grid with no pre-existing matches
pub fn generate<R: Rng>(rules: &Rules, palette: &Palette, rng: &mut R) -> Result<Grid, EngineError> {
    let mut grid = Grid::new(rules.rows, rules.cols);
    let mut fallbacks = 0u32;

    for row in 0..rules.rows {
        for col in 0..rules.cols {
            let block = match draw_accepted(&grid, row, col, rules.min_match, palette, rng) {
                Some(block) => block,
                None => {
                    fallbacks += 1;
                    let allowed: Vec<BlockId> = palette
                        .ids()
                        .filter(|&id| !completes_run(&grid, row, col, id, rules.min_match))
                        .collect();
                    if allowed.is_empty() {
                        return Err(EngineError::NoCandidate { row, col });
                    }
                    allowed[rng.random_range(0..allowed.len())]
                }
            };
            grid.set(row, col, Cell::Block(block));
        }
    }

    if fallbacks > 0 {
        log::warn!(
            "Grid generation needed {} candidate fallbacks ({}x{}, palette {}, minMatch {})",
            fallbacks,
            rules.rows,
            rules.cols,
            palette.len(),
            rules.min_match
        );
    }
    log::debug!("Generated {}x{} grid", rules.rows, rules.cols);
    Ok(grid)
}

/// Rejection sampling, bounded by [`MAX_DRAWS_PER_CELL`]
fn draw_accepted<R: Rng>(
    grid: &Grid,
    row: usize,
    col: usize,
    min_match: usize,
    palette: &Palette,
    rng: &mut R,
) -> Option<BlockId> {
    (0..MAX_DRAWS_PER_CELL)
        .map(|_| palette.draw(rng))
        .find(|&block| !completes_run(grid, row, col, block, min_match))
}
