//! Match-3 board simulation
//!
//! Everything that touches the grid lives here. Like any simulation that has
//! to be reproducible, it follows a few rules:
//! - Seeded RNG only (passed in, never created ad hoc)
//! - Stable iteration order (row-major)
//! - No rendering, timing or platform dependencies

pub mod cascade;
pub mod detect;
pub mod engine;
pub mod generate;
pub mod grid;
pub mod moves;
pub mod palette;

pub use cascade::{Cascade, CascadeEvent, CascadeReport, Fall, drop_blocks, process, refill};
pub use detect::{Axis, MatchSet, Run, find_all_matches, find_runs, has_matches};
pub use engine::{Engine, SwapOutcome};
pub use generate::generate;
pub use grid::{BlockId, Cell, Coord, Grid};
pub use moves::{Move, find_hint, find_valid_moves};
pub use palette::Palette;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Validated gameplay parameters for one playthrough
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    pub rows: usize,
    pub cols: usize,
    /// Shortest run that counts as a match
    pub min_match: usize,
    /// Points per cleared cell
    pub score_per_match: u64,
}

impl Rules {
    /// Reject configurations the engine cannot run with. A palette with fewer
    /// kinds than `min_match` would make generation loop forever.
    pub fn validate(&self, palette: &Palette) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        let cells = self.rows.checked_mul(self.cols);
        if cells.is_none_or(|n| n > crate::consts::MAX_CELLS) {
            return Err(ConfigError::GridTooLarge {
                rows: self.rows,
                cols: self.cols,
                max_cells: crate::consts::MAX_CELLS,
            });
        }
        if self.min_match < 2 {
            return Err(ConfigError::MinMatchTooSmall(self.min_match));
        }
        if palette.len() < self.min_match {
            return Err(ConfigError::PaletteTooSmall {
                palette: palette.len(),
                min_match: self.min_match,
            });
        }
        Ok(())
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            rows: crate::consts::DEFAULT_ROWS,
            cols: crate::consts::DEFAULT_COLS,
            min_match: crate::consts::DEFAULT_MIN_MATCH,
            score_per_match: crate::consts::DEFAULT_SCORE_PER_MATCH,
        }
    }
}
