//! Cascade resolution
//!
//! A committed move clears its matches, lets blocks fall, refills the holes and
//! looks for new matches, repeating until none are left. [`Cascade`] runs this
//! one phase per [`Cascade::step`] so a renderer can animate each phase at its
//! own pace; every event carries the grid as it looks after that phase.
//!
//! Termination is probabilistic: refills are unconstrained, so there is no
//! upper bound on the number of passes.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::detect::{MatchSet, find_all_matches};
use super::grid::{Cell, Coord, Grid};
use super::palette::Palette;
use super::Rules;

/// A block moved down by gravity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fall {
    pub from: Coord,
    pub to: Coord,
}

/// Observable boundary between cascade phases
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "camelCase")]
pub enum CascadeEvent {
    /// Matched cells were emptied. One per pass, so this is the "match" sound cue.
    Cleared {
        pass: u32,
        matches: MatchSet,
        points: u64,
        grid: Grid,
    },
    /// Columns were compacted downward
    Dropped { pass: u32, falls: Vec<Fall>, grid: Grid },
    /// Empty cells received new random blocks
    Refilled {
        pass: u32,
        spawned: Vec<Coord>,
        grid: Grid,
    },
    /// No matches remain
    Settled { passes: u32, score: u64 },
}

#[derive(Debug, Clone)]
enum Phase {
    Clear(MatchSet),
    Drop,
    Refill,
    Detect,
    Settle,
    Done,
}

/// Per-move cascade state machine
#[derive(Debug, Clone)]
pub struct Cascade {
    phase: Phase,
    pass: u32,
    score: u64,
    pass_sizes: Vec<usize>,
}

/// Outcome of a fully drained cascade
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeReport {
    /// Number of cells cleared in each pass, in order
    pub passes: Vec<usize>,
    /// Total points over all passes
    pub score: u64,
}

impl Cascade {
    /// Start from the matches that triggered the cascade. An empty set settles
    /// immediately without touching the grid.
    pub fn new(initial: MatchSet) -> Self {
        let phase = if initial.is_empty() {
            Phase::Settle
        } else {
            Phase::Clear(initial)
        };
        Self {
            phase,
            pass: 0,
            score: 0,
            pass_sizes: Vec::new(),
        }
    }

    /// Points accumulated so far
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Passes started so far (1-based)
    pub fn pass(&self) -> u32 {
        self.pass
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Done)
    }

    /// Advance one phase. Returns `None` once `Settled` has been emitted.
    pub fn step<R: Rng>(
        &mut self,
        grid: &mut Grid,
        palette: &Palette,
        rules: &Rules,
        rng: &mut R,
    ) -> Option<CascadeEvent> {
        loop {
            match std::mem::replace(&mut self.phase, Phase::Done) {
                Phase::Clear(matches) => {
                    self.pass += 1;
                    for &pos in &matches {
                        grid.put(pos, Cell::Empty);
                    }
                    let points = (matches.len() as u64).saturating_mul(rules.score_per_match);
                    self.score = self.score.saturating_add(points);
                    self.pass_sizes.push(matches.len());
                    log::debug!(
                        "Pass {}: cleared {} cells for {} points",
                        self.pass,
                        matches.len(),
                        points
                    );
                    self.phase = Phase::Drop;
                    return Some(CascadeEvent::Cleared {
                        pass: self.pass,
                        matches,
                        points,
                        grid: grid.clone(),
                    });
                }
                Phase::Drop => {
                    let falls = drop_blocks(grid);
                    self.phase = Phase::Refill;
                    return Some(CascadeEvent::Dropped {
                        pass: self.pass,
                        falls,
                        grid: grid.clone(),
                    });
                }
                Phase::Refill => {
                    let spawned = refill(grid, palette, rng);
                    self.phase = Phase::Detect;
                    return Some(CascadeEvent::Refilled {
                        pass: self.pass,
                        spawned,
                        grid: grid.clone(),
                    });
                }
                Phase::Detect => {
                    let matches = find_all_matches(grid, rules.min_match);
                    // Detection is not an observable phase: go straight on
                    self.phase = if matches.is_empty() {
                        Phase::Settle
                    } else {
                        Phase::Clear(matches)
                    };
                }
                Phase::Settle => {
                    log::debug!("Cascade settled after {} passes, {} points", self.pass, self.score);
                    return Some(CascadeEvent::Settled {
                        passes: self.pass,
                        score: self.score,
                    });
                }
                Phase::Done => return None,
            }
        }
    }

    /// Consume the finished cascade into its report
    pub fn into_report(self) -> CascadeReport {
        CascadeReport {
            passes: self.pass_sizes,
            score: self.score,
        }
    }
}

/// Compact every column downward, keeping the vertical order of its blocks.
/// Returns the moves made, bottom-up per column.
pub fn drop_blocks(grid: &mut Grid) -> Vec<Fall> {
    let mut falls = Vec::new();
    for col in 0..grid.cols() {
        let mut empties = 0;
        for row in (0..grid.rows()).rev() {
            let cell = grid.get(row, col);
            if cell.is_empty() {
                empties += 1;
            } else if empties > 0 {
                grid.set(row + empties, col, cell);
                grid.set(row, col, Cell::Empty);
                falls.push(Fall {
                    from: Coord::new(row, col),
                    to: Coord::new(row + empties, col),
                });
            }
        }
    }
    falls
}

/// Fill every empty cell with a random block, with no regard for matches
pub fn refill<R: Rng>(grid: &mut Grid, palette: &Palette, rng: &mut R) -> Vec<Coord> {
    let holes: Vec<Coord> = grid
        .iter()
        .filter_map(|(pos, cell)| cell.is_empty().then_some(pos))
        .collect();
    for &pos in &holes {
        grid.put(pos, palette.draw_cell(rng));
    }
    holes
}

/// Run a cascade to its fixed point without pausing between phases
pub fn process<R: Rng>(
    grid: &mut Grid,
    initial: MatchSet,
    palette: &Palette,
    rules: &Rules,
    rng: &mut R,
) -> CascadeReport {
    let mut cascade = Cascade::new(initial);
    while cascade.step(grid, palette, rules, rng).is_some() {}
    cascade.into_report()
}
