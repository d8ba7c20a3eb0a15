//! Swap controller
//!
//! [`Engine`] owns everything a playthrough mutates: the grid, the score and
//! the RNG. It accepts one move at a time. A swap that forms a match puts the
//! engine in the busy state until its cascade settles; swaps requested while
//! busy are dropped.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::cascade::{Cascade, CascadeEvent, CascadeReport};
use super::detect::{MatchSet, find_all_matches};
use super::generate::generate;
use super::grid::{Coord, Grid};
use super::moves::{Move, find_hint};
use super::palette::Palette;
use super::Rules;
use crate::config::GameConfig;
use crate::error::EngineError;

/// Result of a swap request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapOutcome {
    /// A move is still resolving; the request was dropped
    Busy,
    /// Coordinates out of bounds or not adjacent; nothing changed
    Invalid,
    /// No match formed, the swap was undone
    Reverted,
    /// The swap stands and a cascade has started with these matches
    Committed { matches: MatchSet },
}

#[derive(Debug, Clone)]
enum MoveState {
    Idle,
    Busy(Cascade),
}

/// A single match-3 playthrough
#[derive(Debug, Clone)]
pub struct Engine {
    rules: Rules,
    palette: Palette,
    grid: Grid,
    rng: Pcg32,
    seed: u64,
    score: u64,
    state: MoveState,
    moves_played: u32,
    last_report: Option<CascadeReport>,
}

impl Engine {
    /// Validate `config` and deal a fresh board
    pub fn new(config: &GameConfig, seed: u64) -> Result<Self, EngineError> {
        let (rules, palette) = config.validate()?;
        Self::from_parts(rules, palette, seed)
    }

    /// Build from already-derived rules and palette
    pub fn from_parts(rules: Rules, palette: Palette, seed: u64) -> Result<Self, EngineError> {
        rules.validate(&palette)?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let grid = generate(&rules, &palette, &mut rng)?;
        log::info!(
            "Engine ready: {}x{} grid, {} block kinds, minMatch {}, seed {}",
            rules.rows,
            rules.cols,
            palette.len(),
            rules.min_match,
            seed
        );
        Ok(Self {
            rules,
            palette,
            grid,
            rng,
            seed,
            score: 0,
            state: MoveState::Idle,
            moves_played: 0,
            last_report: None,
        })
    }

    /// Replace the board with a preset one, for fixtures and replays.
    /// Fails with [`EngineError::GridMismatch`] unless the grid has the
    /// configured dimensions.
    pub fn with_grid(mut self, grid: Grid) -> Result<Self, EngineError> {
        if (grid.rows(), grid.cols()) != (self.rules.rows, self.rules.cols) {
            return Err(EngineError::GridMismatch {
                rows: grid.rows(),
                cols: grid.cols(),
                expected_rows: self.rules.rows,
                expected_cols: self.rules.cols,
            });
        }
        self.grid = grid;
        Ok(self)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Committed moves so far
    pub fn moves_played(&self) -> u32 {
        self.moves_played
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, MoveState::Busy(_))
    }

    /// Report of the most recently settled cascade
    pub fn last_report(&self) -> Option<&CascadeReport> {
        self.last_report.as_ref()
    }

    /// Request a swap of `(r1, c1)` with `(r2, c2)`
    pub fn try_swap(&mut self, r1: usize, c1: usize, r2: usize, c2: usize) -> SwapOutcome {
        self.try_move(Move::new((r1, c1), (r2, c2)))
    }

    pub fn try_move(&mut self, mv: Move) -> SwapOutcome {
        if self.is_busy() {
            log::debug!("Swap {:?} dropped: move in progress", mv);
            return SwapOutcome::Busy;
        }
        if !self.in_bounds(mv.from) || !self.in_bounds(mv.to) || !mv.is_adjacent() {
            log::debug!("Swap {:?} ignored: not an adjacent in-bounds pair", mv);
            return SwapOutcome::Invalid;
        }

        self.grid.swap(mv.from, mv.to);
        let matches = find_all_matches(&self.grid, self.rules.min_match);
        if matches.is_empty() {
            self.grid.swap(mv.from, mv.to);
            return SwapOutcome::Reverted;
        }

        self.moves_played += 1;
        self.state = MoveState::Busy(Cascade::new(matches.clone()));
        SwapOutcome::Committed { matches }
    }

    /// Advance the running cascade by one phase. Scores each pass as it is
    /// cleared and returns to idle on `Settled`. `None` while idle.
    pub fn advance(&mut self) -> Option<CascadeEvent> {
        let MoveState::Busy(cascade) = &mut self.state else {
            return None;
        };
        let event = cascade.step(&mut self.grid, &self.palette, &self.rules, &mut self.rng);
        match &event {
            Some(CascadeEvent::Cleared { points, .. }) => {
                self.score = self.score.saturating_add(*points);
            }
            Some(CascadeEvent::Settled { .. }) | None => self.finish_move(),
            _ => {}
        }
        event
    }

    /// Drain the running cascade synchronously
    pub fn resolve(&mut self) -> Option<CascadeReport> {
        if !self.is_busy() {
            return None;
        }
        while self.advance().is_some() {}
        self.last_report.clone()
    }

    fn finish_move(&mut self) {
        if let MoveState::Busy(cascade) = std::mem::replace(&mut self.state, MoveState::Idle) {
            let report = cascade.into_report();
            log::info!(
                "Move {} settled: {} passes, +{} (score {})",
                self.moves_played,
                report.passes.len(),
                report.score,
                self.score
            );
            self.last_report = Some(report);
        }
    }

    /// A swap that would produce a match, if the board has one
    pub fn hint(&self) -> Option<Move> {
        find_hint(&self.grid, self.rules.min_match)
    }

    /// False when no swap on the board can form a match
    pub fn has_moves(&self) -> bool {
        self.hint().is_some()
    }

    /// Start a new playthrough with the same rules and palette
    pub fn restart(&mut self, seed: u64) -> Result<(), EngineError> {
        let mut rng = Pcg32::seed_from_u64(seed);
        self.grid = generate(&self.rules, &self.palette, &mut rng)?;
        self.rng = rng;
        self.seed = seed;
        self.score = 0;
        self.state = MoveState::Idle;
        self.moves_played = 0;
        self.last_report = None;
        log::info!("Engine restarted with seed {}", seed);
        Ok(())
    }

    fn in_bounds(&self, pos: Coord) -> bool {
        self.grid.in_bounds(pos.row, pos.col)
    }
}
