//! Match detection
//!
//! Two independent linear scans over the same grid: rows left to right, then
//! columns top to bottom. A run of at least `min_match` identical blocks is a
//! match. The result is the union of both scans, so a cell in an L or T shape
//! is reported once.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::grid::{BlockId, Cell, Coord, Grid};

/// Matched coordinates, deduplicated and ordered row-major
pub type MatchSet = BTreeSet<Coord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// A maximal straight line of identical blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub start: Coord,
    pub len: usize,
    pub axis: Axis,
    pub block: BlockId,
}

impl Run {
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.len).map(move |i| match self.axis {
            Axis::Horizontal => Coord::new(self.start.row, self.start.col + i),
            Axis::Vertical => Coord::new(self.start.row + i, self.start.col),
        })
    }
}

/// Scan one line of `len` cells addressed through `at`, pushing qualifying runs
fn scan_line(
    len: usize,
    min_match: usize,
    axis: Axis,
    at: impl Fn(usize) -> (Coord, Cell),
    out: &mut Vec<Run>,
) {
    let mut i = 0;
    while i < len {
        let (start, cell) = at(i);
        let Cell::Block(block) = cell else {
            i += 1;
            continue;
        };
        let mut j = i + 1;
        while j < len && at(j).1 == cell {
            j += 1;
        }
        if j - i >= min_match {
            out.push(Run {
                start,
                len: j - i,
                axis,
                block,
            });
        }
        i = j;
    }
}

/// All qualifying runs: horizontal ones row by row, then vertical ones column by column
pub fn find_runs(grid: &Grid, min_match: usize) -> Vec<Run> {
    let mut runs = Vec::new();
    for row in 0..grid.rows() {
        scan_line(
            grid.cols(),
            min_match,
            Axis::Horizontal,
            |col| (Coord::new(row, col), grid.get(row, col)),
            &mut runs,
        );
    }
    for col in 0..grid.cols() {
        scan_line(
            grid.rows(),
            min_match,
            Axis::Vertical,
            |row| (Coord::new(row, col), grid.get(row, col)),
            &mut runs,
        );
    }
    runs
}

/// Every cell that belongs to at least one qualifying run
pub fn find_all_matches(grid: &Grid, min_match: usize) -> MatchSet {
    find_runs(grid, min_match)
        .iter()
        .flat_map(Run::cells)
        .collect()
}

/// Cheap check used after generation and by tests
pub fn has_matches(grid: &Grid, min_match: usize) -> bool {
    !find_runs(grid, min_match).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::grid::tests::parse;

    fn coords(set: &MatchSet) -> Vec<(usize, usize)> {
        set.iter().map(|c| (c.row, c.col)).collect()
    }

    #[test]
    fn test_horizontal_run() {
        let grid = parse("AAAB\nBCDA");
        let matches = find_all_matches(&grid, 3);
        assert_eq!(coords(&matches), vec![(0, 0), (0, 1), (0, 2)]);
    }

    #[test]
    fn test_vertical_run() {
        let grid = parse("AB\nAC\nAD\nBD");
        let matches = find_all_matches(&grid, 3);
        assert_eq!(coords(&matches), vec![(0, 0), (1, 0), (2, 0)]);
    }

    #[test]
    fn test_long_run_fully_reported() {
        let grid = parse("BBBBB");
        assert_eq!(find_all_matches(&grid, 3).len(), 5);
        let runs = find_runs(&grid, 3);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].len, 5);
    }

    #[test]
    fn test_cross_is_deduplicated() {
        // T shape: row 0 run of 3 plus column 1 run of 3, sharing (0, 1)
        let grid = parse("AAA\nCAD\nDAC");
        let matches = find_all_matches(&grid, 3);
        assert_eq!(matches.len(), 5);
        assert_eq!(find_runs(&grid, 3).len(), 2);
    }

    #[test]
    fn test_empty_cells_never_match() {
        let grid = parse("...\nA.A");
        assert!(find_all_matches(&grid, 2).is_empty());
        assert!(!has_matches(&grid, 2));
    }

    #[test]
    fn test_short_runs_ignored() {
        let grid = parse("AABBA\nBBAAB");
        assert!(find_all_matches(&grid, 3).is_empty());
        assert_eq!(find_all_matches(&grid, 2).len(), 8);
    }

    #[test]
    fn test_idempotent() {
        let grid = parse("AAAB\nBACA\nBADA");
        let first = find_all_matches(&grid, 3);
        let second = find_all_matches(&grid, 3);
        assert_eq!(first, second);
    }
}
