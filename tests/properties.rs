//! Property tests for the board simulation

use std::collections::BTreeSet;

use gem_cascade::board::{
    BlockId, Cell, Coord, Engine, Grid, Palette, Rules, SwapOutcome, drop_blocks,
    find_all_matches, generate, has_matches, process,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

fn rules(rows: usize, cols: usize, min_match: usize) -> Rules {
    Rules {
        rows,
        cols,
        min_match,
        score_per_match: 10,
    }
}

/// Arbitrary grid with some empty cells and up to `kinds` block kinds
fn arb_grid(kinds: u8) -> impl Strategy<Value = Grid> {
    (1usize..8, 1usize..8).prop_flat_map(move |(rows, cols)| {
        prop::collection::vec(prop::option::weighted(0.8, 0..kinds), rows * cols).prop_map(
            move |cells| {
                Grid::from_rows(cells.chunks(cols).map(|row| {
                    row.iter()
                        .map(|c| c.map_or(Cell::Empty, |id| Cell::Block(BlockId(id))))
                        .collect::<Vec<_>>()
                }))
            },
        )
    })
}

fn column(grid: &Grid, col: usize) -> Vec<Cell> {
    (0..grid.rows()).map(|row| grid.get(row, col)).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn generated_grids_have_no_matches(
        seed in any::<u64>(),
        rows in 1usize..12,
        cols in 1usize..12,
        min_match in 2usize..5,
        extra in 0usize..4,
    ) {
        let palette = Palette::with_size(min_match + extra).unwrap();
        let rules = rules(rows, cols, min_match);
        prop_assert!(rules.validate(&palette).is_ok());
        let grid = generate(&rules, &palette, &mut Pcg32::seed_from_u64(seed)).unwrap();
        prop_assert!(find_all_matches(&grid, min_match).is_empty());
        prop_assert_eq!(grid.count_empty(), 0);
    }

    #[test]
    fn detection_is_idempotent_and_pure(grid in arb_grid(3), min_match in 2usize..4) {
        let before = grid.clone();
        let first = find_all_matches(&grid, min_match);
        let second = find_all_matches(&grid, min_match);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&grid, &before);
        for pos in &first {
            prop_assert!(!grid.at(*pos).is_empty());
        }
    }

    #[test]
    fn gravity_preserves_column_order(grid in arb_grid(4)) {
        let mut dropped = grid.clone();
        drop_blocks(&mut dropped);
        for col in 0..grid.cols() {
            let blocks_before: Vec<Cell> =
                column(&grid, col).into_iter().filter(|c| !c.is_empty()).collect();
            let after = column(&dropped, col);
            let gaps = after.len() - blocks_before.len();
            // Empties on top, then the same blocks in the same order
            prop_assert!(after[..gaps].iter().all(|c| c.is_empty()));
            prop_assert_eq!(&after[gaps..], &blocks_before[..]);
        }
    }

    #[test]
    fn cascade_reaches_fixed_point(seed in any::<u64>(), rows in 3usize..9, cols in 3usize..9) {
        let palette = Palette::with_size(5).unwrap();
        let rules = rules(rows, cols, 3);
        let mut rng = Pcg32::seed_from_u64(seed);
        // Unconstrained random fill, so there is usually something to clear
        let mut grid = Grid::new(rows, cols);
        gem_cascade::board::refill(&mut grid, &palette, &mut rng);
        let initial = find_all_matches(&grid, 3);
        let first = initial.len();
        let report = process(&mut grid, initial, &palette, &rules, &mut rng);
        prop_assert!(!has_matches(&grid, 3));
        prop_assert_eq!(grid.count_empty(), 0);
        let expected: u64 = report.passes.iter().map(|&n| n as u64 * 10).sum();
        prop_assert_eq!(report.score, expected);
        if first > 0 {
            prop_assert_eq!(report.passes[0], first);
        } else {
            prop_assert!(report.passes.is_empty());
        }
    }

    #[test]
    fn swaps_are_scored_per_pass_or_reverted(seed in any::<u64>(), r in 0usize..6, c in 0usize..6, down in any::<bool>()) {
        let palette = Palette::with_size(4).unwrap();
        let mut engine = Engine::from_parts(rules(6, 6, 3), palette, seed).unwrap();
        let before = engine.grid().clone();
        let (r2, c2) = if down { (r + 1, c) } else { (r, c + 1) };
        match engine.try_swap(r, c, r2, c2) {
            SwapOutcome::Reverted => {
                prop_assert_eq!(engine.grid(), &before);
                prop_assert_eq!(engine.score(), 0);
            }
            SwapOutcome::Committed { matches } => {
                let report = engine.resolve().unwrap();
                prop_assert_eq!(report.passes[0], matches.len());
                let expected: u64 = report.passes.iter().map(|&n| n as u64 * 10).sum();
                prop_assert_eq!(engine.score(), expected);
                prop_assert!(!has_matches(engine.grid(), 3));
            }
            SwapOutcome::Invalid => prop_assert!(r2 >= 6 || c2 >= 6),
            SwapOutcome::Busy => prop_assert!(false, "fresh engine cannot be busy"),
        }
        prop_assert!(!engine.is_busy());
    }
}

#[test]
fn cross_shaped_match_counts_each_cell_once() {
    let a = Cell::Block(BlockId(0));
    let b = Cell::Block(BlockId(1));
    let c = Cell::Block(BlockId(2));
    let grid = Grid::from_rows([
        vec![b, a, c],
        vec![a, a, a],
        vec![c, a, b],
    ]);
    let matches = find_all_matches(&grid, 3);
    let expected: BTreeSet<Coord> = [(0, 1), (1, 0), (1, 1), (1, 2), (2, 1)]
        .into_iter()
        .map(Coord::from)
        .collect();
    assert_eq!(matches, expected);
}
