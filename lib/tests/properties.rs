//! Property-based tests for neighbor counting and evolution.

use proptest::prelude::*;
use rlife_lib::{Grid, Life, Rule, ALIVE};

/// A grid of the given size with the given cells alive.
fn arb_grid() -> impl Strategy<Value = Grid> {
    (1..12isize, 1..12isize).prop_flat_map(|(width, height)| {
        prop::collection::vec(any::<bool>(), (width * height) as usize).prop_map(move |cells| {
            let mut grid = Grid::new(width, height).unwrap();
            for (i, alive) in cells.into_iter().enumerate() {
                if alive {
                    let i = i as isize;
                    grid.set_cell_state((i / width, i % width), ALIVE).unwrap();
                }
            }
            grid
        })
    })
}

fn arb_rule() -> impl Strategy<Value = Life> {
    (
        prop::collection::vec(0..=8u8, 0..9),
        prop::collection::vec(0..=8u8, 0..9),
    )
        .prop_map(|(b, s)| Life::new(&b, &s))
}

proptest! {
    /// The count is in 0..=8 everywhere, even far outside the grid.
    #[test]
    fn prop_count_in_range(grid in arb_grid(), row in -3..15isize, col in -3..15isize) {
        prop_assert!(grid.count_live_neighbors((row, col)) <= 8);
    }

    /// The count is the population of the 3×3 box minus the center.
    #[test]
    fn prop_count_is_box_minus_center(grid in arb_grid(), row in -2..14isize, col in -2..14isize) {
        let mut expected = 0;
        for r in row - 1..=row + 1 {
            for c in col - 1..=col + 1 {
                if (r, c) != (row, col) && grid.is_alive((r, c)) {
                    expected += 1;
                }
            }
        }
        prop_assert_eq!(grid.count_live_neighbors((row, col)) as i32, expected);
    }

    /// Stepping is a pure function of the grid and the rule.
    #[test]
    fn prop_step_is_deterministic(grid in arb_grid(), rule in arb_rule()) {
        let first = grid.step(&rule);
        let second = grid.step(&rule);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.width(), grid.width());
        prop_assert_eq!(first.height(), grid.height());
    }

    /// Every cell of the next generation follows the rule applied
    /// to the previous generation.
    #[test]
    fn prop_step_is_synchronous(grid in arb_grid(), rule in arb_rule()) {
        let next = grid.step(&rule);
        for row in 0..grid.height() {
            for col in 0..grid.width() {
                let state = grid.get_cell_state((row, col)).unwrap();
                let alives = grid.count_live_neighbors((row, col));
                prop_assert_eq!(
                    next.get_cell_state((row, col)).unwrap(),
                    rule.transition(state, alives)
                );
            }
        }
    }

    /// Displaying a rule and parsing it again gives the same rule.
    #[test]
    fn prop_rule_string(rule in arb_rule()) {
        prop_assert_eq!(Life::parse_rule(&rule.to_string()), rule);
    }
}
