//! The world.

use crate::{grid::Grid, rules::Rule};
use log::trace;
use std::{
    fmt::{self, Display, Formatter},
    mem,
};

/// The world.
///
/// It owns two grids of the same size: the current generation, and a
/// scratch grid that the next generation is written into. After each
/// step the two are swapped, so no grid is ever read and written at
/// the same time.
#[derive(Clone, Debug)]
pub struct World<R: Rule> {
    /// The rule of the cellular automaton.
    rule: R,

    /// The current generation.
    grid: Grid,

    /// The buffer for the next generation.
    ///
    /// Its content is meaningless between two steps.
    scratch: Grid,

    /// Number of steps since the initial pattern.
    gen: u64,

    /// Stops after this number of generations.
    max_gen: Option<u64>,
}

impl<R: Rule> World<R> {
    /// Creates a new world whose generation 0 is the given grid.
    pub fn new(grid: Grid, rule: R) -> Self {
        let scratch = grid.clone();
        World {
            rule,
            grid,
            scratch,
            gen: 0,
            max_gen: None,
        }
    }

    /// The current generation.
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The rule.
    #[inline]
    pub fn rule(&self) -> &R {
        &self.rule
    }

    /// Number of the current generation. The initial pattern is generation 0.
    #[inline]
    pub fn gen(&self) -> u64 {
        self.gen
    }

    /// The maximal number of generations.
    pub fn max_gen(&self) -> Option<u64> {
        self.max_gen
    }

    /// Sets the maximal number of generations.
    pub fn set_max_gen(&mut self, max_gen: Option<u64>) {
        self.max_gen = max_gen;
    }

    /// Whether the maximal number of generations is reached.
    pub fn is_finished(&self) -> bool {
        self.max_gen.map_or(false, |max_gen| self.gen >= max_gen)
    }

    /// Advances the world by one generation.
    ///
    /// Returns `false` without doing anything if the maximal number of
    /// generations is reached.
    pub fn step(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        self.grid.evolve(&self.rule, &mut self.scratch);
        mem::swap(&mut self.grid, &mut self.scratch);
        self.gen += 1;
        trace!(
            "generation {}: {} living cells",
            self.gen,
            self.grid.alive_count()
        );
        true
    }

    /// Advances the world by at most `n` generations.
    ///
    /// Returns the number of generations actually advanced.
    pub fn run(&mut self, n: u64) -> u64 {
        let mut count = 0;
        while count < n && self.step() {
            count += 1;
        }
        count
    }
}

impl<R: Rule + Display> World<R> {
    /// A report of the current generation.
    pub fn report(&self) -> GenReport {
        GenReport {
            gen: self.gen,
            alive: self.grid.alive_count(),
            total: self.grid.cell_count(),
            rule_string: self.rule.to_string(),
        }
    }

    /// Displays the current generation in RLE format.
    pub fn rle(&self) -> String {
        self.grid.rle(&self.rule.to_string())
    }
}

/// Statistics of one generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenReport {
    /// Number of the generation.
    pub gen: u64,
    /// Number of living cells.
    pub alive: usize,
    /// Total number of cells.
    pub total: usize,
    /// The rule string, in canonical form.
    pub rule_string: String,
}

impl GenReport {
    /// Percentage of living cells.
    pub fn percentage(&self) -> f64 {
        100.0 * self.alive as f64 / self.total as f64
    }
}

impl Display for GenReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "generation = {}   living cells = {}/{} ({:.6}%)   {}",
            self.gen,
            self.alive,
            self.total,
            self.percentage(),
            self.rule_string
        )
    }
}
