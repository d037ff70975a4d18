//! World configuration.

use crate::{
    error::Error,
    grid::Grid,
    pattern::{load_pattern, PatternSource, DEFAULT_DENSITY},
    rules::Life,
    world::World,
};
use educe::Educe;
use log::debug;
use rand::{rngs::StdRng, SeedableRng};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// World configuration.
///
/// The world will be generated from this configuration.
#[derive(Clone, Debug, Educe, PartialEq)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct Config {
    /// Width.
    #[educe(Default = 70)]
    pub width: isize,

    /// Height.
    #[educe(Default = 40)]
    pub height: isize,

    /// The rule string of the cellular automaton.
    ///
    /// See [`Life::parse_rule`] for how it is read.
    #[educe(Default = "B3/S23")]
    pub rule_string: String,

    /// The initial pattern in RLE format.
    ///
    /// `None` means that the world is filled randomly
    /// with the given [`density`](#structfield.density).
    pub pattern: Option<String>,

    /// The probability for a cell to be alive in a random pattern.
    #[educe(Default = 0.1)]
    pub density: f64,

    /// The seed of the random number generator.
    ///
    /// `None` means that the generator is seeded from the system's
    /// entropy source, so that every run is different.
    pub seed: Option<u64>,

    /// Stops after this number of generations.
    ///
    /// `None` means that there is no limit.
    pub max_gen: Option<u64>,
}

impl Config {
    /// Sets up a new configuration with given size.
    pub fn new(width: isize, height: isize) -> Self {
        Config {
            width,
            height,
            ..Config::default()
        }
    }

    /// Sets the rule string.
    pub fn set_rule_string<S: ToString>(mut self, rule_string: S) -> Self {
        self.rule_string = rule_string.to_string();
        self
    }

    /// Sets the initial pattern in RLE format.
    pub fn set_pattern<T: Into<Option<String>>>(mut self, pattern: T) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Sets the density of random patterns.
    pub fn set_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    /// Sets the seed of the random number generator.
    pub fn set_seed<T: Into<Option<u64>>>(mut self, seed: T) -> Self {
        self.seed = seed.into();
        self
    }

    /// Sets the maximal number of generations.
    pub fn set_max_gen<T: Into<Option<u64>>>(mut self, max_gen: T) -> Self {
        self.max_gen = max_gen.into();
        self
    }

    /// The rule of the cellular automaton.
    pub fn rule(&self) -> Life {
        Life::parse_rule(&self.rule_string)
    }

    /// Where the initial pattern comes from.
    pub fn pattern_source(&self) -> PatternSource {
        match &self.pattern {
            Some(text) => PatternSource::Rle(text.clone()),
            None => PatternSource::Random {
                density: self.density,
            },
        }
    }

    /// The random number generator for random patterns.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Creates a new world from the configuration.
    ///
    /// Returns an error if the width or the height is not positive,
    /// or if the density of a random pattern is not in `[0, 1]`.
    pub fn world(&self) -> Result<World<Life>, Error> {
        let mut grid = Grid::new(self.width, self.height)?;
        let rule = self.rule();
        let source = self.pattern_source();
        let summary = load_pattern(&source, &mut grid, &mut self.rng())?;
        debug!(
            "created a {}x{} world with rule {}: {} living cells, {} dropped",
            self.width, self.height, rule, summary.alive, summary.clipped
        );
        let mut world = World::new(grid, rule);
        world.set_max_gen(self.max_gen);
        Ok(world)
    }
}
