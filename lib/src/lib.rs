//! Simulates Life-like cellular automata on a bounded grid.
//!
//! A [`World`] holds a [`Grid`] of cells and a [`Rule`], and advances it
//! one generation at a time. Cells outside the grid are always dead.
//!
//! ```
//! use rlife_lib::{Config, ALIVE};
//!
//! let mut world = Config::new(4, 4).set_pattern("2o$2o!".to_string()).world()?;
//! world.run(10);
//! assert_eq!(world.grid().alive_count(), 4);
//! assert_eq!(world.grid().get_cell_state((1, 1)), Some(ALIVE));
//! # Ok::<(), rlife_lib::Error>(())
//! ```

mod cells;
mod config;
mod error;
mod grid;
mod pattern;
pub mod rules;
mod world;

pub use cells::{Coord, State, ALIVE, DEAD};
pub use config::Config;
pub use error::Error;
pub use grid::Grid;
pub use pattern::{
    decode_rle, load_pattern, seed_random, DecodeSummary, PatternSource, DEFAULT_DENSITY,
};
pub use rules::{Life, Rule};
pub use world::{GenReport, World};
