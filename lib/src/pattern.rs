//! Initial patterns.
//!
//! A grid is populated once, either from a pattern written in
//! [RLE](https://conwaylife.com/wiki/Rle) format, or randomly.

use crate::{
    cells::{Coord, ALIVE},
    error::Error,
    grid::Grid,
};
use log::warn;
use rand::Rng;
use std::io::{BufRead, Read};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The default probability for a cell to be alive in a random pattern.
pub const DEFAULT_DENSITY: f64 = 0.1;

/// Where the initial pattern comes from.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PatternSource {
    /// A pattern in RLE format.
    Rle(String),

    /// Each cell is independently alive with the given probability.
    Random {
        /// The probability for a cell to be alive.
        density: f64,
    },
}

impl Default for PatternSource {
    fn default() -> Self {
        PatternSource::Random {
            density: DEFAULT_DENSITY,
        }
    }
}

impl PatternSource {
    /// Reads an RLE pattern from a reader.
    pub fn from_reader<B: BufRead>(mut reader: B) -> Result<Self, Error> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(PatternSource::Rle(text))
    }
}

/// The result of decoding a pattern into a grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeSummary {
    /// Number of cells set to alive.
    pub alive: usize,
    /// Number of living cells that fell outside the grid and were dropped.
    pub clipped: usize,
}

/// Populates the grid from the pattern source.
///
/// The grid is cleared first. `rng` is only used by
/// [`PatternSource::Random`].
pub fn load_pattern<R: Rng + ?Sized>(
    source: &PatternSource,
    grid: &mut Grid,
    rng: &mut R,
) -> Result<DecodeSummary, Error> {
    grid.clear();
    match source {
        PatternSource::Rle(text) => Ok(decode_rle(text, grid)),
        &PatternSource::Random { density } => seed_random(grid, density, rng),
    }
}

/// Makes each cell of the grid alive with probability `density`.
///
/// Cells that are already alive stay alive.
pub fn seed_random<R: Rng + ?Sized>(
    grid: &mut Grid,
    density: f64,
    rng: &mut R,
) -> Result<DecodeSummary, Error> {
    if !(0.0..=1.0).contains(&density) {
        return Err(Error::DensityError(density));
    }
    let mut summary = DecodeSummary::default();
    for row in 0..grid.height() {
        for col in 0..grid.width() {
            if rng.gen_bool(density) {
                grid.set_cell_state((row, col), ALIVE)?;
                summary.alive += 1;
            }
        }
    }
    Ok(summary)
}

/// Decodes a pattern in RLE format into the grid.
///
/// Only the body of the pattern is read:
///
/// * lines starting with `#` (comments) or `x` (the header) are skipped,
///   so the size in the header is ignored and the size of the grid is used;
/// * a number sets the run length of the next `b` or `o`, which is 1 if
///   no number is given;
/// * `o` makes a run of living cells, `b` skips a run of dead cells;
/// * `$` moves to the start of the next row. A number before it is
///   neither used as a repeat count nor discarded, so it carries over
///   to the next `b` or `o`;
/// * `!` ends the pattern;
/// * other characters are ignored.
///
/// Living cells outside the grid are dropped and counted in
/// [`DecodeSummary::clipped`].
pub fn decode_rle(text: &str, grid: &mut Grid) -> DecodeSummary {
    let mut summary = DecodeSummary::default();
    let (mut x, mut y): (isize, isize) = (0, 0);
    let mut run: isize = 0;

    'lines: for line in text.lines() {
        if line.starts_with('#') || line.starts_with('x') {
            continue;
        }
        for c in line.chars() {
            match c {
                '0'..='9' => {
                    let digit = c as isize - '0' as isize;
                    run = run.saturating_mul(10).saturating_add(digit);
                }
                'b' | 'o' => {
                    let len = run.max(1);
                    if c == 'o' {
                        mark_run(grid, (y, x), len, &mut summary);
                    }
                    x = x.saturating_add(len);
                    run = 0;
                }
                '$' => {
                    x = 0;
                    y = y.saturating_add(1);
                }
                '!' => break 'lines,
                _ => (),
            }
        }
    }

    if summary.clipped > 0 {
        warn!(
            "{} living cells of the pattern lie outside the {}x{} grid and were dropped",
            summary.clipped,
            grid.width(),
            grid.height()
        );
    }
    summary
}

/// Makes `len` cells alive, starting from `(row, col)` and going right.
fn mark_run(grid: &mut Grid, (row, col): Coord, len: isize, summary: &mut DecodeSummary) {
    let start = col.clamp(0, grid.width());
    let end = col.saturating_add(len).clamp(0, grid.width());
    let mut inside = 0;
    if (0..grid.height()).contains(&row) {
        for x in start..end {
            if grid.set_cell_state((row, x), ALIVE).is_ok() {
                inside += 1;
            }
        }
    }
    summary.alive += inside;
    summary.clipped = summary.clipped.saturating_add(len as usize - inside);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn alive(grid: &Grid) -> Vec<Coord> {
        grid.alive_cells().collect()
    }

    #[test]
    fn block() {
        let mut grid = Grid::new(4, 4).unwrap();
        let summary = decode_rle("2o$2o!", &mut grid);
        assert_eq!(alive(&grid), vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
        assert_eq!(summary, DecodeSummary { alive: 4, clipped: 0 });
    }

    #[test]
    fn glider_with_header() {
        let text = "#N Glider\n#C A comment\nx = 3, y = 3, rule = B3/S23\nbob$2bo$3o!\n";
        let mut grid = Grid::new(5, 5).unwrap();
        decode_rle(text, &mut grid);
        assert_eq!(alive(&grid), vec![(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)]);
    }

    #[test]
    fn pattern_spans_lines() {
        let mut grid = Grid::new(12, 3).unwrap();
        decode_rle("1\n0o$\no!", &mut grid);
        assert_eq!(grid.alive_count(), 11);
        assert!(grid.is_alive((0, 9)));
        assert!(grid.is_alive((1, 0)));
    }

    #[test]
    fn stops_at_bang() {
        let mut grid = Grid::new(4, 4).unwrap();
        decode_rle("o!\n3o\n", &mut grid);
        assert_eq!(alive(&grid), vec![(0, 0)]);
    }

    #[test]
    fn number_before_dollar_carries_over() {
        let mut grid = Grid::new(6, 6).unwrap();
        decode_rle("o2$o!", &mut grid);
        // `2$` is not a blank row skip; the 2 becomes the run of the next `o`.
        assert_eq!(alive(&grid), vec![(0, 0), (1, 0), (1, 1)]);
    }

    #[test]
    fn unknown_characters_are_ignored() {
        let mut grid = Grid::new(4, 4).unwrap();
        decode_rle("o z\tA?o$ob!", &mut grid);
        assert_eq!(alive(&grid), vec![(0, 0), (0, 1), (1, 0)]);
    }

    #[test]
    fn clipped() {
        let mut grid = Grid::new(3, 2).unwrap();
        let summary = decode_rle("b5o$o$o$2o!", &mut grid);
        assert_eq!(alive(&grid), vec![(0, 1), (0, 2), (1, 0)]);
        assert_eq!(summary, DecodeSummary { alive: 3, clipped: 6 });
    }

    #[test]
    fn huge_run_does_not_overflow() {
        let mut grid = Grid::new(3, 3).unwrap();
        let summary = decode_rle("99999999999999999999999b99o$o!", &mut grid);
        assert_eq!(alive(&grid), vec![(1, 0)]);
        assert_eq!(summary.alive, 1);
        assert_eq!(summary.clipped, 99);
    }

    #[test]
    fn random_is_reproducible() -> Result<(), Error> {
        let mut a = Grid::new(30, 20)?;
        let mut b = Grid::new(30, 20)?;
        let source = PatternSource::default();
        load_pattern(&source, &mut a, &mut StdRng::seed_from_u64(42))?;
        load_pattern(&source, &mut b, &mut StdRng::seed_from_u64(42))?;
        assert_eq!(a, b);
        Ok(())
    }

    #[test]
    fn random_extremes() -> Result<(), Error> {
        let mut rng = StdRng::seed_from_u64(7);
        let mut grid = Grid::new(10, 10)?;
        load_pattern(&PatternSource::Random { density: 0.0 }, &mut grid, &mut rng)?;
        assert_eq!(grid.alive_count(), 0);
        let summary =
            load_pattern(&PatternSource::Random { density: 1.0 }, &mut grid, &mut rng)?;
        assert_eq!(grid.alive_count(), 100);
        assert_eq!(summary.alive, 100);
        Ok(())
    }

    #[test]
    fn bad_density() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut grid = Grid::new(2, 2).unwrap();
        for density in [-0.1, 1.5, f64::NAN] {
            assert!(matches!(
                seed_random(&mut grid, density, &mut rng),
                Err(Error::DensityError(_))
            ));
        }
    }

    #[test]
    fn load_clears_grid() -> Result<(), Error> {
        let mut grid = Grid::new(3, 3)?;
        grid.set_cell_state((2, 2), ALIVE)?;
        let source = PatternSource::Rle("o!".to_string());
        load_pattern(&source, &mut grid, &mut StdRng::seed_from_u64(0))?;
        assert_eq!(alive(&grid), vec![(0, 0)]);
        Ok(())
    }

    #[test]
    fn from_reader() -> Result<(), Error> {
        let source = PatternSource::from_reader("#C block\n2o$2o!\n".as_bytes())?;
        assert_eq!(source, PatternSource::Rle("#C block\n2o$2o!\n".to_string()));
        Ok(())
    }
}
