//! All kinds of errors in this crate.

use crate::cells::Coord;
use displaydoc::Display;
use std::io;
use thiserror::Error;

/// All kinds of errors in this crate.
#[derive(Debug, Display, Error)]
pub enum Error {
    /// Unable to set cell at {0:?}.
    SetCellError(Coord),
    /// Width / height should be positive.
    NonPositiveError,
    /// The world is too large: {0} × {1} cells.
    TooLargeError(isize, isize),
    /// The output grid must have the same size as the input grid.
    DimensionMismatch,
    /// Density should be between 0 and 1, got {0}.
    DensityError(f64),
    /// Unable to read the pattern: {0}.
    Io(#[from] io::Error),
}
