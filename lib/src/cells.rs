//! Cells in the cellular automaton.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Possible states of a cell.
///
/// A cell has no identity beyond its position in the grid. The state is
/// simply overwritten from one generation to the next.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct State(pub bool);

/// The Dead state.
pub const DEAD: State = State(false);
/// The Alive state.
pub const ALIVE: State = State(true);

impl State {
    /// Whether the state is [`ALIVE`].
    #[inline]
    pub const fn is_alive(self) -> bool {
        self.0
    }
}

/// The coordinates of a cell.
///
/// `(row, column)`, both 0-indexed. Signed, so that positions just outside
/// the grid can be named when looking at the neighbors of a border cell.
pub type Coord = (isize, isize);

/// The eight offsets of the Moore neighborhood, as `(Δrow, Δcol)`.
pub(crate) const NBHD: [Coord; 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];
