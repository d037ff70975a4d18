//! The grid.

use crate::{
    cells::{Coord, State, ALIVE, DEAD, NBHD},
    error::Error,
    rules::Rule,
};
use std::fmt::{self, Display, Formatter, Write};

/// Maximal length of a line when writing RLE.
const RLE_LINE_LEN: usize = 70;

/// A fixed-size rectangular grid of cells.
///
/// The grid has hard edges: positions outside `[0, height) × [0, width)`
/// are always considered dead, and nothing ever wraps around.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Width.
    width: isize,
    /// Height.
    height: isize,
    /// States of all cells, row by row.
    cells: Box<[State]>,
}

impl Grid {
    /// Creates a new grid where all cells are dead.
    ///
    /// Returns an error if the width or the height is not positive,
    /// or if the cells cannot be allocated.
    pub fn new(width: isize, height: isize) -> Result<Self, Error> {
        if width <= 0 || height <= 0 {
            return Err(Error::NonPositiveError);
        }
        let size = width
            .checked_mul(height)
            .and_then(|n| usize::try_from(n).ok())
            .ok_or(Error::TooLargeError(width, height))?;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(size)
            .map_err(|_| Error::TooLargeError(width, height))?;
        cells.resize(size, DEAD);
        Ok(Grid {
            width,
            height,
            cells: cells.into_boxed_slice(),
        })
    }

    /// Width.
    #[inline]
    pub fn width(&self) -> isize {
        self.width
    }

    /// Height.
    #[inline]
    pub fn height(&self) -> isize {
        self.height
    }

    /// Whether the coordinates lie in the grid.
    #[inline]
    pub fn contains(&self, (row, col): Coord) -> bool {
        (0..self.height).contains(&row) && (0..self.width).contains(&col)
    }

    #[inline]
    fn index(&self, coord: Coord) -> Option<usize> {
        if self.contains(coord) {
            Some((coord.0 * self.width + coord.1) as usize)
        } else {
            None
        }
    }

    /// Gets the state of a cell. Returns `None` if there is no such cell.
    pub fn get_cell_state(&self, coord: Coord) -> Option<State> {
        self.index(coord).map(|i| self.cells[i])
    }

    /// Sets the state of a cell.
    ///
    /// Returns an error if the cell lies outside the grid.
    pub fn set_cell_state(&mut self, coord: Coord, state: State) -> Result<(), Error> {
        let i = self.index(coord).ok_or(Error::SetCellError(coord))?;
        self.cells[i] = state;
        Ok(())
    }

    /// Whether the cell is alive. Cells outside the grid are dead.
    #[inline]
    pub fn is_alive(&self, coord: Coord) -> bool {
        self.get_cell_state(coord).map_or(false, State::is_alive)
    }

    /// Kills every cell.
    pub fn clear(&mut self) {
        self.cells.fill(DEAD);
    }

    /// Total number of cells, i.e., `width × height`.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of living cells.
    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|state| state.is_alive()).count()
    }

    /// Coordinates of all living cells, row by row.
    pub fn alive_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, state)| state.is_alive())
            .map(move |(i, _)| (i as isize / width, i as isize % width))
    }

    /// Counts the living cells among the eight neighbors of a cell.
    ///
    /// Neighbors outside the grid count as dead. Defined for any
    /// coordinates, including ones outside the grid. Always in `0..=8`.
    pub fn count_live_neighbors(&self, (row, col): Coord) -> u8 {
        NBHD.iter()
            .filter(|(dr, dc)| self.is_alive((row.wrapping_add(*dr), col.wrapping_add(*dc))))
            .count() as u8
    }

    /// Computes the next generation into a new grid.
    ///
    /// Every cell is computed from the current generation only,
    /// so all cells are updated simultaneously.
    pub fn step<R: Rule>(&self, rule: &R) -> Grid {
        let mut next = Grid {
            width: self.width,
            height: self.height,
            cells: vec![DEAD; self.cells.len()].into_boxed_slice(),
        };
        self.evolve(rule, &mut next);
        next
    }

    /// Computes the next generation into `next`, overwriting all its cells.
    ///
    /// Returns an error if `next` does not have the same size as `self`.
    pub fn step_into<R: Rule>(&self, rule: &R, next: &mut Grid) -> Result<(), Error> {
        if next.width != self.width || next.height != self.height {
            return Err(Error::DimensionMismatch);
        }
        self.evolve(rule, next);
        Ok(())
    }

    /// Computes the next generation into `next`,
    /// which must have the same size as `self`.
    pub(crate) fn evolve<R: Rule>(&self, rule: &R, next: &mut Grid) {
        for row in 0..self.height {
            for col in 0..self.width {
                let i = (row * self.width + col) as usize;
                let alives = self.count_live_neighbors((row, col));
                next.cells[i] = rule.transition(self.cells[i], alives);
            }
        }
    }

    /// Displays the grid in
    /// [Plaintext](https://conwaylife.com/wiki/Plaintext) format,
    /// without the header.
    ///
    /// * **Dead** cells are represented by `.`;
    /// * **Living** cells are represented by `o`.
    pub fn plaintext(&self) -> String {
        let mut str = String::with_capacity(self.cell_count() + self.height as usize);
        for row in self.cells.chunks(self.width as usize) {
            for state in row {
                str.push(if state.is_alive() { 'o' } else { '.' });
            }
            str.push('\n');
        }
        str
    }

    /// Displays the grid in [RLE](https://conwaylife.com/wiki/Rle) format.
    ///
    /// Trailing dead cells of a row and trailing empty rows are omitted.
    /// Rows are always separated by single `$`s, never by `n$`.
    pub fn rle(&self, rule_string: &str) -> String {
        let mut str = String::new();
        writeln!(
            str,
            "x = {}, y = {}, rule = {}",
            self.width, self.height, rule_string
        )
        .unwrap();

        let mut tokens = Vec::new();
        let rows: Vec<&[State]> = self.cells.chunks(self.width as usize).collect();
        let last_row = rows
            .iter()
            .rposition(|row| row.iter().any(|s| s.is_alive()))
            .unwrap_or(0);
        for (y, row) in rows[..=last_row].iter().enumerate() {
            let len = row.iter().rposition(|s| s.is_alive()).map_or(0, |x| x + 1);
            let mut x = 0;
            while x < len {
                let state = row[x];
                let run = row[x..len].iter().take_while(|&&s| s == state).count();
                let c = if state == ALIVE { 'o' } else { 'b' };
                tokens.push(if run == 1 {
                    c.to_string()
                } else {
                    format!("{}{}", run, c)
                });
                x += run;
            }
            tokens.push(if y == last_row { "!" } else { "$" }.to_string());
        }

        let mut line_len = 0;
        for token in tokens {
            if line_len + token.len() > RLE_LINE_LEN {
                str.push('\n');
                line_len = 0;
            }
            line_len += token.len();
            str.push_str(&token);
        }
        str.push('\n');
        str
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.plaintext())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Life;

    fn grid_with(width: isize, height: isize, cells: &[Coord]) -> Grid {
        let mut grid = Grid::new(width, height).unwrap();
        for &coord in cells {
            grid.set_cell_state(coord, ALIVE).unwrap();
        }
        grid
    }

    #[test]
    fn non_positive() {
        assert!(matches!(Grid::new(0, 5), Err(Error::NonPositiveError)));
        assert!(matches!(Grid::new(5, -1), Err(Error::NonPositiveError)));
        assert!(Grid::new(1, 1).is_ok());
    }

    #[test]
    fn too_large() {
        assert!(matches!(
            Grid::new(isize::MAX, 2),
            Err(Error::TooLargeError(isize::MAX, 2))
        ));
        assert!(matches!(
            Grid::new(1 << 62, 4),
            Err(Error::TooLargeError(_, 4))
        ));
        assert!(matches!(
            Grid::new(isize::MAX, isize::MAX),
            Err(Error::TooLargeError(_, _))
        ));
        // Representable, but far beyond any address space.
        assert!(matches!(
            Grid::new(1 << 31, 1 << 31),
            Err(Error::TooLargeError(_, _))
        ));
    }

    #[test]
    fn out_of_bounds() {
        let mut grid = Grid::new(3, 2).unwrap();
        assert_eq!(grid.get_cell_state((2, 0)), None);
        assert_eq!(grid.get_cell_state((0, 3)), None);
        assert_eq!(grid.get_cell_state((1, 2)), Some(DEAD));
        assert!(matches!(
            grid.set_cell_state((-1, 0), ALIVE),
            Err(Error::SetCellError((-1, 0)))
        ));
        assert!(!grid.is_alive((5, 5)));
    }

    #[test]
    fn corner_has_no_phantom_neighbors() {
        let grid = grid_with(3, 3, &[(0, 0)]);
        assert_eq!(grid.count_live_neighbors((0, 0)), 0);
        assert_eq!(grid.count_live_neighbors((1, 1)), 1);
        assert_eq!(grid.count_live_neighbors((2, 2)), 0);
    }

    #[test]
    fn full_grid() {
        let mut grid = Grid::new(3, 3).unwrap();
        for row in 0..3 {
            for col in 0..3 {
                grid.set_cell_state((row, col), ALIVE).unwrap();
            }
        }
        assert_eq!(grid.count_live_neighbors((1, 1)), 8);
        assert_eq!(grid.count_live_neighbors((0, 0)), 3);
        assert_eq!(grid.count_live_neighbors((0, 1)), 5);
        assert_eq!(grid.count_live_neighbors((-1, -1)), 1);
        assert_eq!(grid.count_live_neighbors((10, 10)), 0);
        assert_eq!(grid.alive_count(), 9);
        assert_eq!(grid.cell_count(), 9);
    }

    #[test]
    fn alive_cells() {
        let grid = grid_with(4, 3, &[(2, 3), (0, 1), (1, 0)]);
        let cells: Vec<_> = grid.alive_cells().collect();
        assert_eq!(cells, vec![(0, 1), (1, 0), (2, 3)]);
    }

    #[test]
    fn step_into_mismatch() {
        let grid = Grid::new(4, 4).unwrap();
        let mut next = Grid::new(4, 5).unwrap();
        assert!(matches!(
            grid.step_into(&Life::default(), &mut next),
            Err(Error::DimensionMismatch)
        ));
    }

    #[test]
    fn step_into_overwrites() {
        let grid = Grid::new(3, 3).unwrap();
        let mut next = grid_with(3, 3, &[(1, 1), (0, 2)]);
        grid.step_into(&Life::default(), &mut next).unwrap();
        assert_eq!(next.alive_count(), 0);
    }

    #[test]
    fn plaintext() {
        let grid = grid_with(3, 2, &[(0, 1), (1, 2)]);
        assert_eq!(grid.plaintext(), ".o.\n..o\n");
        assert_eq!(grid.to_string(), grid.plaintext());
    }

    #[test]
    fn rle() {
        let grid = grid_with(5, 4, &[(0, 1), (0, 2), (2, 0), (2, 4)]);
        assert_eq!(
            grid.rle("B3/S23"),
            "x = 5, y = 4, rule = B3/S23\nb2o$$o3bo!\n"
        );
        let empty = Grid::new(2, 2).unwrap();
        assert_eq!(empty.rle("B3/S23"), "x = 2, y = 2, rule = B3/S23\n!\n");
    }
}
