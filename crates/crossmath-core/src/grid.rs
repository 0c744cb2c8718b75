//! Rectangular puzzle grids.
//!
//! A [`Grid`] stores cells row-major and is immutable once built. It can be built from
//! nested rows ([`Grid::from_rows`]) or parsed from a whitespace-separated text form:
//!
//! ```text
//! 1 + _ = 4
//! + B + B B
//! _ + 4 = _
//! = B = B B
//! 3 + _ = 10
//! ```
//!
//! Tokens are integer literals (optionally negative), `+ - * /` (or `×`, `÷`), `=`,
//! `B` for a blank cell, and `_` for a player slot. [`Display`] writes the same form,
//! one row per line.

use std::{
    fmt::{self, Display},
    ops::Index,
    str::FromStr,
};

use crate::{Cell, Operator, Position};

/// Error returned when rows do not form a rectangular grid.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GridError {
    /// The grid has no rows, or its first row has no cells.
    #[display("grid has no cells")]
    Empty,
    /// A row's length differs from the first row's.
    #[display("row {row} has {found} cells, expected {expected}")]
    Ragged {
        /// Index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
}

/// Error returned when parsing a grid from text.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum GridParseError {
    /// A token is neither a number, an operator, `=`, `B`, nor `_`.
    #[display("unknown token {token:?} at {}", Position::new(*row, *col))]
    #[from(ignore)]
    UnknownToken {
        /// Row of the token.
        row: usize,
        /// Column of the token.
        col: usize,
        /// The token text.
        token: String,
    },
    /// The parsed rows are not rectangular.
    #[display("{_0}")]
    Shape(GridError),
}

/// A rectangular grid of [`Cell`]s.
///
/// # Examples
///
/// ```
/// use crossmath_core::{Cell, Grid, Operator, Position};
///
/// let grid: Grid = "8 / 2 = _".parse()?;
/// assert_eq!(grid.rows(), 1);
/// assert_eq!(grid.cols(), 5);
/// assert_eq!(grid[Position::new(0, 1)], Cell::Operator(Operator::Div));
/// assert_eq!(grid.slots().collect::<Vec<_>>(), vec![Position::new(0, 4)]);
/// # Ok::<(), crossmath_core::GridParseError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Builds a grid from nested rows.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Empty`] if there are no cells, or [`GridError::Ragged`] if
    /// the rows differ in length.
    pub fn from_rows<R>(rows: impl IntoIterator<Item = R>) -> Result<Self, GridError>
    where
        R: IntoIterator<Item = Cell>,
    {
        let mut cells = Vec::new();
        let mut cols = None;
        let mut n_rows = 0;
        for (row, cells_in_row) in rows.into_iter().enumerate() {
            let start = cells.len();
            cells.extend(cells_in_row);
            let found = cells.len() - start;
            match cols {
                None => cols = Some(found),
                Some(expected) if expected != found => {
                    return Err(GridError::Ragged {
                        row,
                        expected,
                        found,
                    });
                }
                Some(_) => {}
            }
            n_rows += 1;
        }
        match cols {
            Some(cols) if cols > 0 => Ok(Self {
                rows: n_rows,
                cols,
                cells,
            }),
            _ => Err(GridError::Empty),
        }
    }

    /// Returns the number of rows.
    #[must_use]
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `true` if `pos` lies inside the grid.
    #[must_use]
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.row() < self.rows && pos.col() < self.cols
    }

    /// Returns the cell at `pos`, or `None` if it lies outside the grid.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<&Cell> {
        self.contains(pos)
            .then(|| &self.cells[pos.row() * self.cols + pos.col()])
    }

    /// Returns the cells of row `row`, left to right.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of range.
    #[must_use]
    pub fn row(&self, row: usize) -> &[Cell] {
        assert!(row < self.rows, "row {row} out of range");
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    /// Returns the cells of column `col`, top to bottom.
    ///
    /// # Panics
    ///
    /// Panics if `col` is out of range.
    pub fn column(&self, col: usize) -> impl ExactSizeIterator<Item = &Cell> + '_ {
        assert!(col < self.cols, "column {col} out of range");
        self.cells.iter().skip(col).step_by(self.cols)
    }

    /// Returns all positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Position::new(row, col)))
    }

    /// Returns all positions paired with their cells, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Cell)> + '_ {
        self.positions().zip(&self.cells)
    }

    /// Returns the positions of all player slots, in row-major order.
    pub fn slots(&self) -> impl Iterator<Item = Position> + '_ {
        self.iter()
            .filter(|(_, cell)| cell.is_slot())
            .map(|(pos, _)| pos)
    }

    /// Returns a copy of this grid with the cell at `pos` replaced.
    ///
    /// Returns `None` if `pos` lies outside the grid.
    #[must_use]
    pub fn with_cell(&self, pos: Position, cell: Cell) -> Option<Self> {
        if !self.contains(pos) {
            return None;
        }
        let mut grid = self.clone();
        grid.cells[pos.row() * self.cols + pos.col()] = cell;
        Some(grid)
    }
}

impl Index<Position> for Grid {
    type Output = Cell;

    fn index(&self, pos: Position) -> &Self::Output {
        match self.get(pos) {
            Some(cell) => cell,
            None => panic!(
                "position {pos} out of range for {}x{} grid",
                self.rows, self.cols
            ),
        }
    }
}

fn parse_token(token: &str) -> Option<Cell> {
    match token {
        "=" => Some(Cell::Equals),
        "B" | "b" => Some(Cell::Blank),
        "_" => Some(Cell::Slot),
        _ => token
            .parse::<Operator>()
            .map(Cell::Operator)
            .or_else(|_| token.parse::<i64>().map(Cell::Number))
            .ok(),
    }
}

impl FromStr for Grid {
    type Err = GridParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(row, line)| {
                line.split_whitespace()
                    .enumerate()
                    .map(|(col, token)| {
                        parse_token(token).ok_or_else(|| GridParseError::UnknownToken {
                            row,
                            col,
                            token: token.to_owned(),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_rows(rows)?)
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            if row > 0 {
                writeln!(f)?;
            }
            for (col, cell) in self.row(row).iter().enumerate() {
                if col > 0 {
                    f.write_str(" ")?;
                }
                Display::fmt(cell, f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EASY: &str = "\
1 + _ = 4
+ B + B B
_ + 4 = _
= B = B B
3 + _ = 10
";

    #[test]
    fn test_parse_easy_grid() {
        let grid: Grid = EASY.parse().expect("valid grid");
        assert_eq!(grid.rows(), 5);
        assert_eq!(grid.cols(), 5);
        assert_eq!(grid[Position::new(0, 0)], Cell::Number(1));
        assert_eq!(grid[Position::new(0, 1)], Cell::Operator(Operator::Add));
        assert_eq!(grid[Position::new(0, 3)], Cell::Equals);
        assert_eq!(grid[Position::new(1, 1)], Cell::Blank);
        assert_eq!(grid[Position::new(4, 4)], Cell::Number(10));
        assert_eq!(
            grid.slots().collect::<Vec<_>>(),
            vec![
                Position::new(0, 2),
                Position::new(2, 0),
                Position::new(2, 4),
                Position::new(4, 2),
            ]
        );
    }

    #[test]
    fn test_negative_numbers_and_minus() {
        let grid: Grid = "-3 - -4 = 1".parse().expect("valid grid");
        assert_eq!(
            grid.row(0),
            &[
                Cell::Number(-3),
                Cell::Operator(Operator::Sub),
                Cell::Number(-4),
                Cell::Equals,
                Cell::Number(1),
            ]
        );
    }

    #[test]
    fn test_display_matches_text_form() {
        let grid: Grid = EASY.parse().expect("valid grid");
        assert_eq!(format!("{grid}\n"), EASY);
        assert_eq!(grid.to_string().parse::<Grid>(), Ok(grid));
    }

    #[test]
    fn test_column_iteration() {
        let grid: Grid = EASY.parse().expect("valid grid");
        let column: Vec<Cell> = grid.column(4).copied().collect();
        assert_eq!(
            column,
            vec![
                Cell::Number(4),
                Cell::Blank,
                Cell::Slot,
                Cell::Blank,
                Cell::Number(10),
            ]
        );
    }

    #[test]
    fn test_rejects_unknown_token() {
        let err = "1 + x = 4".parse::<Grid>().unwrap_err();
        assert_eq!(
            err,
            GridParseError::UnknownToken {
                row: 0,
                col: 2,
                token: "x".to_owned(),
            }
        );
        assert_eq!(err.to_string(), "unknown token \"x\" at (0, 2)");
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let err = "1 + 2 = 3\n+ B".parse::<Grid>().unwrap_err();
        assert_eq!(
            err,
            GridParseError::Shape(GridError::Ragged {
                row: 1,
                expected: 5,
                found: 2,
            })
        );
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!("".parse::<Grid>(), Err(GridParseError::Shape(GridError::Empty)));
        assert_eq!(
            Grid::from_rows(Vec::<Vec<Cell>>::new()),
            Err(GridError::Empty)
        );
        assert_eq!(Grid::from_rows([Vec::<Cell>::new()]), Err(GridError::Empty));
    }

    #[test]
    fn test_get_and_with_cell() {
        let grid: Grid = "1 + _ = 4".parse().expect("valid grid");
        assert_eq!(grid.get(Position::new(0, 5)), None);
        assert_eq!(grid.get(Position::new(1, 0)), None);

        let filled = grid
            .with_cell(Position::new(0, 2), Cell::Number(3))
            .expect("in range");
        assert_eq!(filled[Position::new(0, 2)], Cell::Number(3));
        assert_eq!(grid[Position::new(0, 2)], Cell::Slot);
        assert!(grid.with_cell(Position::new(2, 2), Cell::Blank).is_none());
    }
}
