//! Grid coordinates.

use std::fmt::{self, Display};

/// A zero-based cell coordinate within a grid.
///
/// Positions order row-major: first by `row`, then by `col`.
///
/// # Examples
///
/// ```
/// use crossmath_core::Position;
///
/// let pos = Position::new(2, 4);
/// assert_eq!(pos.row(), 2);
/// assert_eq!(pos.col(), 4);
/// assert_eq!(pos.to_string(), "(2, 4)");
/// assert!(Position::new(0, 9) < Position::new(1, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    row: usize,
    col: usize,
}

impl Position {
    /// Creates a position from a row and column index.
    #[must_use]
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the row index.
    #[must_use]
    #[inline]
    pub const fn row(self) -> usize {
        self.row
    }

    /// Returns the column index.
    #[must_use]
    #[inline]
    pub const fn col(self) -> usize {
        self.col
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}
