//! Cell values seen by the evaluator.
//!
//! The evaluator reads values through the [`CellValues`] trait, so it never needs to know
//! where a value came from. [`Board`] is the usual implementation: it combines the fixed
//! numbers printed in a [`Grid`] with the player's [`Assignment`].

use std::collections::{BTreeMap, btree_map};

use crossmath_core::{Cell, Grid, Position};

/// Read access to the current value of grid cells.
pub trait CellValues {
    /// Returns the value at `pos`, or `None` if the cell holds no value.
    fn value(&self, pos: Position) -> Option<i64>;
}

impl<T> CellValues for &T
where
    T: CellValues + ?Sized,
{
    fn value(&self, pos: Position) -> Option<i64> {
        (**self).value(pos)
    }
}

/// Fixed numbers only; slots are always empty.
impl CellValues for Grid {
    fn value(&self, pos: Position) -> Option<i64> {
        self.get(pos).and_then(|cell| cell.value())
    }
}

/// The player's current slot values.
///
/// This is the mutable part of a game: which number sits in which slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    values: BTreeMap<Position, i64>,
}

impl Assignment {
    /// Creates an empty assignment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value placed at `pos`.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<i64> {
        self.values.get(&pos).copied()
    }

    /// Places `value` at `pos`, returning the value it replaced.
    pub fn set(&mut self, pos: Position, value: i64) -> Option<i64> {
        self.values.insert(pos, value)
    }

    /// Empties `pos`, returning the value it held.
    pub fn remove(&mut self, pos: Position) -> Option<i64> {
        self.values.remove(&pos)
    }

    /// Returns `true` if `pos` holds a value.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        self.values.contains_key(&pos)
    }

    /// Returns the number of filled positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no position is filled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Empties every position.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Iterates over `(position, value)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, i64)> + '_ {
        self.values.iter().map(|(pos, value)| (*pos, *value))
    }
}

impl CellValues for Assignment {
    fn value(&self, pos: Position) -> Option<i64> {
        self.get(pos)
    }
}

impl FromIterator<(Position, i64)> for Assignment {
    fn from_iter<T: IntoIterator<Item = (Position, i64)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Assignment {
    type Item = (Position, i64);
    type IntoIter = btree_map::IntoIter<Position, i64>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

/// A grid together with the player's assignment.
///
/// Numbers come from the grid, slot values from the assignment. Assignment entries on
/// positions that are not slots are ignored.
///
/// # Examples
///
/// ```
/// use crossmath_core::{Grid, Position};
/// use crossmath_game::{Assignment, Board, CellValues};
///
/// let grid: Grid = "1 + _ = 4".parse()?;
/// let mut assignment = Assignment::new();
/// let board = Board::new(&grid, &assignment);
/// assert_eq!(board.value(Position::new(0, 0)), Some(1));
/// assert_eq!(board.value(Position::new(0, 1)), None);
/// assert_eq!(board.value(Position::new(0, 2)), None);
///
/// assignment.set(Position::new(0, 2), 3);
/// let board = Board::new(&grid, &assignment);
/// assert_eq!(board.value(Position::new(0, 2)), Some(3));
/// # Ok::<(), crossmath_core::GridParseError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Board<'a> {
    grid: &'a Grid,
    assignment: &'a Assignment,
}

impl<'a> Board<'a> {
    /// Combines a grid with an assignment.
    #[must_use]
    pub fn new(grid: &'a Grid, assignment: &'a Assignment) -> Self {
        Self { grid, assignment }
    }

    /// Returns the underlying grid.
    #[must_use]
    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    /// Returns the underlying assignment.
    #[must_use]
    pub fn assignment(&self) -> &'a Assignment {
        self.assignment
    }
}

impl CellValues for Board<'_> {
    fn value(&self, pos: Position) -> Option<i64> {
        match self.grid.get(pos)? {
            Cell::Number(value) => Some(*value),
            Cell::Slot => self.assignment.get(pos),
            Cell::Operator(_) | Cell::Equals | Cell::Blank => None,
        }
    }
}
