//! Grid cell contents.

use std::fmt::{self, Display};

use crate::Operator;

/// The content of a single grid cell.
///
/// Cells are fixed once a puzzle is loaded. Player input lives outside the grid and is
/// attached to [`Cell::Slot`] positions by the game layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum Cell {
    /// A pre-printed number.
    Number(i64),
    /// An operator between two operands.
    Operator(Operator),
    /// The equals sign preceding a result cell.
    Equals,
    /// Structural spacing. Never part of an equation, never interactive.
    Blank,
    /// A position the player fills with a number from the bank.
    Slot,
}

impl Cell {
    /// Returns the fixed numeric value of this cell, if it is a number.
    #[must_use]
    #[inline]
    pub const fn value(self) -> Option<i64> {
        match self {
            Self::Number(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the operator held in this cell, if any.
    #[must_use]
    #[inline]
    pub const fn operator(self) -> Option<Operator> {
        match self {
            Self::Operator(op) => Some(op),
            _ => None,
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => Display::fmt(value, f),
            Self::Operator(op) => Display::fmt(op, f),
            Self::Equals => f.write_str("="),
            Self::Blank => f.write_str("B"),
            Self::Slot => f.write_str("_"),
        }
    }
}

impl From<Operator> for Cell {
    fn from(op: Operator) -> Self {
        Self::Operator(op)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}
