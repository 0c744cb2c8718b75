//! Equations discovered from a grid.
//!
//! An [`Equation`] is never authored directly; [`find_equations`](crate::find_equations)
//! derives it from the position of an equals sign in a row or column. Each equation is
//! identified by an [`EquationKey`] that stays the same for every validation pass of a
//! puzzle, so state changes can be tracked across passes.

use std::{
    collections::HashSet,
    fmt::{self, Display},
};

use crate::{Operator, Position};

/// The direction in which an equation reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::IsVariant)]
pub enum Orientation {
    /// Reads left to right along a row.
    Horizontal,
    /// Reads top to bottom along a column.
    Vertical,
}

impl Orientation {
    /// Returns a single-letter tag (`h` or `v`).
    #[must_use]
    pub const fn tag(self) -> char {
        match self {
            Self::Horizontal => 'h',
            Self::Vertical => 'v',
        }
    }

    /// Returns the position `offset` cells along this orientation from the start of
    /// line `line`.
    #[must_use]
    pub const fn position(self, line: usize, offset: usize) -> Position {
        match self {
            Self::Horizontal => Position::new(line, offset),
            Self::Vertical => Position::new(offset, line),
        }
    }
}

/// Stable identity of an equation.
///
/// The key combines the orientation with the anchor, the position of the first operand.
/// It depends only on grid topology, so it is identical across validation passes of the
/// same puzzle.
///
/// # Examples
///
/// ```
/// use crossmath_core::{EquationKey, Orientation, Position};
///
/// let key = EquationKey::new(Orientation::Vertical, Position::new(0, 2));
/// assert_eq!(key.to_string(), "v@(0, 2)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EquationKey {
    orientation: Orientation,
    anchor: Position,
}

impl EquationKey {
    /// Creates a key from an orientation and an anchor position.
    #[must_use]
    pub const fn new(orientation: Orientation, anchor: Position) -> Self {
        Self {
            orientation,
            anchor,
        }
    }

    /// Returns the orientation.
    #[must_use]
    pub const fn orientation(self) -> Orientation {
        self.orientation
    }

    /// Returns the anchor (first operand) position.
    #[must_use]
    pub const fn anchor(self) -> Position {
        self.anchor
    }
}

impl Display for EquationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.orientation.tag(), self.anchor)
    }
}

/// A chain of operands joined by operators, terminating in a result cell.
///
/// Operators apply strictly left to right: `a op1 b op2 c` means `((a op1 b) op2 c)`.
///
/// Invariants, upheld by [`Equation::new`]:
///
/// - there are at least two operands;
/// - there is exactly one operator fewer than there are operands;
/// - the result position differs from every operand position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Equation {
    key: EquationKey,
    operands: Vec<Position>,
    operators: Vec<Operator>,
    result: Position,
}

impl Equation {
    /// Creates an equation, or returns `None` if the parts violate an invariant.
    ///
    /// The key's anchor is taken from the first operand.
    ///
    /// # Examples
    ///
    /// ```
    /// use crossmath_core::{Equation, Operator, Orientation, Position};
    ///
    /// let eq = Equation::new(
    ///     Orientation::Horizontal,
    ///     vec![Position::new(0, 0), Position::new(0, 2)],
    ///     vec![Operator::Add],
    ///     Position::new(0, 4),
    /// )
    /// .expect("valid equation");
    /// assert_eq!(eq.key().anchor(), Position::new(0, 0));
    ///
    /// // A single operand is not an equation.
    /// assert!(
    ///     Equation::new(
    ///         Orientation::Horizontal,
    ///         vec![Position::new(0, 0)],
    ///         vec![],
    ///         Position::new(0, 2),
    ///     )
    ///     .is_none()
    /// );
    /// ```
    #[must_use]
    pub fn new(
        orientation: Orientation,
        operands: Vec<Position>,
        operators: Vec<Operator>,
        result: Position,
    ) -> Option<Self> {
        if operands.len() < 2 || operators.len() + 1 != operands.len() {
            return None;
        }
        if operands.contains(&result) {
            return None;
        }
        let key = EquationKey::new(orientation, operands[0]);
        Some(Self {
            key,
            operands,
            operators,
            result,
        })
    }

    /// Returns the stable key of this equation.
    #[must_use]
    pub fn key(&self) -> EquationKey {
        self.key
    }

    /// Returns the operand positions in evaluation order.
    #[must_use]
    pub fn operands(&self) -> &[Position] {
        &self.operands
    }

    /// Returns the operators; `operators()[i]` joins the accumulated value with
    /// `operands()[i + 1]`.
    #[must_use]
    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    /// Returns the result position.
    #[must_use]
    pub fn result(&self) -> Position {
        self.result
    }

    /// Returns every participating position: operands in order, then the result.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.operands
            .iter()
            .copied()
            .chain(std::iter::once(self.result))
    }
}

impl Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.operands[0])?;
        for (op, operand) in self.operators.iter().zip(&self.operands[1..]) {
            write!(f, " {op} {operand}")?;
        }
        write!(f, " = {}", self.result)
    }
}

/// The deduplicated set of equations of one grid.
///
/// Equations keep their insertion order. Inserting an equation whose key is already
/// present is a no-op, so the first occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquationSet {
    equations: Vec<Equation>,
    keys: HashSet<EquationKey>,
}

impl EquationSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an equation unless one with the same key is already present.
    ///
    /// Returns `true` if the equation was inserted.
    pub fn insert(&mut self, equation: Equation) -> bool {
        if !self.keys.insert(equation.key()) {
            return false;
        }
        self.equations.push(equation);
        true
    }

    /// Returns the number of equations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.equations.len()
    }

    /// Returns `true` if the set holds no equations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.equations.is_empty()
    }

    /// Returns the equation with the given key.
    #[must_use]
    pub fn get(&self, key: EquationKey) -> Option<&Equation> {
        if !self.keys.contains(&key) {
            return None;
        }
        self.equations.iter().find(|eq| eq.key() == key)
    }

    /// Returns an iterator over the equations in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Equation> {
        self.equations.iter()
    }
}

impl<'a> IntoIterator for &'a EquationSet {
    type Item = &'a Equation;
    type IntoIter = std::slice::Iter<'a, Equation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Equation> for EquationSet {
    fn from_iter<T: IntoIterator<Item = Equation>>(iter: T) -> Self {
        let mut set = Self::new();
        for equation in iter {
            set.insert(equation);
        }
        set
    }
}
