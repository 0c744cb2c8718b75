//! Core data structures for cross-math puzzles.
//!
//! A cross-math puzzle is a crossword-shaped grid in which rows and columns alternate
//! between value cells and operator cells, ending in an equals sign and a result cell.
//! This crate provides the grid representation and the scan that turns a grid into the
//! set of equations the player has to satisfy.
//!
//! # Overview
//!
//! 1. **Grid types**
//!    - [`position`]: Zero-based `(row, col)` coordinates
//!    - [`operator`]: The four arithmetic operators and their checked application
//!    - [`cell`]: What a single grid cell holds
//!    - [`grid`]: Rectangular cell storage with a plain-text format
//!
//! 2. **Equation topology**
//!    - [`equation`]: Equations, their orientation, and their stable keys
//!    - [`discovery`]: [`find_equations`], the row/column scan producing an [`EquationSet`]
//!
//! # Examples
//!
//! ```
//! use crossmath_core::{Grid, Orientation, find_equations};
//!
//! let grid: Grid = "\
//! 1 + _ = 4
//! + B + B B
//! _ + 4 = _
//! = B = B B
//! 3 + _ = 10
//! "
//! .parse()?;
//!
//! let equations = find_equations(&grid);
//! assert_eq!(equations.len(), 5);
//! assert_eq!(
//!     equations
//!         .iter()
//!         .filter(|eq| eq.key().orientation() == Orientation::Vertical)
//!         .count(),
//!     2
//! );
//! # Ok::<(), crossmath_core::GridParseError>(())
//! ```

pub mod cell;
pub mod discovery;
pub mod equation;
pub mod grid;
pub mod operator;
pub mod position;

pub use self::{
    cell::Cell,
    discovery::find_equations,
    equation::{Equation, EquationKey, EquationSet, Orientation},
    grid::{Grid, GridError, GridParseError},
    operator::{Operator, ParseOperatorError},
    position::Position,
};
