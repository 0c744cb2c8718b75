//! Equation evaluation, state tracking, and game sessions for cross-math puzzles.
//!
//! The evaluator turns the equations derived by [`crossmath_core::find_equations`] into
//! per-equation states, per-cell feedback, and transitions relative to the previous pass.
//! Around it sit the pieces needed to play: validated puzzles, the number bank, a
//! [`Game`] session, and level packs.
//!
//! # Overview
//!
//! - [`evaluate`] and [`validate`]: pure functions over equations and cell values
//! - [`Tracker`]: carries the previous pass's states for incremental feedback
//! - [`Puzzle`] and [`PuzzleDefinition`]: authored level data and its checked form
//! - [`Game`]: places and picks up bank numbers, one validation pass per action
//! - [`PuzzleLibrary`] and [`Progress`]: ordered levels and how far the player got
//!
//! # Examples
//!
//! ```
//! use crossmath_core::{Grid, Position, find_equations};
//! use crossmath_game::{Assignment, Board, EquationStates, TransitionKind, validate};
//!
//! let grid: Grid = "4 * _ - 5 = 7".parse()?;
//! let equations = find_equations(&grid);
//! let slot = Position::new(0, 2);
//!
//! let assignment: Assignment = [(slot, 3)].into_iter().collect();
//! let report = validate(
//!     &equations,
//!     &Board::new(&grid, &assignment),
//!     [slot],
//!     &EquationStates::new(),
//! );
//! assert!(report.is_complete());
//! assert_eq!(report.transitions()[0].kind(), TransitionKind::BecameCorrect);
//! # Ok::<(), crossmath_core::GridParseError>(())
//! ```

pub use self::{
    bank::{Bank, BankError, BankItem},
    evaluator::{
        EquationReport, Tracker, Transition, TransitionKind, ValidationReport, evaluate, validate,
    },
    game::{Game, GameError},
    library::{LibraryError, PuzzleLibrary},
    progress::Progress,
    puzzle::{Marker, Puzzle, PuzzleDefinition, PuzzleError, SlotSolution},
    state::{CellStatus, EquationState, EquationStates},
    values::{Assignment, Board, CellValues},
};

mod bank;
mod evaluator;
mod game;
mod library;
mod progress;
mod puzzle;
mod state;
mod values;
