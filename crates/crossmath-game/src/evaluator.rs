//! Equation evaluation and validation passes.
//!
//! A validation pass evaluates every equation against the current cell values and
//! compares the outcome with the previous pass. [`validate`] is a pure function of
//! `(equations, values, slots, previous states)`; [`Tracker`] wraps it for callers that
//! want the previous states carried along for them.

use std::collections::BTreeMap;

use crossmath_core::{Equation, EquationKey, EquationSet, Position};
use log::{debug, trace};

use crate::{CellStatus, CellValues, EquationState, EquationStates};

/// Evaluates a single equation.
///
/// Returns [`EquationState::Incomplete`] if any operand or the result holds no value.
/// Otherwise the operands are folded left to right, and the equation is
/// [`EquationState::Correct`] exactly when the fold succeeds and equals the result. A step
/// without an integer result (zero divisor, inexact division, overflow) makes the
/// equation [`EquationState::Incorrect`] immediately.
///
/// # Examples
///
/// ```
/// use crossmath_core::{Grid, find_equations};
/// use crossmath_game::{EquationState, evaluate};
///
/// let correct: Grid = "8 / 2 + 3 = 7".parse()?;
/// let eq = find_equations(&correct).iter().next().cloned().unwrap();
/// assert_eq!(evaluate(&eq, &correct), EquationState::Correct);
///
/// let indivisible: Grid = "8 / 3 + 2 = 4".parse()?;
/// let eq = find_equations(&indivisible).iter().next().cloned().unwrap();
/// assert_eq!(evaluate(&eq, &indivisible), EquationState::Incorrect);
/// # Ok::<(), crossmath_core::GridParseError>(())
/// ```
#[must_use]
pub fn evaluate<V>(equation: &Equation, values: &V) -> EquationState
where
    V: CellValues + ?Sized,
{
    let operands = equation
        .operands()
        .iter()
        .map(|pos| values.value(*pos))
        .collect::<Option<Vec<i64>>>();
    let (Some(operands), Some(expected)) = (operands, values.value(equation.result())) else {
        return EquationState::Incomplete;
    };

    let folded = equation
        .operators()
        .iter()
        .zip(&operands[1..])
        .try_fold(operands[0], |acc, (op, rhs)| op.apply(acc, *rhs));

    match folded {
        Some(actual) if actual == expected => EquationState::Correct,
        _ => EquationState::Incorrect,
    }
}

/// The direction of a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum TransitionKind {
    /// The equation is now correct.
    BecameCorrect,
    /// The equation is now incorrect.
    BecameIncorrect,
    /// A cell of the equation was emptied.
    BecameIncomplete,
}

/// A change of an equation's state between two consecutive passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transition {
    key: EquationKey,
    previous: EquationState,
    current: EquationState,
}

impl Transition {
    /// Returns the key of the equation that changed.
    #[must_use]
    pub fn key(&self) -> EquationKey {
        self.key
    }

    /// Returns the state before this pass.
    #[must_use]
    pub fn previous(&self) -> EquationState {
        self.previous
    }

    /// Returns the state after this pass.
    #[must_use]
    pub fn current(&self) -> EquationState {
        self.current
    }

    /// Returns the direction of the change.
    #[must_use]
    pub fn kind(&self) -> TransitionKind {
        match self.current {
            EquationState::Correct => TransitionKind::BecameCorrect,
            EquationState::Incorrect => TransitionKind::BecameIncorrect,
            EquationState::Incomplete => TransitionKind::BecameIncomplete,
        }
    }
}

/// The outcome of one equation within a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquationReport {
    key: EquationKey,
    state: EquationState,
    cells: Vec<Position>,
}

impl EquationReport {
    /// Returns the equation key.
    #[must_use]
    pub fn key(&self) -> EquationKey {
        self.key
    }

    /// Returns the equation state.
    #[must_use]
    pub fn state(&self) -> EquationState {
        self.state
    }

    /// Returns the status this equation assigns to each of its cells.
    ///
    /// Incomplete equations mark nothing, so every cell is [`CellStatus::Unmarked`].
    pub fn cell_statuses(&self) -> impl Iterator<Item = (Position, CellStatus)> + '_ {
        let status = CellStatus::from(self.state);
        self.cells.iter().map(move |pos| (*pos, status))
    }
}

/// Everything one validation pass produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    states: EquationStates,
    equations: Vec<EquationReport>,
    cells: BTreeMap<Position, CellStatus>,
    transitions: Vec<Transition>,
    slots_filled: bool,
}

impl ValidationReport {
    /// Returns the equation states of this pass.
    ///
    /// Pass these as `previous` to the next call of [`validate`].
    #[must_use]
    pub fn states(&self) -> &EquationStates {
        &self.states
    }

    /// Consumes the report and returns the equation states of this pass.
    #[must_use]
    pub fn into_states(self) -> EquationStates {
        self.states
    }

    /// Returns per-equation outcomes, in equation order.
    #[must_use]
    pub fn equations(&self) -> &[EquationReport] {
        &self.equations
    }

    /// Returns the state of the equation with the given key.
    #[must_use]
    pub fn state(&self, key: EquationKey) -> Option<EquationState> {
        self.states.get(key)
    }

    /// Returns the merged status of a cell across all equations it takes part in.
    ///
    /// Cells outside every equation are [`CellStatus::Unmarked`].
    #[must_use]
    pub fn cell_status(&self, pos: Position) -> CellStatus {
        self.cells.get(&pos).copied().unwrap_or_default()
    }

    /// Iterates over the merged status of every participating cell, row-major.
    pub fn cell_statuses(&self) -> impl Iterator<Item = (Position, CellStatus)> + '_ {
        self.cells.iter().map(|(pos, status)| (*pos, *status))
    }

    /// Returns the equations whose state changed in this pass.
    #[must_use]
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Returns `true` if every designated slot holds a value.
    #[must_use]
    pub fn all_slots_filled(&self) -> bool {
        self.slots_filled
    }

    /// Returns `true` if the puzzle is solved.
    ///
    /// A puzzle is solved when every slot holds a value, every equation is correct, and
    /// there is at least one equation. A grid without equations is never solved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.slots_filled
            && !self.equations.is_empty()
            && self.equations.iter().all(|eq| eq.state.is_correct())
    }
}

/// Runs one full validation pass.
///
/// `slots` are the positions the player is expected to fill; completion requires all of
/// them to hold a value. `previous` holds the states of the prior pass, or is empty for
/// the first pass of a puzzle. An equation missing from `previous` is compared as if it
/// had been [`EquationState::Incomplete`], so a freshly loaded puzzle reports no
/// transitions.
///
/// # Examples
///
/// ```
/// use crossmath_core::{Grid, Position, find_equations};
/// use crossmath_game::{Assignment, Board, EquationStates, TransitionKind, validate};
///
/// let grid: Grid = "1 + _ = 4".parse()?;
/// let equations = find_equations(&grid);
/// let slots: Vec<Position> = grid.slots().collect();
///
/// let mut assignment = Assignment::new();
/// let first = validate(
///     &equations,
///     &Board::new(&grid, &assignment),
///     slots.iter().copied(),
///     &EquationStates::new(),
/// );
/// assert!(first.transitions().is_empty());
/// assert!(!first.is_complete());
///
/// assignment.set(Position::new(0, 2), 3);
/// let second = validate(
///     &equations,
///     &Board::new(&grid, &assignment),
///     slots.iter().copied(),
///     first.states(),
/// );
/// assert_eq!(second.transitions().len(), 1);
/// assert_eq!(second.transitions()[0].kind(), TransitionKind::BecameCorrect);
/// assert!(second.is_complete());
/// # Ok::<(), crossmath_core::GridParseError>(())
/// ```
pub fn validate<V>(
    equations: &EquationSet,
    values: &V,
    slots: impl IntoIterator<Item = Position>,
    previous: &EquationStates,
) -> ValidationReport
where
    V: CellValues + ?Sized,
{
    let mut states = EquationStates::new();
    let mut reports = Vec::with_capacity(equations.len());
    let mut cells = BTreeMap::<Position, CellStatus>::new();
    let mut transitions = Vec::new();

    for equation in equations {
        let key = equation.key();
        let state = evaluate(equation, values);
        trace!("{key}: {state}");

        let status = CellStatus::from(state);
        for pos in equation.cells() {
            let merged = cells.entry(pos).or_default();
            *merged = merged.merge(status);
        }

        let before = previous.get(key).unwrap_or(EquationState::Incomplete);
        if before != state {
            debug!("{key}: {before} -> {state}");
            transitions.push(Transition {
                key,
                previous: before,
                current: state,
            });
        }

        states.insert(key, state);
        reports.push(EquationReport {
            key,
            state,
            cells: equation.cells().collect(),
        });
    }

    let slots_filled = slots.into_iter().all(|pos| values.value(pos).is_some());

    ValidationReport {
        states,
        equations: reports,
        cells,
        transitions,
        slots_filled,
    }
}

/// Carries equation states from one validation pass to the next.
///
/// The tracker owns the previous-pass mapping for one puzzle instance. Call
/// [`Tracker::reset`] whenever a puzzle is (re)loaded.
#[derive(Debug, Clone, Default)]
pub struct Tracker {
    previous: EquationStates,
}

impl Tracker {
    /// Creates a tracker with no previous pass.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the states recorded by the last pass.
    #[must_use]
    pub fn previous(&self) -> &EquationStates {
        &self.previous
    }

    /// Runs a validation pass against the recorded states and records the new ones.
    pub fn validate<V>(
        &mut self,
        equations: &EquationSet,
        values: &V,
        slots: impl IntoIterator<Item = Position>,
    ) -> ValidationReport
    where
        V: CellValues + ?Sized,
    {
        let report = validate(equations, values, slots, &self.previous);
        self.previous.clone_from(report.states());
        report
    }

    /// Forgets the recorded states.
    pub fn reset(&mut self) {
        self.previous.clear();
    }
}
