//! Equation and cell states.

use std::{
    collections::{BTreeMap, btree_map},
    fmt::{self, Display},
};

use crossmath_core::EquationKey;

/// The evaluation state of one equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum EquationState {
    /// At least one participating cell holds no value.
    Incomplete,
    /// Every cell holds a value and the chain evaluates to the result.
    Correct,
    /// Every cell holds a value and the chain does not evaluate to the result.
    Incorrect,
}

impl Display for EquationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Incomplete => "incomplete",
            Self::Correct => "correct",
            Self::Incorrect => "incorrect",
        })
    }
}

/// Visual feedback for a single cell.
///
/// Variants are ordered by precedence: when a cell takes part in several equations, the
/// greatest status wins, so [`CellStatus::Incorrect`] overrides [`CellStatus::Correct`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::IsVariant,
)]
pub enum CellStatus {
    /// No feedback.
    #[default]
    Unmarked,
    /// Part of a correct equation.
    Correct,
    /// Part of an incorrect equation.
    Incorrect,
}

impl CellStatus {
    /// Combines the statuses a cell receives from two equations.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        self.max(other)
    }
}

impl From<EquationState> for CellStatus {
    fn from(state: EquationState) -> Self {
        match state {
            EquationState::Incomplete => Self::Unmarked,
            EquationState::Correct => Self::Correct,
            EquationState::Incorrect => Self::Incorrect,
        }
    }
}

/// Equation states of one validation pass, keyed by equation.
///
/// The states of pass `N` are the `previous` input of pass `N + 1`. A fresh puzzle starts
/// from an empty mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquationStates {
    states: BTreeMap<EquationKey, EquationState>,
}

impl EquationStates {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the state recorded for `key`.
    #[must_use]
    pub fn get(&self, key: EquationKey) -> Option<EquationState> {
        self.states.get(&key).copied()
    }

    /// Records the state of `key`, returning the previously recorded one.
    pub fn insert(&mut self, key: EquationKey, state: EquationState) -> Option<EquationState> {
        self.states.insert(key, state)
    }

    /// Returns the number of recorded equations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns `true` if nothing is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Forgets every recorded state.
    pub fn clear(&mut self) {
        self.states.clear();
    }

    /// Returns the number of equations recorded in `state`.
    #[must_use]
    pub fn count(&self, state: EquationState) -> usize {
        self.states.values().filter(|s| **s == state).count()
    }

    /// Iterates over `(key, state)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (EquationKey, EquationState)> + '_ {
        self.states.iter().map(|(key, state)| (*key, *state))
    }
}

impl FromIterator<(EquationKey, EquationState)> for EquationStates {
    fn from_iter<T: IntoIterator<Item = (EquationKey, EquationState)>>(iter: T) -> Self {
        Self {
            states: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for EquationStates {
    type Item = (EquationKey, EquationState);
    type IntoIter = btree_map::IntoIter<EquationKey, EquationState>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.into_iter()
    }
}
