//! Puzzle definitions and validated puzzles.
//!
//! A [`PuzzleDefinition`] is authored data as it arrives from a level file: a grid of
//! markers, the designated slots with their intended values, and the bank numbers. A
//! [`Puzzle`] is the checked form the game works with. Its equations are derived once,
//! when the puzzle is built.
//!
//! In JSON a definition reads:
//!
//! ```json
//! {
//!   "name": "easy",
//!   "grid": [
//!     [1, "+", "B", "=", 4],
//!     ["+", "B", "+", "B", "B"],
//!     ["B", "+", 4, "=", "B"],
//!     ["=", "B", "=", "B", "B"],
//!     [3, "+", "B", "=", 10]
//!   ],
//!   "emptyCells": [
//!     { "r": 0, "c": 2, "value": 3 },
//!     { "r": 2, "c": 0, "value": 2 },
//!     { "r": 2, "c": 4, "value": 6 },
//!     { "r": 4, "c": 2, "value": 7 }
//!   ],
//!   "numbers": [3, 2, 6, 7]
//! }
//! ```
//!
//! Slot positions may carry any non-symbol marker in the grid (usually `"B"`); listing
//! them in `emptyCells` is what makes them slots.

use std::collections::BTreeMap;

use crossmath_core::{Cell, EquationSet, Grid, GridError, Operator, Position, find_equations};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{Assignment, Board, EquationStates, ValidationReport, validate};

/// One grid marker of a puzzle definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Marker {
    /// A pre-printed number.
    Number(i64),
    /// `+`, `-`, `*`, `/`, `=`, `B` (blank) or `_` (slot).
    Symbol(String),
}

impl Marker {
    fn to_cell(&self) -> Option<Cell> {
        match self {
            Self::Number(value) => Some(Cell::Number(*value)),
            Self::Symbol(symbol) => match symbol.as_str() {
                "=" => Some(Cell::Equals),
                "B" => Some(Cell::Blank),
                "_" => Some(Cell::Slot),
                other => other.parse::<Operator>().ok().map(Cell::Operator),
            },
        }
    }
}

impl From<i64> for Marker {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Marker {
    fn from(symbol: &str) -> Self {
        Self::Symbol(symbol.to_owned())
    }
}

/// A designated slot and its intended value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSolution {
    /// Row of the slot.
    #[serde(rename = "r")]
    pub row: usize,
    /// Column of the slot.
    #[serde(rename = "c")]
    pub col: usize,
    /// The intended value.
    pub value: i64,
}

impl SlotSolution {
    /// Returns the slot position.
    #[must_use]
    pub fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }
}

/// Authored puzzle data, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleDefinition {
    /// Level name, such as `"easy"`.
    pub name: String,
    /// Grid markers, row by row.
    pub grid: Vec<Vec<Marker>>,
    /// Designated slots with their intended values.
    pub empty_cells: Vec<SlotSolution>,
    /// Bank numbers available for placement.
    pub numbers: Vec<i64>,
}

/// Errors found while building a [`Puzzle`] from a definition.
#[derive(
    Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From,
)]
pub enum PuzzleError {
    /// A marker is not a number or a known symbol.
    #[display("unknown marker {marker:?} at {pos}")]
    #[from(ignore)]
    UnknownMarker {
        /// Position of the marker.
        pos: Position,
        /// The marker.
        marker: Marker,
    },
    /// The grid is empty or ragged.
    #[display("invalid grid: {_0}")]
    Grid(GridError),
    /// A slot lies outside the grid.
    #[display("slot {_0} lies outside the grid")]
    #[from(ignore)]
    SlotOutOfRange(#[error(not(source))] Position),
    /// A slot is listed twice.
    #[display("slot {_0} is listed more than once")]
    #[from(ignore)]
    DuplicateSlot(#[error(not(source))] Position),
    /// A slot is placed on an operator or equals cell.
    #[display("slot {_0} overlaps an operator or equals sign")]
    #[from(ignore)]
    SlotOnSymbol(#[error(not(source))] Position),
    /// A `_` marker is not listed among the slots.
    #[display("slot marker at {_0} has no intended value")]
    #[from(ignore)]
    MissingSolution(#[error(not(source))] Position),
}

/// A validated puzzle.
///
/// # Examples
///
/// ```
/// use crossmath_game::{Marker, Puzzle, PuzzleDefinition, SlotSolution};
///
/// let definition = PuzzleDefinition {
///     name: "tiny".to_owned(),
///     grid: vec![vec![
///         Marker::Number(1),
///         "+".into(),
///         "B".into(),
///         "=".into(),
///         Marker::Number(4),
///     ]],
///     empty_cells: vec![SlotSolution { row: 0, col: 2, value: 3 }],
///     numbers: vec![3],
/// };
/// let puzzle = Puzzle::from_definition(&definition)?;
/// assert_eq!(puzzle.equations().len(), 1);
/// assert!(puzzle.verify_solution().is_complete());
/// # Ok::<(), crossmath_game::PuzzleError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    name: String,
    grid: Grid,
    solutions: BTreeMap<Position, i64>,
    numbers: Vec<i64>,
    equations: EquationSet,
}

impl Puzzle {
    /// Validates a definition and derives its equations.
    ///
    /// # Errors
    ///
    /// Returns a [`PuzzleError`] if a marker is unknown, the grid is not rectangular, or
    /// a slot is out of range, duplicated, placed on a symbol, or missing its value.
    pub fn from_definition(definition: &PuzzleDefinition) -> Result<Self, PuzzleError> {
        let rows = definition
            .grid
            .iter()
            .enumerate()
            .map(|(row, markers)| {
                markers
                    .iter()
                    .enumerate()
                    .map(|(col, marker)| {
                        marker.to_cell().ok_or_else(|| PuzzleError::UnknownMarker {
                            pos: Position::new(row, col),
                            marker: marker.clone(),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        let mut grid = Grid::from_rows(rows)?;

        let mut solutions = BTreeMap::new();
        for slot in &definition.empty_cells {
            let pos = slot.position();
            match grid.get(pos) {
                None => return Err(PuzzleError::SlotOutOfRange(pos)),
                Some(Cell::Operator(_) | Cell::Equals) => {
                    return Err(PuzzleError::SlotOnSymbol(pos));
                }
                Some(Cell::Number(_) | Cell::Blank | Cell::Slot) => {}
            }
            if solutions.insert(pos, slot.value).is_some() {
                return Err(PuzzleError::DuplicateSlot(pos));
            }
            if let Some(with_slot) = grid.with_cell(pos, Cell::Slot) {
                grid = with_slot;
            }
        }
        if let Some(pos) = grid.slots().find(|pos| !solutions.contains_key(pos)) {
            return Err(PuzzleError::MissingSolution(pos));
        }

        let equations = find_equations(&grid);
        debug!(
            "loaded puzzle {:?}: {}x{} grid, {} slots, {} equations",
            definition.name,
            grid.rows(),
            grid.cols(),
            solutions.len(),
            equations.len()
        );

        Ok(Self {
            name: definition.name.clone(),
            grid,
            solutions,
            numbers: definition.numbers.clone(),
            equations,
        })
    }

    /// Returns the level name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the grid, with every designated slot as [`Cell::Slot`].
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the equations derived from the grid.
    #[must_use]
    pub fn equations(&self) -> &EquationSet {
        &self.equations
    }

    /// Returns the slot positions in row-major order.
    pub fn slots(&self) -> impl Iterator<Item = Position> + '_ {
        self.solutions.keys().copied()
    }

    /// Returns the intended value of a slot.
    #[must_use]
    pub fn solution(&self, pos: Position) -> Option<i64> {
        self.solutions.get(&pos).copied()
    }

    /// Returns the bank numbers in authored order.
    #[must_use]
    pub fn numbers(&self) -> &[i64] {
        &self.numbers
    }

    /// Returns an assignment filling every slot with its intended value.
    #[must_use]
    pub fn solution_assignment(&self) -> Assignment {
        self.solutions.iter().map(|(pos, value)| (*pos, *value)).collect()
    }

    /// Validates the intended values against the derived equations.
    ///
    /// This is an authoring check: a well-formed puzzle reports
    /// [`ValidationReport::is_complete`]. The evaluator never consults intended values
    /// during play.
    #[must_use]
    pub fn verify_solution(&self) -> ValidationReport {
        let assignment = self.solution_assignment();
        validate(
            &self.equations,
            &Board::new(&self.grid, &assignment),
            self.slots(),
            &EquationStates::new(),
        )
    }

    /// Returns `true` if the bank holds exactly the intended slot values.
    #[must_use]
    pub fn bank_matches_solution(&self) -> bool {
        let mut bank = self.numbers.clone();
        let mut intended: Vec<i64> = self.solutions.values().copied().collect();
        bank.sort_unstable();
        intended.sort_unstable();
        bank == intended
    }
}

impl TryFrom<&PuzzleDefinition> for Puzzle {
    type Error = PuzzleError;

    fn try_from(definition: &PuzzleDefinition) -> Result<Self, Self::Error> {
        Self::from_definition(definition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(marker: &str) -> Marker {
        if let Ok(value) = marker.parse::<i64>() {
            return Marker::Number(value);
        }
        Marker::from(marker)
    }

    fn grid(rows: &[&str]) -> Vec<Vec<Marker>> {
        rows.iter()
            .map(|row| row.split_whitespace().map(m).collect())
            .collect()
    }

    fn slot(row: usize, col: usize, value: i64) -> SlotSolution {
        SlotSolution { row, col, value }
    }

    fn medium() -> PuzzleDefinition {
        PuzzleDefinition {
            name: "medium".to_owned(),
            grid: grid(&[
                "B + 8 = 17",
                "+ B + B B",
                "4 + B = B",
                "= B = B B",
                "B + 13 = 26",
            ]),
            empty_cells: vec![slot(0, 0, 9), slot(2, 2, 5), slot(2, 4, 9), slot(4, 0, 13)],
            numbers: vec![9, 5, 9, 13],
        }
    }

    #[test]
    fn test_from_definition_marks_slots() {
        let puzzle = Puzzle::from_definition(&medium()).expect("valid puzzle");
        assert_eq!(puzzle.name(), "medium");
        assert_eq!(puzzle.grid()[Position::new(0, 0)], Cell::Slot);
        assert_eq!(puzzle.grid()[Position::new(1, 1)], Cell::Blank);
        assert_eq!(puzzle.grid()[Position::new(4, 2)], Cell::Number(13));
        assert_eq!(
            puzzle.slots().collect::<Vec<_>>(),
            puzzle.grid().slots().collect::<Vec<_>>()
        );
        assert_eq!(puzzle.solution(Position::new(2, 4)), Some(9));
        assert_eq!(puzzle.equations().len(), 5);
    }

    #[test]
    fn test_verify_solution() {
        let puzzle = Puzzle::from_definition(&medium()).expect("valid puzzle");
        let report = puzzle.verify_solution();
        assert!(report.is_complete());
        assert!(report.transitions().iter().all(|t| t.kind().is_became_correct()));
        assert!(puzzle.bank_matches_solution());

        let mut wrong = medium();
        wrong.empty_cells[1].value = 6;
        let puzzle = Puzzle::from_definition(&wrong).expect("valid puzzle");
        assert!(!puzzle.verify_solution().is_complete());
        assert!(!puzzle.bank_matches_solution());
    }

    #[test]
    fn test_rejects_bad_definitions() {
        let mut unknown = medium();
        unknown.grid[1][1] = m("%");
        assert_eq!(
            Puzzle::from_definition(&unknown),
            Err(PuzzleError::UnknownMarker {
                pos: Position::new(1, 1),
                marker: m("%"),
            })
        );

        let mut ragged = medium();
        ragged.grid[3].pop();
        assert!(matches!(
            Puzzle::from_definition(&ragged),
            Err(PuzzleError::Grid(GridError::Ragged { row: 3, .. }))
        ));

        let mut out_of_range = medium();
        out_of_range.empty_cells.push(slot(5, 0, 1));
        assert_eq!(
            Puzzle::from_definition(&out_of_range),
            Err(PuzzleError::SlotOutOfRange(Position::new(5, 0)))
        );

        let mut duplicate = medium();
        duplicate.empty_cells.push(slot(0, 0, 9));
        assert_eq!(
            Puzzle::from_definition(&duplicate),
            Err(PuzzleError::DuplicateSlot(Position::new(0, 0)))
        );

        let mut on_symbol = medium();
        on_symbol.empty_cells.push(slot(0, 1, 1));
        assert_eq!(
            Puzzle::from_definition(&on_symbol),
            Err(PuzzleError::SlotOnSymbol(Position::new(0, 1)))
        );

        let mut unlisted = medium();
        unlisted.grid[1][1] = m("_");
        assert_eq!(
            Puzzle::from_definition(&unlisted),
            Err(PuzzleError::MissingSolution(Position::new(1, 1)))
        );
    }

    #[test]
    fn test_json_definition() {
        let json = r#"{
            "name": "hard",
            "grid": [
                [2, "+", 17, "=", "B"],
                ["+", "B", "+", "B", "B"],
                ["B", "+", 5, "=", "B"],
                ["=", "B", "=", "B", "B"],
                [11, "+", "B", "=", 33]
            ],
            "emptyCells": [
                { "r": 0, "c": 4, "value": 19 },
                { "r": 2, "c": 0, "value": 9 },
                { "r": 2, "c": 4, "value": 14 },
                { "r": 4, "c": 2, "value": 22 }
            ],
            "numbers": [19, 9, 14, 22]
        }"#;
        let definition: PuzzleDefinition = serde_json::from_str(json).expect("valid json");
        assert_eq!(definition.grid[0][1], Marker::Symbol("+".to_owned()));
        assert_eq!(definition.empty_cells[0].position(), Position::new(0, 4));

        let puzzle = Puzzle::try_from(&definition).expect("valid puzzle");
        assert!(puzzle.verify_solution().is_complete());

        let round_trip: PuzzleDefinition =
            serde_json::from_str(&serde_json::to_string(&definition).expect("serializable"))
                .expect("valid json");
        assert_eq!(round_trip, definition);
    }
}
