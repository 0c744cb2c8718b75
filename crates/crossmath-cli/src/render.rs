//! Plain-text rendering of boards and reports.

use std::fmt::Write as _;

use crossmath_core::{Cell, Position};
use crossmath_game::{Board, CellStatus, CellValues as _, EquationState, ValidationReport};

/// Renders a board as right-aligned columns.
///
/// Slots are bracketed: `[3]` when filled, `[ ]` when empty. With a report, filled cells of
/// incorrect equations are flagged with a trailing `!`.
pub(crate) fn board(board: &Board<'_>, report: Option<&ValidationReport>) -> String {
    let grid = board.grid();
    let texts: Vec<Vec<String>> = (0..grid.rows())
        .map(|row| {
            (0..grid.cols())
                .map(|col| cell_text(board, Position::new(row, col), report))
                .collect()
        })
        .collect();
    let width = texts
        .iter()
        .flatten()
        .map(|text| text.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for row in &texts {
        let line = row
            .iter()
            .map(|text| format!("{text:>width$}"))
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn cell_text(board: &Board<'_>, pos: Position, report: Option<&ValidationReport>) -> String {
    let mut text = match board.grid()[pos] {
        Cell::Blank => String::new(),
        Cell::Slot => match board.value(pos) {
            Some(value) => format!("[{value}]"),
            None => "[ ]".to_owned(),
        },
        cell => cell.to_string(),
    };
    if report.is_some_and(|report| report.cell_status(pos) == CellStatus::Incorrect) {
        text.push('!');
    }
    text
}

/// One-line summary of equation states, e.g. `3 correct, 1 incorrect, 1 incomplete`.
pub(crate) fn summary(report: &ValidationReport) -> String {
    let states = report.states();
    let mut out = String::new();
    for (i, state) in [
        EquationState::Correct,
        EquationState::Incorrect,
        EquationState::Incomplete,
    ]
    .into_iter()
    .enumerate()
    {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{} {state}", states.count(state));
    }
    out
}

#[cfg(test)]
mod tests {
    use crossmath_core::{Grid, find_equations};
    use crossmath_game::{Assignment, EquationStates, validate};

    use super::*;

    #[test]
    fn test_board_brackets_slots() {
        let grid: Grid = "1 + _ = 4\n+ B + B B".parse().expect("valid grid");
        let assignment = Assignment::new();
        let text = board(&Board::new(&grid, &assignment), None);
        assert_eq!(text, "  1   + [ ]   =   4\n  +       +\n");
    }

    #[test]
    fn test_board_flags_incorrect_cells() {
        let grid: Grid = "1 + _ = 4".parse().expect("valid grid");
        let assignment: Assignment = [(Position::new(0, 2), 5)].into_iter().collect();
        let board_view = Board::new(&grid, &assignment);
        let report = validate(
            &find_equations(&grid),
            &board_view,
            grid.slots(),
            &EquationStates::new(),
        );
        let text = board(&board_view, Some(&report));
        assert_eq!(text, "  1!    + [5]!    =   4!\n");
        assert_eq!(summary(&report), "0 correct, 1 incorrect, 0 incomplete");
    }
}
