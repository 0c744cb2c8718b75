//! Property-based invariant tests for validation passes.
//!
//! For arbitrary grids and arbitrary slot values:
//!
//! 1. A pass is a pure function: repeating it yields the same report.
//! 2. Feeding a pass its own states back reports no transitions.
//! 3. Transitions are exactly the equations whose state differs from the previous pass.
//! 4. A cell is marked incorrect exactly when some incorrect equation contains it.
//! 5. Completion implies every slot is filled and every equation is correct.
//! 6. A grid without equations is never complete.

use crossmath_core::{Cell, EquationSet, Grid, Operator, Position, find_equations};
use crossmath_game::{
    Assignment, Board, CellStatus, EquationState, EquationStates, ValidationReport, validate,
};
use proptest::prelude::*;

fn cell_strategy() -> impl Strategy<Value = Cell> {
    prop_oneof![
        4 => (-12i64..=12).prop_map(Cell::Number),
        3 => prop::sample::select(Operator::ALL.to_vec()).prop_map(Cell::Operator),
        2 => Just(Cell::Equals),
        1 => Just(Cell::Blank),
        3 => Just(Cell::Slot),
    ]
}

/// A grid plus values for a random subset of its slots.
fn board_strategy() -> impl Strategy<Value = (Grid, Assignment)> {
    (1usize..=7, 1usize..=7)
        .prop_flat_map(|(rows, cols)| {
            prop::collection::vec(prop::collection::vec(cell_strategy(), cols), rows)
                .prop_map(|rows| Grid::from_rows(rows).expect("rectangular by construction"))
        })
        .prop_flat_map(|grid| {
            let slots: Vec<Position> = grid.slots().collect();
            let values = prop::collection::vec(prop::option::of(-12i64..=12), slots.len());
            (Just(grid), Just(slots), values)
        })
        .prop_map(|(grid, slots, values)| {
            let assignment: Assignment = slots
                .into_iter()
                .zip(values)
                .filter_map(|(pos, value)| value.map(|value| (pos, value)))
                .collect();
            (grid, assignment)
        })
}

fn run(
    grid: &Grid,
    equations: &EquationSet,
    assignment: &Assignment,
    previous: &EquationStates,
) -> ValidationReport {
    validate(
        equations,
        &Board::new(grid, assignment),
        grid.slots(),
        previous,
    )
}

proptest! {
    #[test]
    fn pass_is_pure((grid, assignment) in board_strategy()) {
        let equations = find_equations(&grid);
        let previous = EquationStates::new();
        let first = run(&grid, &equations, &assignment, &previous);
        let second = run(&grid, &equations, &assignment, &previous);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn repeated_pass_reports_no_transitions((grid, assignment) in board_strategy()) {
        let equations = find_equations(&grid);
        let first = run(&grid, &equations, &assignment, &EquationStates::new());
        let second = run(&grid, &equations, &assignment, first.states());
        prop_assert!(second.transitions().is_empty());
        prop_assert_eq!(first.states(), second.states());
    }

    #[test]
    fn transitions_match_state_changes(
        (grid, before) in board_strategy(),
        clear_mask in prop::collection::vec(any::<bool>(), 0..16),
    ) {
        let equations = find_equations(&grid);
        let first = run(&grid, &equations, &before, &EquationStates::new());

        let mut after = before.clone();
        for ((pos, _), clear) in before.iter().zip(&clear_mask) {
            if *clear {
                after.remove(pos);
            }
        }
        let second = run(&grid, &equations, &after, first.states());

        let changed: Vec<_> = second
            .equations()
            .iter()
            .filter(|eq| first.state(eq.key()) != Some(eq.state()))
            .map(|eq| eq.key())
            .collect();
        let reported: Vec<_> = second.transitions().iter().map(|t| t.key()).collect();
        prop_assert_eq!(changed, reported);
        for t in second.transitions() {
            prop_assert_eq!(first.state(t.key()), Some(t.previous()));
            prop_assert_eq!(second.state(t.key()), Some(t.current()));
        }
    }

    #[test]
    fn incorrect_cells_come_from_incorrect_equations((grid, assignment) in board_strategy()) {
        let equations = find_equations(&grid);
        let report = run(&grid, &equations, &assignment, &EquationStates::new());
        for (pos, status) in report.cell_statuses() {
            let in_incorrect = report.equations().iter().any(|eq| {
                eq.state() == EquationState::Incorrect
                    && eq.cell_statuses().any(|(cell, _)| cell == pos)
            });
            prop_assert_eq!(status == CellStatus::Incorrect, in_incorrect, "{}", pos);
        }
    }

    #[test]
    fn completion_requires_everything((grid, assignment) in board_strategy()) {
        let equations = find_equations(&grid);
        let report = run(&grid, &equations, &assignment, &EquationStates::new());
        if report.is_complete() {
            prop_assert!(report.all_slots_filled());
            prop_assert!(!equations.is_empty());
            prop_assert!(report.equations().iter().all(|eq| eq.state().is_correct()));
            prop_assert!(grid.slots().all(|pos| assignment.contains(pos)));
        }
        if equations.is_empty() {
            prop_assert!(!report.is_complete());
        }
    }
}
