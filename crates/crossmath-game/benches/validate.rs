//! Benchmarks for equation discovery and validation passes.
//!
//! Measures the two operations run on every puzzle: deriving the equation set once at
//! load time, and the full validation pass run after every player action.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench validate
//! ```

use std::hint;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use crossmath_core::find_equations;
use crossmath_game::{Board, EquationStates, Puzzle, PuzzleLibrary, Tracker, validate};

fn levels() -> Vec<Puzzle> {
    PuzzleLibrary::builtin().iter().cloned().collect()
}

fn bench_find_equations(c: &mut Criterion) {
    for puzzle in levels() {
        c.bench_with_input(
            BenchmarkId::new("find_equations", puzzle.name()),
            puzzle.grid(),
            |b, grid| {
                b.iter(|| hint::black_box(find_equations(hint::black_box(grid))));
            },
        );
    }
}

fn bench_validate_solved(c: &mut Criterion) {
    for puzzle in levels() {
        let assignment = puzzle.solution_assignment();
        let previous = EquationStates::new();
        c.bench_with_input(
            BenchmarkId::new("validate_solved", puzzle.name()),
            &puzzle,
            |b, puzzle| {
                b.iter(|| {
                    let report = validate(
                        puzzle.equations(),
                        &Board::new(puzzle.grid(), &assignment),
                        puzzle.slots(),
                        &previous,
                    );
                    hint::black_box(report)
                });
            },
        );
    }
}

fn bench_tracker_toggle(c: &mut Criterion) {
    for puzzle in levels() {
        let solved = puzzle.solution_assignment();
        let mut partial = solved.clone();
        if let Some((slot, _)) = solved.iter().next() {
            partial.remove(slot);
        }
        c.bench_with_input(
            BenchmarkId::new("tracker_toggle", puzzle.name()),
            &puzzle,
            |b, puzzle| {
                let mut tracker = Tracker::new();
                b.iter(|| {
                    for assignment in [&partial, &solved] {
                        let board = Board::new(puzzle.grid(), assignment);
                        let report = tracker.validate(puzzle.equations(), &board, puzzle.slots());
                        hint::black_box(report);
                    }
                });
            },
        );
    }
}

criterion_group!(
    benches,
    bench_find_equations,
    bench_validate_solved,
    bench_tracker_toggle
);
criterion_main!(benches);
