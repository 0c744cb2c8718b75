use std::io::Write;

use crossmath_game::{Game, Puzzle, PuzzleLibrary, Transition, ValidationReport};
use log::info;

use crate::{CliError, Command, Outcome, Placement, render};

/// Runs one subcommand against a loaded library, writing to `out`.
///
/// # Errors
///
/// Returns a [`CliError`] if a level is not found, a placement is rejected, or writing
/// fails.
pub fn execute(
    command: &Command,
    library: &PuzzleLibrary,
    out: &mut dyn Write,
) -> Result<Outcome, CliError> {
    match command {
        Command::List => list(library, out),
        Command::Show { level } => show(library.resolve(level)?, out),
        Command::Verify { level } => {
            let selected = match level {
                Some(level) => vec![library.resolve(level)?],
                None => library.iter().enumerate().collect(),
            };
            verify(&selected, out)
        }
        Command::Check { level, placements } => check(library.resolve(level)?, placements, out),
    }
}

fn list(library: &PuzzleLibrary, out: &mut dyn Write) -> Result<Outcome, CliError> {
    for (index, puzzle) in library.iter().enumerate() {
        writeln!(
            out,
            "{index:>3}  {name:<12} {rows}x{cols}  {slots} slots  {equations} equations",
            name = puzzle.name(),
            rows = puzzle.grid().rows(),
            cols = puzzle.grid().cols(),
            slots = puzzle.slots().count(),
            equations = puzzle.equations().len(),
        )?;
    }
    Ok(Outcome::Success)
}

fn show((index, puzzle): (usize, &Puzzle), out: &mut dyn Write) -> Result<Outcome, CliError> {
    let game = Game::new(puzzle.clone());
    writeln!(out, "level {index}: {}", puzzle.name())?;
    writeln!(out)?;
    write!(out, "{}", render::board(&game.board(), None))?;
    writeln!(out)?;
    writeln!(out, "bank: {}", bank_line(&game))?;
    writeln!(out, "equations:")?;
    for equation in puzzle.equations() {
        writeln!(out, "  {equation}")?;
    }
    Ok(Outcome::Success)
}

fn verify(levels: &[(usize, &Puzzle)], out: &mut dyn Write) -> Result<Outcome, CliError> {
    let mut outcome = Outcome::Success;
    for (index, puzzle) in levels {
        let report = puzzle.verify_solution();
        let mut problems = report
            .equations()
            .iter()
            .filter(|eq| !eq.state().is_correct())
            .map(|eq| format!("{} is {}", eq.key(), eq.state()))
            .collect::<Vec<_>>();
        if puzzle.equations().is_empty() {
            problems.push("no equations".to_owned());
        }
        if !puzzle.bank_matches_solution() {
            problems.push("bank does not match slot values".to_owned());
        }

        if problems.is_empty() {
            writeln!(out, "{index:>3}  {:<12} ok", puzzle.name())?;
        } else {
            outcome = Outcome::Failure;
            writeln!(
                out,
                "{index:>3}  {:<12} FAILED: {}",
                puzzle.name(),
                problems.join("; ")
            )?;
        }
    }
    Ok(outcome)
}

fn check(
    (index, puzzle): (usize, &Puzzle),
    placements: &[Placement],
    out: &mut dyn Write,
) -> Result<Outcome, CliError> {
    let mut game = Game::new(puzzle.clone());
    info!(
        "checking level {index} ({}) with {} placements",
        puzzle.name(),
        placements.len()
    );
    let mut report = game.validate();

    for placement in placements {
        let Placement { slot, value } = *placement;
        let item = free_item(&game, value)?;
        report = game.place(slot, item)?;
        writeln!(out, "place {value} at {slot}")?;
        for transition in report.transitions() {
            writeln!(out, "  {}", transition_line(transition))?;
        }
    }

    writeln!(out)?;
    write!(out, "{}", render::board(&game.board(), Some(&report)))?;
    writeln!(out)?;
    writeln!(out, "bank: {}", bank_line(&game))?;
    writeln!(out, "equations: {}", render::summary(&report))?;
    write_status(&report, out)?;
    Ok(Outcome::Success)
}

fn free_item(game: &Game, value: i64) -> Result<usize, CliError> {
    game.bank()
        .find_unused(value)
        .ok_or(CliError::NotInBank { value })
}

fn transition_line(transition: &Transition) -> String {
    format!(
        "{}: {} -> {}",
        transition.key(),
        transition.previous(),
        transition.current()
    )
}

fn bank_line(game: &Game) -> String {
    game.bank()
        .items()
        .iter()
        .map(|item| {
            if item.is_used() {
                format!("({})", item.value())
            } else {
                item.value().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_status(report: &ValidationReport, out: &mut dyn Write) -> Result<(), CliError> {
    if report.is_complete() {
        writeln!(out, "status: solved")?;
    } else if report.all_slots_filled() {
        writeln!(out, "status: all slots filled, not solved")?;
    } else {
        writeln!(out, "status: in progress")?;
    }
    Ok(())
}
