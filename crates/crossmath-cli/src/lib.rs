//! Terminal front end for cross-math puzzles.
//!
//! The `crossmath` binary lists the levels of a level pack, prints a level, verifies that
//! levels are solved by their own slot values, and replays placements while reporting
//! equation transitions. This library holds the argument definitions and command logic so
//! they can be tested without spawning the binary.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crossmath_game::{GameError, LibraryError, PuzzleLibrary};
use log::debug;

pub use self::{
    args::{Cli, Command, ParsePlacementError, Placement},
    commands::execute,
};

mod args;
mod commands;
mod render;

/// Errors reported by the `crossmath` binary.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum CliError {
    /// The level pack file could not be read.
    #[display("failed to read {}: {source}", path.display())]
    #[from(ignore)]
    ReadLevels {
        /// The level pack path.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// Loading or querying the level pack failed.
    #[display("{_0}")]
    Library(LibraryError),
    /// A placement was rejected.
    #[display("{_0}")]
    Game(GameError),
    /// No unused bank item holds the requested value.
    #[display("no unused {value} in the bank")]
    #[from(ignore)]
    NotInBank {
        /// The requested value.
        value: i64,
    },
    /// Writing output failed.
    #[display("failed to write output: {_0}")]
    Output(io::Error),
}

/// Whether a command succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command did what was asked.
    Success,
    /// The command ran, but found a problem (e.g. an unsolvable level).
    Failure,
}

/// Loads the level pack at `path`, or the built-in levels when `path` is `None`.
///
/// # Errors
///
/// Returns [`CliError::ReadLevels`] if the file cannot be read and
/// [`CliError::Library`] if it is not a valid level pack.
pub fn load_library(path: Option<&Path>) -> Result<PuzzleLibrary, CliError> {
    let Some(path) = path else {
        return Ok(PuzzleLibrary::builtin());
    };
    debug!("loading level pack {}", path.display());
    let json = fs::read_to_string(path).map_err(|source| CliError::ReadLevels {
        path: path.to_owned(),
        source,
    })?;
    Ok(PuzzleLibrary::from_json(&json)?)
}

/// Loads the level pack selected by `cli` and runs its command.
///
/// # Errors
///
/// Returns a [`CliError`] if the level pack cannot be loaded or the command fails.
pub fn run(cli: &Cli, out: &mut dyn io::Write) -> Result<Outcome, CliError> {
    let library = load_library(cli.levels.as_deref())?;
    execute(&cli.command, &library, out)
}
