use std::{path::PathBuf, str::FromStr};

use clap::{Parser, Subcommand};
use crossmath_core::Position;

/// Play and check cross-math puzzles from the terminal.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// JSON level pack to use instead of the built-in levels.
    #[arg(long, global = true, value_name = "FILE")]
    pub levels: Option<PathBuf>,

    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands of the `crossmath` binary.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the available levels.
    List,
    /// Print a level's grid, bank, and equations.
    Show {
        /// Zero-based level index or level name.
        level: String,
    },
    /// Check that levels are solved by their own slot values.
    Verify {
        /// Zero-based level index or level name; all levels when omitted.
        level: Option<String>,
    },
    /// Place bank numbers into a level and report the feedback.
    Check {
        /// Zero-based level index or level name.
        level: String,
        /// A placement `ROW,COL=VALUE`. Repeatable; applied in order.
        #[arg(short, long = "place", value_name = "ROW,COL=VALUE")]
        placements: Vec<Placement>,
    },
}

/// One number to put into one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Target slot.
    pub slot: Position,
    /// Bank value to place.
    pub value: i64,
}

/// A placement argument that is not of the form `ROW,COL=VALUE`.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid placement {input:?}, expected ROW,COL=VALUE")]
pub struct ParsePlacementError {
    /// The rejected argument.
    pub input: String,
}

impl FromStr for Placement {
    type Err = ParsePlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = || -> Option<Self> {
            let (pos, value) = s.split_once('=')?;
            let (row, col) = pos.split_once(',')?;
            Some(Self {
                slot: Position::new(row.trim().parse().ok()?, col.trim().parse().ok()?),
                value: value.trim().parse().ok()?,
            })
        };
        parse().ok_or_else(|| ParsePlacementError {
            input: s.to_owned(),
        })
    }
}
