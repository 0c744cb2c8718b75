//! Command-line entry point for cross-math puzzles.

use std::{io, process::ExitCode};

use clap::Parser as _;
use crossmath_cli::{Cli, Outcome};

fn main() -> ExitCode {
    better_panic::install();
    env_logger::init();

    let cli = Cli::parse();
    match crossmath_cli::run(&cli, &mut io::stdout().lock()) {
        Ok(Outcome::Success) => ExitCode::SUCCESS,
        Ok(Outcome::Failure) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}
