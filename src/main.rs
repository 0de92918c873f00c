//! CLI binary for `taskbook`.
//!
//! This binary is a thin wrapper that parses arguments and runs the
//! interactive session from the library.

use clap::Parser;
use std::process::ExitCode;
use taskbook::cli::{self, Cli};

fn main() -> ExitCode {
    let args = Cli::parse();

    match cli::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}
