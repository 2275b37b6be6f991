//! Stylemill - command-line tool for building, linting and scanning theme stylesheets

use std::process::ExitCode;

use stylemill::cli;

fn main() -> ExitCode {
    cli::run()
}
