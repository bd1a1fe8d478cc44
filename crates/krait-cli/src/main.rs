//! CLI entrypoint for the Krait admin tool.
//!
//! The binary delegates to [`krait_cli::run`], which parses arguments,
//! loads the application configuration, and drives the requested
//! lifecycle command against the supervised runtime.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    krait_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
