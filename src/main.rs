use std::process::ExitCode;

use tilemark::{cli, logger};

fn main() -> ExitCode {
    // Diagnostics go to stderr; stdout carries only the completion notice.
    logger::init();
    cli::run_from(std::env::args_os())
}
