use relcards_core::logging;
use std::process::ExitCode;

mod cli;

use crate::cli::CliCommand;

fn main() -> ExitCode {
    // Initialize logging as early as possible; fall back to stderr.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    // Parse CLI and dispatch.
    match CliCommand::run_from_args() {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            tracing::error!("{:#}", err);
            eprintln!("relcards error: {:#}", err);
            ExitCode::from(cli::EXIT_FAILURE)
        }
    }
}
