use std::process::ExitCode;

use clap::Parser;

use glassmap::cli::{self, CliArgs};
use glassmap::logger;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Initialize session log (overwrites previous session log)
    logger::init(args.log_file.as_deref());

    cli::run(args)
}
