//! `dotcopy` command-line entry point.
use anyhow::Result;
use clap::Parser;
use std::sync::Arc;

use dotfiles_copy::cli::{Cli, Command};
use dotfiles_copy::{commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();

    if args.command == Command::Version {
        commands::version::run();
        return Ok(());
    }

    logging::init_subscriber(args.verbose, args.command.name());
    let log = Arc::new(logging::Logger::new(args.command.name()));

    match args.command {
        Command::Install => commands::install::run(&args.global, &log),
        Command::Validate => commands::validate::run(&args.global, log.as_ref()),
        Command::Version => Ok(()),
    }
}
