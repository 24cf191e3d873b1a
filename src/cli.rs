//! Command-line interface definition.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI entry point for the copy directive runner.
#[derive(Parser, Debug)]
#[command(
    name = "dotcopy",
    about = "Copy dotfiles into the home directory from a directive file",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared across all subcommands.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Directive file (default: $DOTCOPY_CONFIG, ./dotcopy.toml, ./dotcopy.json)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory relative source paths resolve against (default: the directive file's directory)
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    /// Override the home directory (default: $HOME)
    #[arg(long, global = true)]
    pub home: Option<PathBuf>,

    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Copy files as described by the directive file
    Install,
    /// Check the directive file without copying anything
    Validate,
    /// Print version information
    Version,
}

impl Command {
    /// Name used for the log file.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Install => "install",
            Self::Validate => "validate",
            Self::Version => "version",
        }
    }
}
