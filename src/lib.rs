//! Declarative copy directives for dotfiles installation.
//!
//! A directive file lists `defaults` and `copy` directives. Each `copy`
//! entry maps a destination in the home directory to a source file or
//! directory tree; entries are copied in order, optionally creating missing
//! parent directories and replacing existing destinations, and never outside
//! the user's home directory.
//!
//! The public API is organised into layers:
//!
//! - **[`config`]**: load directive files (TOML or JSON), parse copy payloads, validate
//! - **[`paths`]**: home discovery, `~` expansion, real-path containment checks
//! - **[`resources`]**: idempotent `check + apply` copy primitive and filesystem helpers
//! - **[`directives`]**: the handler trait, the copy handler, and the dispatcher
//! - **[`commands`]**: top-level subcommand orchestration (`install`, `validate`, `version`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod directives;
pub mod error;
pub mod logging;
pub mod paths;
pub mod resources;
