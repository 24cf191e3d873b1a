//! Command: print version information.

/// The embedded build version, or the crate version for local builds.
#[must_use]
pub fn version() -> &'static str {
    option_env!("DOTCOPY_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the dotcopy version to stdout.
#[allow(clippy::print_stdout)]
pub fn run() {
    println!("dotcopy {}", version());
}
