//! Top-level subcommand orchestration.
pub mod install;
pub mod validate;
pub mod version;

use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

use crate::cli::GlobalOpts;
use crate::config::Config;
use crate::logging::Log;
use crate::paths;

/// Environment variable naming the directive file.
pub const CONFIG_ENV: &str = "DOTCOPY_CONFIG";

/// File names probed in the working directory, in order.
const DEFAULT_CONFIG_NAMES: &[&str] = &["dotcopy.toml", "dotcopy.json"];

/// Shared state produced by the common command setup sequence.
#[derive(Debug)]
pub struct CommandSetup {
    /// The loaded directive file.
    pub config: Config,
    /// Home directory copies are confined to.
    pub home: PathBuf,
}

impl CommandSetup {
    /// Locate and load the directive file and determine the home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if no directive file can be found or loaded, or the
    /// home directory cannot be determined.
    pub fn init(global: &GlobalOpts, log: &dyn Log) -> Result<Self> {
        let cwd = std::env::current_dir().context("determining working directory")?;
        let path = resolve_config_path(
            global.config.as_deref(),
            std::env::var_os(CONFIG_ENV).map(PathBuf::from),
            &cwd,
        )?;

        log.stage("Loading configuration");
        let config = Config::load(&path, global.base_dir.as_deref())?;
        log.info(&format!(
            "loaded {} directive(s) from {}",
            config.directives.len(),
            config.path.display()
        ));
        log.debug(&format!("base directory: {}", config.base_dir.display()));

        let home = match &global.home {
            Some(home) => home.clone(),
            None => paths::home_dir()?,
        };
        log.debug(&format!("home directory: {}", home.display()));

        Ok(Self { config, home })
    }
}

/// Pick the directive file: an explicit path, then the environment value,
/// then the first default name present in `cwd`.
///
/// # Errors
///
/// Returns an error if nothing was given and no default file exists.
pub fn resolve_config_path(
    explicit: Option<&Path>,
    from_env: Option<PathBuf>,
    cwd: &Path,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = from_env.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(path);
    }
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(|name| cwd.join(name))
        .find(|candidate| candidate.is_file())
        .with_context(|| {
            format!(
                "no directive file found: pass --config, set {CONFIG_ENV}, or create {} in {}",
                DEFAULT_CONFIG_NAMES.join(" or "),
                cwd.display()
            )
        })
}
