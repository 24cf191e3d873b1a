//! Command: check the directive file without copying anything.
use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::config::validation;
use crate::logging::Log;

/// Run the validate command.
///
/// # Errors
///
/// Returns an error if the directive file cannot be loaded or produced any
/// validation warning.
pub fn run(global: &GlobalOpts, log: &dyn Log) -> Result<()> {
    let setup = super::CommandSetup::init(global, log)?;

    log.stage("Validating directives");
    let warnings = validation::validate_all(&setup.config, &setup.home);
    if warnings.is_empty() {
        log.info(&format!(
            "all {} directive(s) look good",
            setup.config.directives.len()
        ));
        return Ok(());
    }

    for warning in &warnings {
        log.warn(&format!(
            "{} [{}]: {}",
            warning.source, warning.item, warning.message
        ));
    }
    anyhow::bail!("found {} configuration warning(s)", warnings.len())
}
