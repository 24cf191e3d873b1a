//! Command: run every directive in the directive file.
use anyhow::Result;
use std::sync::Arc;

use crate::cli::GlobalOpts;
use crate::directives::copy::CopyHandler;
use crate::directives::{Context, Dispatcher};
use crate::logging::{Log, Logger};

/// Run the install command.
///
/// # Errors
///
/// Returns an error if the directive file cannot be loaded or any directive
/// failed.
pub fn run(global: &GlobalOpts, log: &Arc<Logger>) -> Result<()> {
    let setup = super::CommandSetup::init(global, log.as_ref())?;

    log.debug(&format!("dotcopy {}", super::version::version()));

    let shared: Arc<dyn Log> = Arc::<Logger>::clone(log);
    let ctx = Context::with_home(
        Arc::clone(&shared),
        setup.home,
        setup.config.base_dir.clone(),
        global.dry_run,
    );

    let mut dispatcher = Dispatcher::new(shared);
    dispatcher.register(Box::new(CopyHandler::new(ctx)));

    if global.dry_run {
        log.stage("Processing directives (dry run)");
    } else {
        log.stage("Processing directives");
    }
    let success = dispatcher.run(&setup.config.directives);

    log.print_summary();

    if !success {
        anyhow::bail!("{} directive(s) failed", log.failure_count());
    }
    Ok(())
}
