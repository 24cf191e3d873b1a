//! Directive handlers and the dispatcher that routes directives to them.
pub mod copy;

use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Directive;
use crate::error::{DirectiveError, PathError};
use crate::logging::{DirectiveStatus, Log};
use crate::paths;

/// A pluggable processor for one or more directive names.
pub trait DirectiveHandler {
    /// Whether this handler accepts directives named `directive`.
    fn can_handle(&self, directive: &str) -> bool;

    /// Process one directive.
    ///
    /// Returns `Ok(false)` when some of the work failed but processing could
    /// continue.
    ///
    /// # Errors
    ///
    /// Returns a [`DirectiveError`] for directives the handler does not
    /// support or payloads it cannot interpret.
    fn handle(&mut self, directive: &str, data: &Value) -> Result<bool, DirectiveError>;
}

/// Shared state handed to directive handlers.
#[derive(Clone)]
pub struct Context {
    /// Logger for output and directive recording.
    pub log: Arc<dyn Log>,
    /// User's home directory path.
    pub home: PathBuf,
    /// Directory that relative paths resolve against.
    pub base_dir: PathBuf,
    /// Whether to perform a dry run (preview changes without applying).
    pub dry_run: bool,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("log", &"<dyn Log>")
            .field("home", &self.home)
            .field("base_dir", &self.base_dir)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl Context {
    /// Creates a new context using the home directory from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the HOME (or USERPROFILE on Windows) environment
    /// variable is not set.
    pub fn new(log: Arc<dyn Log>, base_dir: PathBuf, dry_run: bool) -> Result<Self, PathError> {
        Ok(Self::with_home(log, paths::home_dir()?, base_dir, dry_run))
    }

    /// Creates a context with an explicit home directory.
    #[must_use]
    pub fn with_home(log: Arc<dyn Log>, home: PathBuf, base_dir: PathBuf, dry_run: bool) -> Self {
        Self {
            log,
            home,
            base_dir,
            dry_run,
        }
    }
}

/// Routes each directive to the first registered handler that accepts it
/// and records the outcome.
pub struct Dispatcher {
    log: Arc<dyn Log>,
    handlers: Vec<Box<dyn DirectiveHandler>>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("log", &"<dyn Log>")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl Dispatcher {
    /// Create a dispatcher with no handlers.
    #[must_use]
    pub fn new(log: Arc<dyn Log>) -> Self {
        Self {
            log,
            handlers: Vec::new(),
        }
    }

    /// Append a handler; earlier registrations take precedence.
    pub fn register(&mut self, handler: Box<dyn DirectiveHandler>) {
        self.handlers.push(handler);
    }

    /// Process `directives` in order.
    ///
    /// Every directive is attempted even after a failure. Returns `true` only
    /// if every directive was handled and succeeded.
    #[must_use]
    pub fn run(&mut self, directives: &[Directive]) -> bool {
        let mut success = true;
        for directive in directives {
            let status = self.dispatch(directive);
            success &= status == DirectiveStatus::Ok;
        }
        success
    }

    fn dispatch(&mut self, directive: &Directive) -> DirectiveStatus {
        let name = directive.name.as_str();
        let Some(handler) = self.handlers.iter_mut().find(|h| h.can_handle(name)) else {
            self.log.error(&format!("Action {name} not handled"));
            self.log
                .record_directive(name, DirectiveStatus::Unhandled, Some("unsupported directive"));
            return DirectiveStatus::Unhandled;
        };

        self.log.debug(&format!("dispatching directive '{name}'"));
        let (status, message) = match handler.handle(name, &directive.data) {
            Ok(true) => (DirectiveStatus::Ok, None),
            Ok(false) => (
                DirectiveStatus::Failed,
                Some("one or more entries failed".to_string()),
            ),
            Err(e) => {
                self.log.error(&format!("An error was encountered while executing action {name}: {e}"));
                (DirectiveStatus::Failed, Some(e.to_string()))
            }
        };
        self.log.record_directive(name, status, message.as_deref());
        status
    }
}
