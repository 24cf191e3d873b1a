//! Core logging types: directive entries, status, and the [`Log`] trait.

/// Directive outcome for summary reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveEntry {
    /// Directive name, e.g. `"copy"`.
    pub name: String,
    /// Final status of the directive.
    pub status: DirectiveStatus,
    /// Optional detail message (e.g., error description).
    pub message: Option<String>,
}

/// Status of a processed directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveStatus {
    /// Every entry succeeded or was skipped.
    Ok,
    /// The handler reported failure or raised an error.
    Failed,
    /// No registered handler accepts the directive.
    Unhandled,
}

/// Abstraction over logging backends.
///
/// Handlers receive an `Arc<dyn Log>` through their context, so tests can
/// substitute a recording or mock implementation for [`Logger`](super::Logger).
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log a low-priority informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a dry-run action message.
    fn dry_run(&self, msg: &str);
    /// Record a directive result for the summary.
    fn record_directive(&self, name: &str, status: DirectiveStatus, message: Option<&str>);
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn directive_status_equality() {
        assert_eq!(DirectiveStatus::Ok, DirectiveStatus::Ok);
        assert_ne!(DirectiveStatus::Ok, DirectiveStatus::Failed);
        assert_ne!(DirectiveStatus::Failed, DirectiveStatus::Unhandled);
    }

    #[test]
    fn directive_entry_clone() {
        let entry = DirectiveEntry {
            name: "copy".to_string(),
            status: DirectiveStatus::Failed,
            message: Some("one or more entries failed".to_string()),
        };
        assert_eq!(entry.clone(), entry);
    }
}
