// SPDX-License-Identifier: Apache-2.0 OR MIT
// Normalized log record - the one event shape every front-end adapter produces

use crate::context;
use crate::Level;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;

/// Shared reference to a record's error cause.
///
/// `Arc` rather than `Box` so records stay cheaply cloneable when a sink
/// needs to retain them.
pub type ErrorRef = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// A normalized log event.
///
/// Front-end adapters translate their own call conventions (argument
/// orders, level names, pattern substitution) into this one shape before
/// anything reaches the core. Construct with [`LogRecord::new`], refine
/// with the `with_*` builders, then hand off; nothing mutates a record
/// after delivery starts.
#[derive(Debug, Clone)]
pub struct LogRecord {
    /// Name of the logger this record was emitted through
    pub logger_name: String,
    /// Severity level
    pub level: Level,
    /// Fully-rendered message text
    pub message: String,
    /// Optional error cause; rendered as a `caused by:` chain by sinks
    pub cause: Option<ErrorRef>,
    /// Snapshot of the emitting thread's diagnostic context
    pub context: HashMap<String, String>,
    /// Optional caller location hint (e.g. "module::fn" or "file:line")
    pub caller_hint: Option<String>,
    /// Emission timestamp
    pub timestamp: DateTime<Utc>,
}

impl LogRecord {
    /// Create a record, stamping the current time and snapshotting the
    /// emitting thread's context map.
    pub fn new(logger_name: impl Into<String>, level: Level, message: impl Into<String>) -> Self {
        Self {
            logger_name: logger_name.into(),
            level,
            message: message.into(),
            cause: None,
            context: context::snapshot(),
            caller_hint: None,
            timestamp: Utc::now(),
        }
    }

    /// Attach an error cause.
    pub fn with_cause(mut self, cause: ErrorRef) -> Self {
        self.cause = Some(cause);
        self
    }

    /// Attach a caller location hint.
    pub fn with_caller_hint(mut self, hint: impl Into<String>) -> Self {
        self.caller_hint = Some(hint.into());
        self
    }

    /// Render the cause chain, one `caused by:` line per error in the
    /// `source()` chain. Returns None when there is no cause.
    pub fn render_cause(&self) -> Option<String> {
        let cause = self.cause.as_ref()?;
        let mut rendered = format!("  caused by: {}", cause);
        let mut source = cause.source();
        while let Some(err) = source {
            rendered.push_str(&format!("\n  caused by: {}", err));
            source = err.source();
        }
        Some(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct LeafError;

    impl std::fmt::Display for LeafError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "disk full")
        }
    }

    impl std::error::Error for LeafError {}

    #[derive(Debug)]
    struct WrapError(LeafError);

    impl std::fmt::Display for WrapError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "write failed")
        }
    }

    impl std::error::Error for WrapError {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_record_construction() {
        let record = LogRecord::new("app.db", Level::Warn, "slow query");
        assert_eq!(record.logger_name, "app.db");
        assert_eq!(record.level, Level::Warn);
        assert_eq!(record.message, "slow query");
        assert!(record.cause.is_none());
        assert!(record.caller_hint.is_none());
    }

    #[test]
    fn test_record_snapshots_context() {
        crate::context::clear();
        crate::context::put("txn", "t-9");
        let record = LogRecord::new("app", Level::Info, "commit");
        crate::context::put("txn", "t-10");
        assert_eq!(record.context.get("txn"), Some(&"t-9".to_string()));
        crate::context::clear();
    }

    #[test]
    fn test_render_cause_chain() {
        let record = LogRecord::new("app", Level::Error, "save failed")
            .with_cause(Arc::new(WrapError(LeafError)));
        let rendered = record.render_cause().unwrap();
        assert_eq!(
            rendered,
            "  caused by: write failed\n  caused by: disk full"
        );
    }

    #[test]
    fn test_caller_hint() {
        let record =
            LogRecord::new("app", Level::Debug, "tick").with_caller_hint("scheduler::run");
        assert_eq!(record.caller_hint.as_deref(), Some("scheduler::run"));
    }
}
