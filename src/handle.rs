// SPDX-License-Identifier: Apache-2.0 OR MIT
//! Logger handles - the stable objects application code logs through.
//!
//! A handle holds one atomically-swappable target reference. Log calls do
//! a single atomic load, check the target's threshold, and deliver; a
//! rebind is a single atomic store. A call already past its load completes
//! against the target it read, which is the documented tolerance for
//! briefly logging to a just-superseded backend.

use crate::backend::{LogTarget, LoggerProvider};
use crate::diagnostics::{DiagnosticChannel, DiagnosticEvent};
use crate::{ErrorRef, Level, LevelFilter, LogRecord};
use anyhow::Result;
use arc_swap::ArcSwap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared state behind one logger handle.
///
/// Held strongly by every clone of the handle and weakly by the registry,
/// so abandoned handles can be collected and pruned.
pub(crate) struct HandleInner {
    name: String,
    target: ArcSwap<Box<dyn LogTarget>>,
    diagnostics: DiagnosticChannel,
}

impl HandleInner {
    pub(crate) fn new(
        name: String,
        initial: Box<dyn LogTarget>,
        diagnostics: DiagnosticChannel,
    ) -> Self {
        Self {
            name,
            target: ArcSwap::from_pointee(initial),
            diagnostics,
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    /// Atomic pointer replacement; called only by the registry during a
    /// rebind pass. Calls already in flight keep the target they loaded.
    pub(crate) fn rebind(&self, new_target: Box<dyn LogTarget>) {
        self.target.store(Arc::new(new_target));
    }

    fn deliver(&self, target: &dyn LogTarget, record: &LogRecord) {
        match catch_unwind(AssertUnwindSafe(|| target.accept(record))) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                self.diagnostics.report(DiagnosticEvent::BackendFailure {
                    logger: self.name.clone(),
                    detail: format!("{:#}", e),
                });
            }
            Err(payload) => {
                let detail = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "opaque panic payload".to_string());
                self.diagnostics.report(DiagnosticEvent::BackendPanicked {
                    logger: self.name.clone(),
                    detail,
                });
            }
        }
    }
}

/// The object application code (or a front-end adapter) logs through.
///
/// Cheap to clone; clones share one binding. Handles obtained separately
/// under the same name are independent objects that the registry rebinds
/// together. A handle never throws, never blocks on rebinds, and is never
/// left without a live target.
#[derive(Clone)]
pub struct LoggerHandle {
    inner: Arc<HandleInner>,
}

impl LoggerHandle {
    pub(crate) fn from_inner(inner: Arc<HandleInner>) -> Self {
        Self { inner }
    }

    pub(crate) fn inner(&self) -> &Arc<HandleInner> {
        &self.inner
    }

    /// Name this handle was issued under
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Whether a record at `level` would currently be delivered.
    ///
    /// Consistent with `log` at the same instant, best-effort under
    /// concurrent rebinds: both read the same atomic target reference.
    pub fn is_enabled_for(&self, level: Level) -> bool {
        self.inner.target.load().threshold().enables(level)
    }

    /// Log a pre-rendered message
    pub fn log(&self, level: Level, message: &str) {
        self.log_parts(level, || message.to_string(), None);
    }

    /// Log with a lazily-constructed message.
    ///
    /// The supplier runs only when the bound target's threshold enables
    /// `level`, preserving the avoid-needless-construction discipline
    /// front-end adapters rely on.
    pub fn log_with<F>(&self, level: Level, message: F)
    where
        F: FnOnce() -> String,
    {
        self.log_parts(level, message, None);
    }

    /// Log with a lazily-constructed message and an error cause
    pub fn log_with_cause<F>(&self, level: Level, message: F, cause: ErrorRef)
    where
        F: FnOnce() -> String,
    {
        self.log_parts(level, message, Some(cause));
    }

    fn log_parts<F>(&self, level: Level, message: F, cause: Option<ErrorRef>)
    where
        F: FnOnce() -> String,
    {
        // Single atomic load; everything below works on this snapshot.
        let target = self.inner.target.load_full();
        if !target.threshold().enables(level) {
            return;
        }
        let mut record = LogRecord::new(self.inner.name(), level, message());
        if let Some(cause) = cause {
            record = record.with_cause(cause);
        }
        self.inner.deliver(&**target, &record);
    }

    /// Deliver a record a front-end adapter has already normalized.
    ///
    /// The record's own level is checked against the bound target's
    /// threshold, same as `log`.
    pub fn submit(&self, record: LogRecord) {
        let target = self.inner.target.load_full();
        if !target.threshold().enables(record.level) {
            return;
        }
        self.inner.deliver(&**target, &record);
    }

    /// Log with trace level
    pub fn trace(&self, message: &str) {
        self.log(Level::Trace, message);
    }

    /// Log with debug level
    pub fn debug(&self, message: &str) {
        self.log(Level::Debug, message);
    }

    /// Log with info level
    pub fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    /// Log with warn level
    pub fn warn(&self, message: &str) {
        self.log(Level::Warn, message);
    }

    /// Log with error level
    pub fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }

    /// Log with fatal level
    pub fn fatal(&self, message: &str) {
        self.log(Level::Fatal, message);
    }

    /// Log with audit level (never suppressed by any threshold)
    pub fn audit(&self, message: &str) {
        self.log(Level::Audit, message);
    }
}

/// Terminal degradation sink: accepts everything, writes nothing, counts
/// what it discarded. Handles are bound here after shutdown.
pub(crate) struct NoopTarget {
    name: String,
    drops: Arc<AtomicU64>,
}

impl LogTarget for NoopTarget {
    fn name(&self) -> &str {
        &self.name
    }

    fn threshold(&self) -> LevelFilter {
        // Everything reaches accept() so every discarded record is counted
        LevelFilter::Trace
    }

    fn accept(&self, _record: &LogRecord) -> Result<()> {
        self.drops.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

/// Provider of [`NoopTarget`]s sharing one process-wide drop counter
pub(crate) struct NoopProvider {
    drops: Arc<AtomicU64>,
}

impl NoopProvider {
    pub(crate) fn new(drops: Arc<AtomicU64>) -> Self {
        Self { drops }
    }
}

impl LoggerProvider for NoopProvider {
    fn logger_for(&self, name: &str) -> Box<dyn LogTarget> {
        Box::new(NoopTarget {
            name: name.to_string(),
            drops: Arc::clone(&self.drops),
        })
    }
}
