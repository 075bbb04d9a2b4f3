// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Top-level façade wiring the fallback sink, handle registry, and
//! backend tracker together.
//!
//! Hosts construct one `LoggingManager` and inject it where needed; the
//! crate deliberately has no hidden global instance, even though a single
//! process-wide manager is the typical deployment.

use crate::backend::{Backend, BackendId, LoggerProvider};
use crate::diagnostics::{DiagnosticChannel, DiagnosticEvent};
use crate::fallback::FallbackSink;
use crate::handle::{HandleInner, LoggerHandle, NoopProvider};
use crate::registry::HandleRegistry;
use crate::tracker::{BackendTracker, TrackerPhase};
use crate::LoggingConfig;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Name the distinguished root handle is issued under; empty handle
/// names map to it.
pub const ROOT_LOGGER_NAME: &str = "root";

/// Owner of the logging core: fallback sink, handle registry, backend
/// tracker, and diagnostic channel.
pub struct LoggingManager {
    registry: Arc<HandleRegistry>,
    tracker: BackendTracker,
    fallback: FallbackSink,
    diagnostics: DiagnosticChannel,
    /// Records discarded by the no-op degradation sink
    drops: Arc<AtomicU64>,
    shut_down: AtomicBool,
}

impl LoggingManager {
    /// Build a manager from configuration. Never fails: an unusable
    /// fallback file target degrades to console inside
    /// [`FallbackSink::new`].
    pub fn new(config: LoggingConfig) -> Self {
        let diagnostics = DiagnosticChannel::new(config.diagnostic_buffer.max(1));
        let fallback = FallbackSink::new(&config, &diagnostics);
        let registry = Arc::new(HandleRegistry::new(Arc::new(fallback.clone())));
        let tracker = BackendTracker::new(
            Arc::clone(&registry),
            fallback.clone(),
            diagnostics.clone(),
        );

        Self {
            registry,
            tracker,
            fallback,
            diagnostics,
            drops: Arc::new(AtomicU64::new(0)),
            shut_down: AtomicBool::new(false),
        }
    }

    /// Build a manager with console fallback and default thresholds
    pub fn with_defaults() -> Self {
        Self::new(LoggingConfig::default())
    }

    /// Obtain a logger handle.
    ///
    /// Never fails and never blocks on I/O. An empty name yields the
    /// distinguished root handle. Each call returns a new handle object,
    /// registered weakly and bound to the current active backend (or the
    /// fallback sink); handles issued under the same name are rebound
    /// together.
    pub fn get_handle(&self, name: &str) -> LoggerHandle {
        let name = if name.is_empty() { ROOT_LOGGER_NAME } else { name };
        let inner = Arc::new(HandleInner::new(
            name.to_string(),
            self.fallback.logger_for(name),
            self.diagnostics.clone(),
        ));
        // Registration resolves the real binding under the registry lock,
        // folding this handle into any rebind pass in progress.
        self.registry.register(&inner);
        LoggerHandle::from_inner(inner)
    }

    /// Module-registry notification: a backend instance was published.
    /// Returns the opaque identity of this publication.
    pub fn publish_backend(&self, backend: Arc<dyn Backend>) -> BackendId {
        self.tracker.publish(backend)
    }

    /// Module-registry notification: a backend instance was withdrawn.
    pub fn unpublish_backend(&self, id: BackendId) {
        self.tracker.unpublish(id);
    }

    /// Read-only snapshot of the active backend, for diagnostics
    pub fn current_backend(&self) -> Option<Arc<dyn Backend>> {
        self.tracker.active_backend()
    }

    /// Current phase of the backend tracker's state machine
    pub fn tracker_phase(&self) -> TrackerPhase {
        self.tracker.phase()
    }

    /// The always-available fallback sink
    pub fn fallback(&self) -> &FallbackSink {
        &self.fallback
    }

    /// Registry of live handles
    pub fn registry(&self) -> &HandleRegistry {
        &self.registry
    }

    /// Subscribe to the core's internal diagnostic events
    pub fn subscribe_diagnostics(&self) -> broadcast::Receiver<DiagnosticEvent> {
        self.diagnostics.subscribe()
    }

    /// The diagnostic channel itself (clone to report from adapters)
    pub fn diagnostics(&self) -> &DiagnosticChannel {
        &self.diagnostics
    }

    /// Records discarded by the no-op degradation sink (normally zero;
    /// grows only for log calls issued after shutdown or after total
    /// sink failure)
    pub fn dropped_records(&self) -> u64 {
        self.drops.load(Ordering::Relaxed)
    }

    /// Shut the core down.
    ///
    /// Detaches the tracker from the notification stream, rebinds every
    /// outstanding handle to the drop-counting no-op sink, and flushes
    /// the fallback. Idempotent, and safe to call while log calls are in
    /// flight: in-flight calls complete against the target they already
    /// loaded, later calls hit the no-op sink and never panic.
    pub fn shutdown(&self) {
        if self.shut_down.swap(true, Ordering::AcqRel) {
            return;
        }
        self.tracker.detach();
        self.registry
            .rebind_all(Arc::new(NoopProvider::new(Arc::clone(&self.drops))));
        self.fallback.flush();
    }
}

impl Drop for LoggingManager {
    fn drop(&mut self) {
        self.shutdown();
    }
}
