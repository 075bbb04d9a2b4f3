// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Diagnostic channel for the core's own internal failures.
//!
//! Deliberately separate from the application logging path: a backend
//! that fails during `accept` must not be reported through the very
//! handle that just failed, or the failure would feed back on itself.
//! Interested parties (tests, operators' tooling) subscribe via a
//! broadcast channel and render events as one-liners.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;

/// One internal-failure or lifecycle report.
#[derive(Debug, Clone)]
pub enum DiagnosticEvent {
    /// A backend target returned an error from `accept`
    BackendFailure {
        /// Name of the logger whose delivery failed
        logger: String,
        /// Error rendering
        detail: String,
    },
    /// A backend target panicked during `accept`
    BackendPanicked {
        /// Name of the logger whose delivery panicked
        logger: String,
        /// Panic payload rendering, when extractable
        detail: String,
    },
    /// The configured fallback target could not be opened; the sink
    /// degraded to console
    FallbackDegraded {
        /// What failed and why
        detail: String,
    },
    /// The active backend changed (None = routed to the fallback sink)
    ActiveBackendChanged {
        /// Engine name of the new active backend, if any
        backend: Option<String>,
    },
}

impl std::fmt::Display for DiagnosticEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticEvent::BackendFailure { logger, detail } => {
                write!(f, "backend failed accepting record for '{}': {}", logger, detail)
            }
            DiagnosticEvent::BackendPanicked { logger, detail } => {
                write!(f, "backend panicked accepting record for '{}': {}", logger, detail)
            }
            DiagnosticEvent::FallbackDegraded { detail } => {
                write!(f, "fallback degraded to console: {}", detail)
            }
            DiagnosticEvent::ActiveBackendChanged { backend } => match backend {
                Some(name) => write!(f, "active backend is now '{}'", name),
                None => write!(f, "no active backend; routing to fallback"),
            },
        }
    }
}

/// Broadcast channel for [`DiagnosticEvent`]s.
///
/// Cheap to clone; every clone reports into the same channel. Having no
/// subscribers is normal, not an error.
#[derive(Clone)]
pub struct DiagnosticChannel {
    event_tx: broadcast::Sender<DiagnosticEvent>,
    reports: Arc<AtomicU64>,
}

impl DiagnosticChannel {
    /// Create a new channel with the specified buffer size
    pub fn new(buffer_size: usize) -> Self {
        let (event_tx, _) = broadcast::channel(buffer_size);
        Self {
            event_tx,
            reports: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Get a new receiver for subscribing to events
    pub fn subscribe(&self) -> broadcast::Receiver<DiagnosticEvent> {
        self.event_tx.subscribe()
    }

    /// Report an event to all subscribers.
    ///
    /// Returns the number of receivers that saw the event; 0 when nobody
    /// is subscribed.
    pub fn report(&self, event: DiagnosticEvent) -> usize {
        self.reports.fetch_add(1, Ordering::Relaxed);
        self.event_tx.send(event).unwrap_or_default()
    }

    /// Total number of events reported since construction
    pub fn report_count(&self) -> u64 {
        self.reports.load(Ordering::Relaxed)
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.event_tx.receiver_count()
    }
}

impl Default for DiagnosticChannel {
    fn default() -> Self {
        // Default buffer size of 256 events
        Self::new(256)
    }
}
