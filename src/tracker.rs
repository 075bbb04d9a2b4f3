// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend lifecycle tracking and rebind driving.
//!
//! The tracker consumes the module registry's publish/unpublish
//! notification stream, keeps the set of candidate backends, selects the
//! single active one, and asks the handle registry to rebind every live
//! handle whenever the selection changes. Log calls never touch the
//! tracker; they read an already-resolved target reference, so tracker
//! serialization never serializes logging.

use crate::backend::{Backend, BackendId, LoggerProvider, LogTarget};
use crate::diagnostics::{DiagnosticChannel, DiagnosticEvent};
use crate::fallback::FallbackSink;
use crate::registry::HandleRegistry;
use std::sync::{Arc, Mutex};

/// Observable phase of the tracker's state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerPhase {
    /// No backend published; handles route to the fallback sink
    NoBackend,
    /// Exactly one candidate, and it is active
    OneActive,
    /// More than one candidate during an overlapping install/uninstall
    /// window; the most recently published one is active
    Contended,
}

struct TrackerState {
    /// Published candidates in publication order; the last one is active
    candidates: Vec<(BackendId, Arc<dyn Backend>)>,
    /// Identity of the active candidate, None in NoBackend phase.
    /// Invariant: either None or the id of the last candidate.
    active: Option<BackendId>,
    /// Set on shutdown; notifications arriving afterwards are ignored.
    /// Guarded by the state mutex so a publish racing a detach either
    /// lands before it (and is swept away by the shutdown rebind) or
    /// observes the flag and bails.
    detached: bool,
}

/// Wraps a backend so the registry can treat backends and the fallback
/// sink uniformly as target providers.
struct BackendProvider(Arc<dyn Backend>);

impl LoggerProvider for BackendProvider {
    fn logger_for(&self, name: &str) -> Box<dyn LogTarget> {
        self.0.logger_for(name)
    }
}

/// Tracks published backends and drives handle rebinding.
pub struct BackendTracker {
    state: Mutex<TrackerState>,
    registry: Arc<HandleRegistry>,
    fallback: FallbackSink,
    diagnostics: DiagnosticChannel,
}

impl BackendTracker {
    pub(crate) fn new(
        registry: Arc<HandleRegistry>,
        fallback: FallbackSink,
        diagnostics: DiagnosticChannel,
    ) -> Self {
        Self {
            state: Mutex::new(TrackerState {
                candidates: Vec::new(),
                active: None,
                detached: false,
            }),
            registry,
            fallback,
            diagnostics,
        }
    }

    /// Handle a "backend published" notification.
    ///
    /// Returns the opaque identity of this publication; the same engine
    /// published twice gets two distinct identities, so a restart always
    /// triggers a rebind even when routing would be functionally
    /// identical.
    pub(crate) fn publish(&self, backend: Arc<dyn Backend>) -> BackendId {
        let id = BackendId::new();
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if state.detached {
            return id;
        }
        state.candidates.push((id, backend));
        self.apply_selection(&mut state);
        id
    }

    /// Handle a "backend unpublished" notification.
    ///
    /// Immediate and unconditional: the candidate is removed and, if it
    /// was active, every handle is rebound before this call returns, so
    /// no new log call can resolve the defunct backend afterwards. An
    /// unknown or stale id is a no-op.
    pub(crate) fn unpublish(&self, id: BackendId) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if state.detached {
            return;
        }
        state.candidates.retain(|(candidate, _)| *candidate != id);
        self.apply_selection(&mut state);
    }

    /// Recompute the active backend (last-writer-wins) and rebind all
    /// handles if it changed. Runs with the state mutex held, which
    /// serializes rebind passes against each other but not against log
    /// calls.
    fn apply_selection(&self, state: &mut TrackerState) {
        let new_active = state.candidates.last().map(|(id, _)| *id);
        if new_active == state.active {
            return;
        }
        state.active = new_active;

        match state.candidates.last() {
            Some((_, backend)) => {
                let name = backend.name().to_string();
                self.registry
                    .rebind_all(Arc::new(BackendProvider(Arc::clone(backend))));
                self.diagnostics.report(DiagnosticEvent::ActiveBackendChanged {
                    backend: Some(name),
                });
            }
            None => {
                self.registry
                    .rebind_all(Arc::new(self.fallback.clone()));
                self.diagnostics
                    .report(DiagnosticEvent::ActiveBackendChanged { backend: None });
            }
        }
    }

    /// Snapshot of the active backend, for diagnostics only
    pub(crate) fn active_backend(&self) -> Option<Arc<dyn Backend>> {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.candidates.last().map(|(_, backend)| Arc::clone(backend))
    }

    /// Current phase of the state machine
    pub fn phase(&self) -> TrackerPhase {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        match state.candidates.len() {
            0 => TrackerPhase::NoBackend,
            1 => TrackerPhase::OneActive,
            _ => TrackerPhase::Contended,
        }
    }

    /// Detach from the notification stream and drop all backend
    /// references. The flag flips under the state mutex, so
    /// publish/unpublish calls serialized after this point are ignored
    /// and cannot resurrect a candidate.
    pub(crate) fn detach(&self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.detached = true;
        state.candidates.clear();
        state.active = None;
    }
}
