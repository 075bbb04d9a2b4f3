// SPDX-License-Identifier: Apache-2.0 OR MIT
//! Process-wide table of issued logger handles, used to broadcast rebinds.
//!
//! The registry holds handles weakly: a handle's lifetime belongs to
//! whoever requested it, and abandoned handles are pruned during the next
//! rebind sweep rather than actively deleted.
//!
//! Concurrency discipline: one mutex guards both the handle table and the
//! current provider. `register` resolves a new handle's target under that
//! mutex, so a registration racing an in-progress `rebind_all` either
//! waits for the sweep and binds to its result, or lands in the table
//! first and is swept like every other handle. Either way a new handle is
//! never left bound to a superseded provider.

use crate::backend::LoggerProvider;
use crate::handle::HandleInner;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

struct RegistryState {
    /// name -> weakly-held handles issued under that name
    handles: HashMap<String, Vec<Weak<HandleInner>>>,
    /// Provider of the most recent rebind pass; registrations arriving
    /// after that pass resolve directly against it
    provider: Arc<dyn LoggerProvider>,
}

/// Table of all live logger handles, keyed by name.
pub struct HandleRegistry {
    state: Mutex<RegistryState>,
}

impl HandleRegistry {
    /// Create a registry whose handles initially bind through `provider`
    /// (the fallback sink at process start).
    pub(crate) fn new(provider: Arc<dyn LoggerProvider>) -> Self {
        Self {
            state: Mutex::new(RegistryState {
                handles: HashMap::new(),
                provider,
            }),
        }
    }

    /// Register a handle and bind it to the current provider.
    pub(crate) fn register(&self, inner: &Arc<HandleInner>) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        inner.rebind(state.provider.logger_for(inner.name()));
        state
            .handles
            .entry(inner.name().to_string())
            .or_default()
            .push(Arc::downgrade(inner));
    }

    /// Rebind every live handle to a target obtained from `provider` for
    /// its own name. Expired weak entries are pruned during the pass.
    ///
    /// This is the only place backend-provided per-name loggers are
    /// requested.
    pub(crate) fn rebind_all(&self, provider: Arc<dyn LoggerProvider>) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.provider = Arc::clone(&provider);
        state.handles.retain(|name, entries| {
            entries.retain(|weak| match weak.upgrade() {
                Some(inner) => {
                    inner.rebind(provider.logger_for(name));
                    true
                }
                None => false,
            });
            !entries.is_empty()
        });
    }

    /// Number of live handles currently tracked (diagnostics only; counts
    /// entries whose weak reference is still upgradeable).
    pub fn live_handle_count(&self) -> usize {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state
            .handles
            .values()
            .map(|entries| entries.iter().filter(|w| w.strong_count() > 0).count())
            .sum()
    }
}
