// SPDX-License-Identifier: Apache-2.0 OR MIT
//! Capability traits a pluggable logging engine must implement, plus the
//! opaque per-publication identity used by the tracker.
//!
//! Engines are free to do arbitrarily rich formatting, appending, or
//! shipping behind this surface: the core only ever asks for a named
//! target, a threshold, and record acceptance.

use crate::{LevelFilter, LogRecord};
use anyhow::Result;
use uuid::Uuid;

/// A concrete per-name logger records can be delivered to.
///
/// Implemented by backend-provided loggers, by the fallback sink's named
/// views, and by the no-op degradation sink.
pub trait LogTarget: Send + Sync {
    /// Name this target was resolved for
    fn name(&self) -> &str;

    /// Current threshold; must be cheap and non-blocking, it is consulted
    /// on every log call before the message is constructed
    fn threshold(&self) -> LevelFilter;

    /// Deliver one record. Errors are caught by the calling handle and
    /// reported to the diagnostic channel; they never reach application
    /// code.
    fn accept(&self, record: &LogRecord) -> Result<()>;
}

/// Source of per-name [`LogTarget`]s.
///
/// This is the unit the registry rebinds against: during a rebind pass it
/// asks the provider for one target per live handle name. Handles never
/// resolve targets themselves, so name resolution has a single policy
/// point.
pub trait LoggerProvider: Send + Sync {
    /// Resolve a target for `name`. Must not fail; a provider that cannot
    /// serve a name returns a target that quietly discards.
    ///
    /// Called with the handle registry's lock held. Implementations must
    /// not call back into the manager or registry (obtaining a handle,
    /// publishing a backend); resolve any handles they need up front.
    fn logger_for(&self, name: &str) -> Box<dyn LogTarget>;
}

/// The minimal capability surface of a pluggable backend engine.
pub trait Backend: LoggerProvider {
    /// Human-readable engine name, for diagnostics only
    fn name(&self) -> &str;

    /// The engine's current global threshold
    fn threshold(&self) -> LevelFilter;
}

/// Opaque identity of one backend *publication*.
///
/// A fresh id is minted on every publish, so the same engine restarted is
/// a brand-new candidate and old handles can never keep routing to the
/// defunct instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BackendId(Uuid);

impl BackendId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for BackendId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
