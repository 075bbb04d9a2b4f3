// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dynamic logging indirection core.
//!
//! Application code obtains a named [`LoggerHandle`] once and logs
//! through it indefinitely; every call is routed to whichever backend
//! engine is currently active. Backends can be installed, removed, or
//! replaced at any time while the process runs: the [`BackendTracker`]
//! observes publish/unpublish notifications, selects the single active
//! engine (most recently published wins), and atomically rebinds every
//! outstanding handle. When no engine is published, records route to the
//! always-available [`FallbackSink`] (console or file).
//!
//! Design properties:
//! - The logging hot path is one atomic load; rebinds are one atomic
//!   store. Log calls never block on backend churn.
//! - Log calls never panic and never return errors; backend failures are
//!   caught and reported on a separate [`DiagnosticChannel`].
//! - Handles are held weakly by the registry, so abandoned handles are
//!   pruned rather than leaked.
//!
//! ```no_run
//! use log_relay::{LoggingManager, Level};
//!
//! let manager = LoggingManager::with_defaults();
//! let handle = manager.get_handle("app.startup");
//! handle.info("no backend yet; this goes to the fallback sink");
//! // ... publish a backend; the handle is rebound transparently ...
//! handle.log(Level::Warn, "now routed to the active backend");
//! ```

pub mod backend;
pub mod config;
pub mod context;
pub mod diagnostics;
pub mod fallback;
pub mod handle;
pub mod level;
#[macro_use]
pub mod macros;
pub mod manager;
pub mod record;
pub mod registry;
pub mod tracker;

// Public exports
pub use backend::{Backend, BackendId, LogTarget, LoggerProvider};
pub use config::{ConfigError, FallbackTarget, LoggingConfig};
pub use diagnostics::{DiagnosticChannel, DiagnosticEvent};
pub use fallback::FallbackSink;
pub use handle::LoggerHandle;
pub use level::{Level, LevelFilter};
pub use manager::{LoggingManager, ROOT_LOGGER_NAME};
pub use record::{ErrorRef, LogRecord};
pub use registry::HandleRegistry;
pub use tracker::{BackendTracker, TrackerPhase};
