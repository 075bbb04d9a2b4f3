// SPDX-License-Identifier: Apache-2.0 OR MIT
//! Thread-local diagnostic context (key/value map).
//!
//! Values set here are snapshotted into every [`LogRecord`](crate::LogRecord)
//! constructed on the same thread. The map is per-thread; propagation across
//! threads is the caller's concern.

use std::cell::RefCell;
use std::collections::HashMap;

thread_local! {
    static CONTEXT: RefCell<HashMap<String, String>> = RefCell::new(HashMap::new());
}

/// Set a context value for the current thread.
pub fn put(key: impl Into<String>, value: impl Into<String>) {
    CONTEXT.with(|ctx| {
        ctx.borrow_mut().insert(key.into(), value.into());
    });
}

/// Get a context value for the current thread.
pub fn get(key: &str) -> Option<String> {
    CONTEXT.with(|ctx| ctx.borrow().get(key).cloned())
}

/// Remove a context value, returning the previous value if any.
pub fn remove(key: &str) -> Option<String> {
    CONTEXT.with(|ctx| ctx.borrow_mut().remove(key))
}

/// Clear all context values for the current thread.
pub fn clear() {
    CONTEXT.with(|ctx| ctx.borrow_mut().clear());
}

/// Snapshot the current thread's context map.
///
/// Called once per record at construction time, so a record reflects the
/// context exactly as it was at the moment of emission.
pub fn snapshot() -> HashMap<String, String> {
    CONTEXT.with(|ctx| ctx.borrow().clone())
}
