//! Developer warnings.
//!
//! Contract violations that must not abort the program are reported as
//! `tracing` warnings on the `atomlens` target. Every warning also passes
//! through [`warning_breakpoint`], a never-inlined function a debugger can
//! break on to find the offending call site.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Reports a developer warning.
pub(crate) fn warning(message: &str) {
    tracing::warn!(target: "atomlens", "{message}");
    warning_breakpoint(message);
}

/// Emits the same warning at most `limit` times per process.
pub(crate) fn warning_limited(counter: &AtomicUsize, limit: usize, message: impl FnOnce() -> String) {
    let emitted = counter.fetch_add(1, Ordering::Relaxed);
    if emitted < limit {
        warning(&message());
    }
}

/// Set a breakpoint here (`break atomlens::warning::warning_breakpoint`) to
/// stop at the site of any developer warning.
#[cold]
#[inline(never)]
pub fn warning_breakpoint(message: &str) {
    std::hint::black_box(message);
}
