//! Call-path profiler.
//!
//! An embedder brackets a code region with [`start`]/[`end`] (or a
//! [`Session::scope`] guard) and gets per-thread aggregated timings.
//! Entries are keyed by the full chain of callers, so the same region
//! reached from two different call sites is costed separately in the
//! hierarchical report while the flat report re-merges everything that
//! shares a region name.
//!
//! ```
//! pathprof::enable();
//! pathprof::start("main");
//! pathprof::start("load");
//! pathprof::end();
//! pathprof::end();
//! println!("{}", pathprof::report());
//! pathprof::disable();
//! ```

extern crate serde;
#[macro_use]
extern crate serde_derive;

mod call_stack;
mod clock;
mod path_key;
mod profile;
mod report;
mod serializer;
mod session;
mod stats;
mod thread_id;

pub use crate::call_stack::CallStackTracker;
pub use crate::clock::{Clock, MonotonicClock};
pub use crate::path_key::{PathKey, NAME_SEPARATOR, THREAD_MARKER};
pub use crate::profile::ProfileGraph;
pub use crate::report::ReportGenerator;
pub use crate::serializer::SnapshotSerializer;
pub use crate::session::{ScopeGuard, Session};
pub use crate::stats::Stat;
pub use crate::thread_id::ThreadToken;

use std::sync::RwLock;

// Read-locked on the hot bracket path so concurrent threads only
// contend on the session's own lock; exclusive only for install and
// teardown.
static GLOBAL_SESSION: RwLock<Option<Session>> = RwLock::new(None);

/// Installs the process-wide session. Calling `enable` while already
/// enabled is a programmer error; the previous session's data is
/// discarded with a logged warning.
pub fn enable() {
    #[cfg(feature = "debug")]
    {
        let _ = env_logger::builder()
            .format_timestamp(None)
            .format_module_path(false)
            .try_init();
    }

    let mut global = GLOBAL_SESSION.write().unwrap();
    if global.is_some() {
        log::warn!("enable() called while profiling is already enabled; previous data discarded");
    }
    *global = Some(Session::new());
}

/// Tears down the process-wide session and releases everything it
/// recorded.
pub fn disable() {
    *GLOBAL_SESSION.write().unwrap() = None;
}

/// [`Session::start`] on the process-wide session; no-op when disabled.
pub fn start(name: &str) {
    if let Some(session) = GLOBAL_SESSION.read().unwrap().as_ref() {
        session.start(name);
    }
}

/// [`Session::end`] on the process-wide session; no-op when disabled.
pub fn end() {
    if let Some(session) = GLOBAL_SESSION.read().unwrap().as_ref() {
        session.end();
    }
}

/// Both report views from the process-wide session; empty when
/// disabled.
pub fn report() -> String {
    match GLOBAL_SESSION.read().unwrap().as_ref() {
        Some(session) => session.report(),
        None => String::new(),
    }
}
