use std::sync::{Arc, Mutex};

use crate::call_stack::CallStackTracker;
use crate::clock::{Clock, MonotonicClock};
use crate::path_key::{sanitize_name, PathKey};
use crate::profile::ProfileGraph;
use crate::report::ReportGenerator;
use crate::serializer::SnapshotSerializer;
use crate::stats::Stat;
use crate::thread_id;

/// One profiling session: the aggregation state plus the clock it
/// measures against.
///
/// Sessions are independent of each other, so tests (or an embedder
/// profiling two subsystems) can run several side by side. The
/// per-thread stacks and the path graph live behind a single mutex;
/// `end` pops the frame and merges it under one lock acquisition. Name
/// sanitization and the clock read both happen before the lock is
/// taken; nothing under it but the map mutation.
pub struct Session {
    clock: Arc<dyn Clock>,
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    tracker: CallStackTracker,
    graph: ProfileGraph,
}

impl Session {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(MonotonicClock::new()))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Session {
            clock,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Opens a region on the calling thread.
    pub fn start(&self, name: &str) {
        let name = sanitize_name(name);
        let thread = thread_id::current();
        let now_ms = self.clock.now_ms();
        let mut inner = self.inner.lock().unwrap();
        inner.tracker.push(thread, name, now_ms);
    }

    /// Closes the calling thread's innermost open region and merges its
    /// elapsed time into the graph. An unbalanced call is logged and
    /// leaves the aggregation untouched.
    pub fn end(&self) {
        let now_ms = self.clock.now_ms();
        let thread = thread_id::current();
        let mut inner = self.inner.lock().unwrap();
        match inner.tracker.pop(thread, now_ms) {
            Some((key, elapsed_ms)) => inner.graph.record(key, elapsed_ms),
            None => log::error!("end() called on thread {} with no open region", thread),
        }
    }

    /// Opens a region that is closed when the returned guard drops.
    pub fn scope(&self, name: &str) -> ScopeGuard<'_> {
        self.start(name);
        ScopeGuard { session: self }
    }

    /// Sorted copy of every aggregated entry; the seam between
    /// aggregation and rendering.
    pub fn snapshot(&self) -> Vec<(PathKey, Stat)> {
        self.inner.lock().unwrap().graph.snapshot()
    }

    /// The hierarchical and flat text reports.
    pub fn report(&self) -> String {
        ReportGenerator::new(self.snapshot()).render()
    }

    /// JSON rendering of the same snapshot the text reports consume.
    pub fn to_json(&self) -> String {
        SnapshotSerializer::serialize(&self.snapshot())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Closes its region on drop.
pub struct ScopeGuard<'a> {
    session: &'a Session,
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        self.session.end();
    }
}
