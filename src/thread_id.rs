use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifier unique per OS thread, stable for the thread's lifetime.
///
/// Tokens are handed out from a process-wide counter the first time a
/// thread touches the profiler, so concurrently-live threads always get
/// distinct values and never collapse into one reporting bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ThreadToken(u64);

impl ThreadToken {
    pub fn as_u64(self) -> u64 {
        self.0
    }

    #[cfg(test)]
    pub(crate) fn for_test(id: u64) -> Self {
        ThreadToken(id)
    }
}

impl fmt::Display for ThreadToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(0);

thread_local! {
    static CURRENT_TOKEN: ThreadToken =
        ThreadToken(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed));
}

/// Token for the calling thread.
pub fn current() -> ThreadToken {
    CURRENT_TOKEN.with(|token| *token)
}
