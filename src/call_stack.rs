use std::collections::HashMap;
use std::sync::Arc;

use crate::path_key::PathKey;
use crate::thread_id::ThreadToken;

/// One active region on a thread's stack. Created on `start`, consumed
/// by the matching `end`; never shared.
#[derive(Clone, Debug)]
pub struct Frame {
    pub key: PathKey,
    pub start_ms: f64,
}

/// Per-thread stacks of active frames.
///
/// Each stack is pushed and popped only by its own thread, but the map
/// of stacks is shared; callers access the tracker under the session
/// lock.
#[derive(Debug, Default)]
pub struct CallStackTracker {
    stacks: HashMap<ThreadToken, Vec<Frame>>,
}

impl CallStackTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a region. The frame's key extends the caller's current
    /// top-of-stack key, or roots a new chain when the stack is empty.
    /// `name` is an interned, already-sanitized region name; callers
    /// run [`crate::path_key::sanitize_name`] before taking any lock.
    pub fn push(&mut self, thread: ThreadToken, name: Arc<str>, now_ms: f64) -> PathKey {
        let stack = self.stacks.entry(thread).or_default();
        let key = match stack.last() {
            Some(parent) => parent.key.child(name),
            None => PathKey::root(thread, name),
        };
        stack.push(Frame {
            key: key.clone(),
            start_ms: now_ms,
        });
        key
    }

    /// Closes the most recently opened region, returning its key and
    /// elapsed time. `None` means an unbalanced `end`.
    pub fn pop(&mut self, thread: ThreadToken, now_ms: f64) -> Option<(PathKey, f64)> {
        let frame = self.stacks.get_mut(&thread)?.pop()?;
        Some((frame.key, now_ms - frame.start_ms))
    }

    /// Number of regions currently open on `thread`.
    pub(crate) fn open_frames(&self, thread: ThreadToken) -> usize {
        self.stacks.get(&thread).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(id: u64) -> ThreadToken {
        ThreadToken::for_test(id)
    }

    #[test]
    fn test_root_and_child_keys() {
        let mut tracker = CallStackTracker::new();
        let outer = tracker.push(token(7), Arc::from("outer"), 0.0);
        let inner = tracker.push(token(7), Arc::from("inner"), 1.0);
        assert_eq!(outer.to_string(), "|7@outer");
        assert_eq!(inner.to_string(), "|7@outer|inner");
        assert_eq!(tracker.open_frames(token(7)), 2);
    }

    #[test]
    fn test_pop_is_lifo_and_computes_elapsed() {
        let mut tracker = CallStackTracker::new();
        tracker.push(token(0), Arc::from("a"), 0.0);
        tracker.push(token(0), Arc::from("b"), 5.0);

        let (key, elapsed) = tracker.pop(token(0), 15.0).unwrap();
        assert_eq!(key.to_string(), "|0@a|b");
        assert_eq!(elapsed, 10.0);

        let (key, elapsed) = tracker.pop(token(0), 20.0).unwrap();
        assert_eq!(key.to_string(), "|0@a");
        assert_eq!(elapsed, 20.0);
    }

    #[test]
    fn test_pop_on_empty_stack_is_none() {
        let mut tracker = CallStackTracker::new();
        assert!(tracker.pop(token(0), 1.0).is_none());
        tracker.push(token(0), Arc::from("a"), 0.0);
        tracker.pop(token(0), 1.0).unwrap();
        assert!(tracker.pop(token(0), 2.0).is_none());
    }

    #[test]
    fn test_self_recursion_builds_distinct_keys() {
        let mut tracker = CallStackTracker::new();
        let outer = tracker.push(token(0), Arc::from("x"), 0.0);
        let inner = tracker.push(token(0), Arc::from("x"), 0.0);
        assert_ne!(outer, inner);
        assert_eq!(inner.to_string(), "|0@x|x");
    }

    #[test]
    fn test_threads_have_independent_stacks() {
        let mut tracker = CallStackTracker::new();
        tracker.push(token(1), Arc::from("a"), 0.0);
        tracker.push(token(2), Arc::from("b"), 0.0);
        let (key, _) = tracker.pop(token(2), 1.0).unwrap();
        assert_eq!(key.to_string(), "|2@b");
        assert_eq!(tracker.open_frames(token(1)), 1);
        assert_eq!(tracker.open_frames(token(2)), 0);
    }
}
