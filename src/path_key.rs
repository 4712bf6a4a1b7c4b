use std::fmt;
use std::sync::Arc;

use crate::thread_id::ThreadToken;

/// Separates region names within a rendered path key.
pub const NAME_SEPARATOR: char = '|';
/// Separates the thread identifier from the first region name.
pub const THREAD_MARKER: char = '@';

/// Composite call-path key: a thread plus the ordered chain of region
/// names from the outermost open region down to this one.
///
/// Keys are compared and hashed structurally (thread first, then the
/// name chain element by element), so a parent always orders immediately
/// before its descendants and entries for one thread stay contiguous in
/// a sorted snapshot. The `|tid@a|b|c` string form is produced only for
/// display.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PathKey {
    thread: ThreadToken,
    names: Vec<Arc<str>>,
}

impl PathKey {
    /// Key for a frame pushed onto an empty stack.
    pub fn root(thread: ThreadToken, name: Arc<str>) -> Self {
        PathKey {
            thread,
            names: vec![name],
        }
    }

    /// Key for a frame pushed while `self` is top of stack. The name
    /// chain is shared with the parent up to the new leaf.
    pub fn child(&self, name: Arc<str>) -> Self {
        let mut names = self.names.clone();
        names.push(name);
        PathKey {
            thread: self.thread,
            names,
        }
    }

    pub fn thread(&self) -> ThreadToken {
        self.thread
    }

    /// Nesting depth; always >= 1.
    pub fn depth(&self) -> usize {
        self.names.len()
    }

    pub fn names(&self) -> &[Arc<str>] {
        &self.names
    }

    /// The region's own name, stripped of ancestry.
    pub fn leaf(&self) -> &Arc<str> {
        self.names.last().expect("path key has at least one segment")
    }
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            NAME_SEPARATOR, self.thread, THREAD_MARKER, self.names[0]
        )?;
        for name in &self.names[1..] {
            write!(f, "{}{}", NAME_SEPARATOR, name)?;
        }
        Ok(())
    }
}

/// Interns a region name, replacing reserved key characters with `_`.
///
/// The structural key itself cannot be confused by `|` or `@`, but the
/// rendered reports would be. Names are rewritten deterministically and
/// the rewrite is logged, never applied silently.
pub fn sanitize_name(name: &str) -> Arc<str> {
    if name.contains(|c| c == NAME_SEPARATOR || c == THREAD_MARKER) {
        log::warn!(
            "region name {:?} contains a reserved character; replacing with '_'",
            name
        );
        let cleaned: String = name
            .chars()
            .map(|c| {
                if c == NAME_SEPARATOR || c == THREAD_MARKER {
                    '_'
                } else {
                    c
                }
            })
            .collect();
        Arc::from(cleaned)
    } else {
        Arc::from(name)
    }
}
