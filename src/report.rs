use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::Arc;

use crate::path_key::PathKey;
use crate::stats::Stat;
use crate::thread_id::ThreadToken;

const RULE: &str = "_______________________________________________________________________________________";
const COLUMNS: &str =
    "| Total time   | Avg Time     |  Min time    |  Max time    | Calls  | Section";

/// Renders the hierarchical and flat views from one aggregation
/// snapshot.
///
/// Both views come out of a single pass over the sorted entries: while
/// the hierarchical block for a thread is printed, a per-leaf-name merge
/// map is accumulated and later printed as that thread's flat block.
pub struct ReportGenerator {
    entries: Vec<(PathKey, Stat)>,
}

impl ReportGenerator {
    pub fn new(mut entries: Vec<(PathKey, Stat)>) -> Self {
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        ReportGenerator { entries }
    }

    /// Both report views, one block per thread. Threads with no
    /// finished frames contribute nothing.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let mut flat: BTreeMap<ThreadToken, BTreeMap<Arc<str>, Stat>> = BTreeMap::new();

        // Entries sort thread-first, so consecutive dedup yields the
        // distinct threads in order.
        let mut threads: Vec<ThreadToken> =
            self.entries.iter().map(|(key, _)| key.thread()).collect();
        threads.dedup();

        for &thread in &threads {
            writeln!(out, "CALLSTACK of Thread {}", thread).unwrap();
            writeln!(out, "{}", RULE).unwrap();
            writeln!(out, "{}", COLUMNS).unwrap();
            writeln!(out, "{}", RULE).unwrap();
            for (key, stat) in self.entries.iter().filter(|(key, _)| key.thread() == thread) {
                Self::write_row(&mut out, stat, key.depth() - 1, key.leaf());
                flat.entry(thread)
                    .or_default()
                    .entry(Arc::clone(key.leaf()))
                    .or_default()
                    .absorb(stat);
            }
            writeln!(out, "{}\n", RULE).unwrap();
        }

        for (thread, leaves) in &flat {
            writeln!(out, "DUMP of Thread {}", thread).unwrap();
            writeln!(out, "{}", RULE).unwrap();
            writeln!(out, "{}", COLUMNS).unwrap();
            writeln!(out, "{}", RULE).unwrap();
            for (name, stat) in leaves {
                Self::write_row(&mut out, stat, 0, name);
            }
            writeln!(out, "{}\n", RULE).unwrap();
        }

        out
    }

    fn write_row(out: &mut String, stat: &Stat, indent: usize, name: &str) {
        writeln!(
            out,
            "| {:>12.4} | {:>12.4} | {:>12.4} | {:>12.4} | {:>6} | {}{}",
            stat.total_ms,
            stat.avg_ms,
            stat.min_ms,
            stat.max_ms,
            stat.calls,
            "  ".repeat(indent),
            name
        )
        .unwrap();
    }
}
