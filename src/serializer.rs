use std::collections::HashMap;

use crate::path_key::PathKey;
use crate::stats::Stat;

/// Machine-readable rendering of an aggregation snapshot, for consumers
/// that want the same data the text reports are built from.
#[derive(Debug, Deserialize, Serialize)]
pub struct SnapshotSerializer {
    threads: HashMap<u64, ThreadSnapshot>,
}

#[derive(Debug, Deserialize, Serialize)]
struct ThreadSnapshot {
    thread_id: u64,
    entries: Vec<PathEntry>,
}

/// One call path with its aggregated statistics.
#[derive(Debug, Deserialize, Serialize)]
struct PathEntry {
    path: Vec<String>,
    depth: usize,
    total_ms: f64,
    avg_ms: f64,
    min_ms: f64,
    max_ms: f64,
    calls: u64,
}

impl SnapshotSerializer {
    pub fn serialize(snapshot: &[(PathKey, Stat)]) -> String {
        let mut serializer = SnapshotSerializer {
            threads: HashMap::new(),
        };

        for (key, stat) in snapshot {
            let thread_id = key.thread().as_u64();
            let thread = serializer
                .threads
                .entry(thread_id)
                .or_insert(ThreadSnapshot {
                    thread_id,
                    entries: vec![],
                });
            thread.entries.push(PathEntry {
                path: key.names().iter().map(|name| name.to_string()).collect(),
                depth: key.depth(),
                total_ms: stat.total_ms,
                avg_ms: stat.avg_ms,
                min_ms: stat.min_ms,
                max_ms: stat.max_ms,
                calls: stat.calls,
            });
        }

        serde_json::to_string(&serializer).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::thread_id::ThreadToken;

    #[test]
    fn test_serialize_round_trips_through_json() {
        let root = PathKey::root(ThreadToken::for_test(3), Arc::from("main"));
        let child = root.child(Arc::from("load"));
        let mut stat = Stat::new();
        stat.record(10.0);

        let json = SnapshotSerializer::serialize(&[(root, stat), (child, stat)]);
        let parsed: SnapshotSerializer = serde_json::from_str(&json).unwrap();

        let thread = &parsed.threads[&3];
        assert_eq!(thread.thread_id, 3);
        assert_eq!(thread.entries.len(), 2);
        assert_eq!(thread.entries[0].path, vec!["main"]);
        assert_eq!(thread.entries[1].path, vec!["main", "load"]);
        assert_eq!(thread.entries[1].depth, 2);
        assert_eq!(thread.entries[1].total_ms, 10.0);
        assert_eq!(thread.entries[1].calls, 1);
    }

    #[test]
    fn test_empty_snapshot_serializes_to_empty_object() {
        let json = SnapshotSerializer::serialize(&[]);
        assert_eq!(json, r#"{"threads":{}}"#);
    }
}
