/// Running statistics for one call path, in milliseconds.
///
/// `min_ms` starts at infinity so the first recorded sample overwrites
/// it unconditionally; the average is recomputed from the total on every
/// update, making the final value independent of sample arrival order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stat {
    pub total_ms: f64,
    pub avg_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
    pub calls: u64,
}

impl Stat {
    pub fn new() -> Self {
        Stat {
            total_ms: 0.0,
            avg_ms: 0.0,
            min_ms: f64::INFINITY,
            max_ms: 0.0,
            calls: 0,
        }
    }

    /// Folds one elapsed sample in.
    pub fn record(&mut self, elapsed_ms: f64) {
        self.calls += 1;
        self.total_ms += elapsed_ms;
        self.min_ms = self.min_ms.min(elapsed_ms);
        self.max_ms = self.max_ms.max(elapsed_ms);
        self.avg_ms = self.total_ms / self.calls as f64;
    }

    /// Merges another aggregated entry in. Used by the flat report when
    /// several call paths share a leaf name.
    pub fn absorb(&mut self, other: &Stat) {
        self.calls += other.calls;
        self.total_ms += other.total_ms;
        self.min_ms = self.min_ms.min(other.min_ms);
        self.max_ms = self.max_ms.max(other.max_ms);
        self.avg_ms = self.total_ms / self.calls as f64;
    }
}

impl Default for Stat {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorded(samples: &[f64]) -> Stat {
        let mut stat = Stat::new();
        for &sample in samples {
            stat.record(sample);
        }
        stat
    }

    #[test]
    fn test_first_sample_overwrites_sentinel_min() {
        let stat = recorded(&[42.0]);
        assert_eq!(stat.min_ms, 42.0);
        assert_eq!(stat.max_ms, 42.0);
        assert_eq!(stat.total_ms, 42.0);
        assert_eq!(stat.avg_ms, 42.0);
        assert_eq!(stat.calls, 1);
    }

    #[test]
    fn test_running_statistics() {
        let stat = recorded(&[10.0, 5.0, 15.0]);
        assert_eq!(stat.calls, 3);
        assert_eq!(stat.total_ms, 30.0);
        assert_eq!(stat.avg_ms, 10.0);
        assert_eq!(stat.min_ms, 5.0);
        assert_eq!(stat.max_ms, 15.0);
    }

    #[test]
    fn test_invariant_min_le_avg_le_max() {
        let stat = recorded(&[3.5, 0.25, 9.75, 1.0]);
        assert!(stat.min_ms <= stat.avg_ms);
        assert!(stat.avg_ms <= stat.max_ms);
        assert_eq!(stat.avg_ms, stat.total_ms / stat.calls as f64);
    }

    #[test]
    fn test_order_independence() {
        let permutations: [&[f64]; 4] = [
            &[1.0, 2.0, 3.0, 4.0],
            &[4.0, 3.0, 2.0, 1.0],
            &[2.0, 4.0, 1.0, 3.0],
            &[3.0, 1.0, 4.0, 2.0],
        ];
        let expected = recorded(permutations[0]);
        for samples in &permutations[1..] {
            assert_eq!(recorded(samples), expected);
        }
    }

    #[test]
    fn test_absorb_matches_recording_all_samples() {
        let mut left = recorded(&[10.0, 20.0]);
        let right = recorded(&[5.0, 25.0]);
        left.absorb(&right);
        assert_eq!(left, recorded(&[10.0, 20.0, 5.0, 25.0]));
    }
}
