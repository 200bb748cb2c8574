//! Collatz sequence generation
//!
//!   f(v) = v / 2     if v is even
//!          3v + 1    if v is odd

use crate::config::PathsConfig;
use serde::Serialize;

/// Apply the Collatz map once. `None` when `3v + 1` does not fit in a `u64`.
pub fn collatz_step(value: u64) -> Option<u64> {
    if value & 1 == 0 {
        Some(value / 2)
    } else {
        value.checked_mul(3)?.checked_add(1)
    }
}

/// Trajectory of one starting value. Never empty; the first element is the start.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Sequence {
    values: Vec<u64>,
}

impl Sequence {
    /// Follow `start` for up to `max_iterations` steps. With `stop_at_one` the
    /// sequence ends at its first 1, so a start of 1 yields `[1]`.
    pub fn compute(start: u64, max_iterations: i64, stop_at_one: bool) -> Self {
        let steps = max_iterations.max(0) as usize;
        let mut values = Vec::with_capacity(steps.min(1024) + 1);
        values.push(start);

        let mut value = start;
        for _ in 0..steps {
            if stop_at_one && value == 1 {
                break;
            }

            value = match collatz_step(value) {
                Some(next) => next,
                None => {
                    log::warn!(
                        "sequence for {} exceeds u64 at {}, truncated after {} values",
                        start,
                        value,
                        values.len()
                    );
                    break;
                }
            };
            values.push(value);
        }

        Self { values }
    }

    pub fn start(&self) -> u64 {
        self.values[0]
    }

    pub fn values(&self) -> &[u64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

/// One sequence per starting value, in ascending order of start
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SequenceCollection {
    sequences: Vec<Sequence>,
}

impl SequenceCollection {
    pub fn iter(&self) -> std::slice::Iter<'_, Sequence> {
        self.sequences.iter()
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Length of the longest sequence (0 when empty)
    pub fn longest(&self) -> usize {
        self.sequences.iter().map(Sequence::len).max().unwrap_or(0)
    }
}

impl<'a> IntoIterator for &'a SequenceCollection {
    type Item = &'a Sequence;
    type IntoIter = std::slice::Iter<'a, Sequence>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Compute the sequence of every starting value in the configured range
pub fn generate(config: &PathsConfig) -> SequenceCollection {
    // Zero is not a valid start: its trajectory is 0, 0, 0, ...
    let bounds = config.range.bounds(config.start);
    let first = (*bounds.start()).max(1);

    let sequences = (first..=*bounds.end())
        .filter(|n| !config.odd_only || n & 1 == 1)
        .map(|n| Sequence::compute(n, config.max_iterations, config.stop_at_one))
        .collect();

    SequenceCollection { sequences }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Range;
    use proptest::prelude::*;

    fn config(start: u64, stop: u64, max_iterations: i64) -> PathsConfig {
        PathsConfig {
            start,
            range: Range::Stop(stop),
            max_iterations,
            stop_at_one: true,
            odd_only: false,
            ..PathsConfig::default()
        }
    }

    fn values(collection: &SequenceCollection) -> Vec<Vec<u64>> {
        collection.iter().map(|s| s.values().to_vec()).collect()
    }

    #[test]
    fn step_halves_even_values() {
        assert_eq!(collatz_step(10), Some(5));
        assert_eq!(collatz_step(2), Some(1));
    }

    #[test]
    fn step_triples_odd_values() {
        assert_eq!(collatz_step(3), Some(10));
        assert_eq!(collatz_step(1), Some(4));
    }

    #[test]
    fn step_reports_overflow() {
        assert_eq!(collatz_step(u64::MAX), None);
        assert_eq!(collatz_step(u64::MAX - 1), Some(u64::MAX / 2));
    }

    #[test]
    fn first_five_stop_at_one() {
        let collection = generate(&config(1, 5, 100));
        assert_eq!(
            values(&collection),
            vec![
                vec![1],
                vec![2, 1],
                vec![3, 10, 5, 16, 8, 4, 2, 1],
                vec![4, 2, 1],
                vec![5, 16, 8, 4, 2, 1],
            ]
        );
    }

    #[test]
    fn without_stop_runs_every_iteration() {
        let sequence = Sequence::compute(1, 6, false);
        assert_eq!(sequence.values(), &[1, 4, 2, 1, 4, 2, 1]);
    }

    #[test]
    fn non_positive_iterations_give_single_values() {
        assert_eq!(Sequence::compute(7, 0, true).values(), &[7]);
        assert_eq!(Sequence::compute(7, -3, false).values(), &[7]);
    }

    #[test]
    fn odd_only_skips_even_starts() {
        let mut cfg = config(1, 9, 50);
        cfg.odd_only = true;
        let starts: Vec<u64> = generate(&cfg).iter().map(Sequence::start).collect();
        assert_eq!(starts, vec![1, 3, 5, 7, 9]);
    }

    #[test]
    fn count_range_is_half_open() {
        let mut cfg = config(4, 0, 50);
        cfg.range = Range::Count(3);
        let starts: Vec<u64> = generate(&cfg).iter().map(Sequence::start).collect();
        assert_eq!(starts, vec![4, 5, 6]);
    }

    #[test]
    fn start_after_stop_is_empty() {
        assert!(generate(&config(6, 5, 10)).is_empty());
    }

    #[test]
    fn single_value_range() {
        assert_eq!(generate(&config(6, 6, 10)).len(), 1);

        let mut cfg = config(6, 6, 10);
        cfg.odd_only = true;
        assert!(generate(&cfg).is_empty());
    }

    #[test]
    fn single_start_at_u64_max() {
        let mut cfg = config(u64::MAX, u64::MAX, 5);
        cfg.odd_only = false;
        let collection = generate(&cfg);
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.iter().next().map(Sequence::start), Some(u64::MAX));
    }

    #[test]
    fn overflow_truncates_the_sequence() {
        assert_eq!(Sequence::compute(u64::MAX, 5, false).values(), &[u64::MAX]);
        // Halving is fine, the odd step after it is not
        let start = u64::MAX - 1;
        assert_eq!(Sequence::compute(start, 5, false).values(), &[start, u64::MAX / 2]);
    }

    #[test]
    fn zero_start_is_skipped() {
        let starts: Vec<u64> = generate(&config(0, 2, 10)).iter().map(Sequence::start).collect();
        assert_eq!(starts, vec![1, 2]);
    }

    #[test]
    fn longest_sequence_length() {
        assert_eq!(generate(&config(1, 5, 100)).longest(), 8);
        assert_eq!(SequenceCollection::default().longest(), 0);
    }

    #[test]
    fn serializes_as_nested_arrays() {
        let json = serde_json::to_string(&generate(&config(1, 2, 10))).unwrap();
        assert_eq!(json, "[[1],[2,1]]");
    }

    proptest! {
        #[test]
        fn starts_with_its_seed(n in 1u64..1_000_000, k in 0i64..300) {
            prop_assert_eq!(Sequence::compute(n, k, true).start(), n);
        }

        #[test]
        fn each_value_follows_the_map(n in 1u64..1_000_000, k in 0i64..300, stop in any::<bool>()) {
            let seq = Sequence::compute(n, k, stop);
            prop_assert!(seq.values().iter().all(|&v| v >= 1));
            for pair in seq.values().windows(2) {
                let expected = if pair[0] % 2 == 0 { pair[0] / 2 } else { 3 * pair[0] + 1 };
                prop_assert_eq!(pair[1], expected);
            }
        }

        #[test]
        fn stop_at_one_ends_at_first_one(n in 1u64..100_000) {
            let seq = Sequence::compute(n, 2_000, true);
            let first_one = seq.values().iter().position(|&v| v == 1);
            prop_assert_eq!(first_one, Some(seq.len() - 1));
        }

        #[test]
        fn without_stop_length_is_iterations_plus_one(n in 1u64..100_000, k in 0i64..500) {
            prop_assert_eq!(Sequence::compute(n, k, false).len(), k as usize + 1);
        }

        #[test]
        fn odd_only_covers_every_odd_start(start in 1u64..500, span in 0u64..200) {
            let mut cfg = config(start, start + span, 20);
            cfg.odd_only = true;
            let starts: Vec<u64> = generate(&cfg).iter().map(Sequence::start).collect();
            let expected: Vec<u64> = (start..=start + span).filter(|n| n % 2 == 1).collect();
            prop_assert_eq!(starts, expected);
        }

        #[test]
        fn generation_is_deterministic(start in 1u64..200, span in 0u64..50) {
            let cfg = config(start, start + span, 200);
            prop_assert_eq!(generate(&cfg), generate(&cfg));
        }
    }
}
