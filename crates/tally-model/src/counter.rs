//! Frequency counter over observed field values.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A frequency table over the values observed for one aliased field,
/// restricted to admitted rows.
///
/// Keys are case-normalized (lowercased) on entry and on lookup, so a
/// caller may query with the upper-cased display form a report renders.
/// Counts are only ever incremented; the counter lives for one tally run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValueCounter {
    counts: BTreeMap<String, u64>,
}

impl ValueCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one occurrence of `value`.
    pub fn record(&mut self, value: &str) {
        *self.counts.entry(value.to_lowercase()).or_insert(0) += 1;
    }

    /// Occurrence count for `value`, 0 when never observed.
    pub fn get(&self, value: &str) -> u64 {
        self.counts.get(&value.to_lowercase()).copied().unwrap_or(0)
    }

    /// Sum of all occurrence counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct observed values.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterates over (value, count) pairs in value order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(value, count)| (value.as_str(), *count))
    }

    /// Fraction of the total held by `value` (0.0 for an empty counter).
    pub fn fraction(&self, value: &str) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.get(value) as f64 / total as f64
    }

    /// Percentage-of-total label for `value`, one decimal place and a
    /// trailing `%` sign, e.g. `60.0%`.
    pub fn percent_label(&self, value: &str) -> String {
        format!("{:.1}%", 100.0 * self.fraction(value))
    }

    /// The `n` highest-count entries, ranked descending by count with
    /// ties broken by ascending value.
    pub fn top_n(&self, n: usize) -> Vec<(String, u64)> {
        let mut entries: Vec<(String, u64)> = self
            .counts
            .iter()
            .map(|(value, count)| (value.clone(), *count))
            .collect();
        entries.sort_by(|a, b| (Reverse(a.1), &a.0).cmp(&(Reverse(b.1), &b.0)));
        entries.truncate(n);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter_from(values: &[&str]) -> ValueCounter {
        let mut counter = ValueCounter::new();
        for value in values {
            counter.record(value);
        }
        counter
    }

    #[test]
    fn test_record_and_get_case_normalized() {
        let counter = counter_from(&["nurse", "Nurse", "welder"]);
        assert_eq!(counter.get("nurse"), 2);
        assert_eq!(counter.get("NURSE"), 2);
        assert_eq!(counter.get("welder"), 1);
        assert_eq!(counter.get("absent"), 0);
        assert_eq!(counter.total(), 3);
        assert_eq!(counter.len(), 2);
    }

    #[test]
    fn test_top_n_ranks_by_count_then_name() {
        let counter = counter_from(&["welder", "welder", "welder", "nurse", "nurse", "baker"]);
        let top = counter.top_n(2);
        assert_eq!(
            top,
            vec![("welder".to_string(), 3), ("nurse".to_string(), 2)]
        );

        // Ties break by ascending value.
        let counter = counter_from(&["zebra", "apple"]);
        let top = counter.top_n(10);
        assert_eq!(
            top,
            vec![("apple".to_string(), 1), ("zebra".to_string(), 1)]
        );
    }

    #[test]
    fn test_top_n_is_total_order() {
        let counter = counter_from(&["a", "a", "b", "b", "c"]);
        let top = counter.top_n(10);
        for pair in top.windows(2) {
            let first = (Reverse(pair[0].1), &pair[0].0);
            let second = (Reverse(pair[1].1), &pair[1].0);
            assert!(first < second);
        }
    }

    #[test]
    fn test_fraction_and_percent_label() {
        let counter = counter_from(&["welder", "welder", "welder", "nurse", "nurse"]);
        assert_eq!(counter.fraction("welder"), 0.6);
        assert_eq!(counter.percent_label("WELDER"), "60.0%");
        assert_eq!(counter.percent_label("nurse"), "40.0%");
    }

    #[test]
    fn test_percentages_sum_to_one_hundred() {
        let counter = counter_from(&["a", "a", "a", "b", "b", "c", "d", "d", "d", "d"]);
        let sum: f64 = counter
            .iter()
            .map(|(value, _)| 100.0 * counter.fraction(value))
            .sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_counter() {
        let counter = ValueCounter::new();
        assert!(counter.is_empty());
        assert_eq!(counter.total(), 0);
        assert_eq!(counter.fraction("anything"), 0.0);
        assert!(counter.top_n(5).is_empty());
    }
}
