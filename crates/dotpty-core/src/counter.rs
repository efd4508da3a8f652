//! Per-kind render counters.

use std::collections::HashMap;

/// Counts how many renders were issued for each graph kind.
///
/// Kinds are kept in the order they were first seen so the closing summary
/// lists them the way they appeared in the output.
#[derive(Debug, Clone, Default)]
pub struct KindCounter {
    counts: HashMap<String, usize>,
    order: Vec<String>,
}

impl KindCounter {
    /// Create an empty counter table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one more render of `kind` and return its 1-based sequence number.
    ///
    /// # Example
    /// ```
    /// use dotpty_core::KindCounter;
    ///
    /// let mut counter = KindCounter::new();
    /// assert_eq!(counter.increment("TaskGraph"), 1);
    /// assert_eq!(counter.increment("TaskGraph"), 2);
    /// assert_eq!(counter.increment("CommandGraph"), 1);
    /// ```
    pub fn increment(&mut self, kind: &str) -> usize {
        if !self.counts.contains_key(kind) {
            self.order.push(kind.to_string());
        }
        let count = self.counts.entry(kind.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    /// Number of renders issued for `kind` so far.
    pub fn get(&self, kind: &str) -> usize {
        self.counts.get(kind).copied().unwrap_or(0)
    }

    /// Whether nothing has been counted yet.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate `(kind, count)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.order
            .iter()
            .map(move |kind| (kind.as_str(), self.counts[kind.as_str()]))
    }
}
