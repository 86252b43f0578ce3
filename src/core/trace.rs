//! Iteration history.

use std::ops::Index;
use std::slice;

/// Ordered, append-only history of iteration records.
///
/// Each run of a method builds a fresh trace; its order is the iteration
/// order. The length is bounded only by the maximum number of iterations.
/// Presenters typically show a short suffix, see [`Trace::tail`].
#[derive(Debug, Clone, PartialEq)]
pub struct Trace<R> {
    records: Vec<R>,
}

impl<R> Trace<R> {
    /// Creates an empty trace.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Creates an empty trace with room for `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    /// Appends a record.
    pub fn push(&mut self, record: R) {
        self.records.push(record);
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Determines whether there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The most recent record.
    pub fn last(&self) -> Option<&R> {
        self.records.last()
    }

    /// At most `n` most recent records, oldest first.
    pub fn tail(&self, n: usize) -> &[R] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }

    /// Iterates over records in iteration order.
    pub fn iter(&self) -> slice::Iter<'_, R> {
        self.records.iter()
    }

    /// All records as a slice.
    pub fn as_slice(&self) -> &[R] {
        &self.records
    }

    /// Unpacks the records.
    pub fn into_vec(self) -> Vec<R> {
        self.records
    }
}

impl<R> Default for Trace<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Index<usize> for Trace<R> {
    type Output = R;

    fn index(&self, index: usize) -> &Self::Output {
        &self.records[index]
    }
}

impl<R> IntoIterator for Trace<R> {
    type Item = R;
    type IntoIter = std::vec::IntoIter<R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a, R> IntoIterator for &'a Trace<R> {
    type Item = &'a R;
    type IntoIter = slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl<R> FromIterator<R> for Trace<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tail_is_bounded_suffix() {
        let trace: Trace<usize> = (1..=25).collect();

        assert_eq!(trace.tail(10), &[16, 17, 18, 19, 20, 21, 22, 23, 24, 25]);
        assert_eq!(trace.tail(100).len(), 25);
        assert!(trace.tail(0).is_empty());
    }

    #[test]
    fn order_is_insertion_order() {
        let mut trace = Trace::new();
        trace.push('a');
        trace.push('b');
        trace.push('c');

        assert_eq!(trace.len(), 3);
        assert_eq!(trace[0], 'a');
        assert_eq!(trace.last(), Some(&'c'));
        assert_eq!(trace.into_vec(), vec!['a', 'b', 'c']);
    }

    #[test]
    fn empty() {
        let trace: Trace<u8> = Trace::default();
        assert!(trace.is_empty());
        assert_eq!(trace.last(), None);
        assert!(trace.tail(10).is_empty());
    }
}
