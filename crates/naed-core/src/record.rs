use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Dense, zero-filled counts: one entry per index of an [`AppRange`].
pub type DenseVector = Vec<f64>;

/// Half-open `[begin, end)` interval of reference identifiers valid for one
/// application.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppRange {
    pub begin: i64,
    pub end: i64,
}

impl AppRange {
    pub fn new(begin: i64, end: i64) -> Self {
        Self { begin, end }
    }

    /// Number of indices covered. An inverted range is empty.
    pub fn len(&self) -> usize {
        usize::try_from(self.end.saturating_sub(self.begin)).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn indices(&self) -> Range<i64> {
        self.begin..self.end
    }
}

/// One sparse observation: `count` hits at reference identifier `ref_id`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CountRecord {
    pub ref_id: i64,
    pub count: f64,
}

impl CountRecord {
    pub fn new(ref_id: i64, count: f64) -> Self {
        Self { ref_id, count }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_len() {
        assert_eq!(AppRange::new(0, 3).len(), 3);
        assert_eq!(AppRange::new(1000, 1012).len(), 12);
        assert!(AppRange::new(5, 5).is_empty());
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let r = AppRange::new(10, 2);
        assert_eq!(r.len(), 0);
        assert_eq!(r.indices().count(), 0);
    }

    #[test]
    fn test_extreme_range_does_not_overflow() {
        let r = AppRange::new(i64::MIN, i64::MAX);
        assert!(r.len() > 0);
    }
}
