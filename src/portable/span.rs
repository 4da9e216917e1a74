//! Half-open byte intervals over a level's source text
//!
//! Every accepted match claims a [`Span`]. The overlap resolver only ever
//! compares spans, so the predicates here define what "inside", "covers"
//! and "intersects" mean for the whole engine.

use std::fmt;
use std::ops::Range;

/// A half-open interval `[start, end)` of byte offsets
///
/// Spans produced by the scanner are never empty (`end > start`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(end > start, "span must not be empty: {}..{}", start, end);
        Self { start, end }
    }

    /// Length in bytes
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Spans are never empty, but clippy wants the pair
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// The span as a `Range` for slicing
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Whether `self` fully contains `other` (identical spans included)
    #[inline]
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && self.end >= other.end
    }

    /// Whether `self` fully contains `other` and the two are not identical
    ///
    /// This is the supersede test: a candidate that strictly covers an
    /// accepted span evicts it.
    #[inline]
    pub fn strictly_covers(&self, other: &Span) -> bool {
        self != other && self.contains(other)
    }

    /// Whether `other` starts inside `self`, or ends strictly inside it
    ///
    /// Asymmetric on purpose: `other` is the candidate, `self` the span
    /// already accepted. A candidate ending exactly at `self.end` while
    /// starting before `self.start` is a cover, not an intersection.
    #[inline]
    pub fn intersects(&self, other: &Span) -> bool {
        (other.start >= self.start && other.start < self.end)
            || (other.end > self.start && other.end < self.end)
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Span::new(range.start, range.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_len() {
        let span = Span::new(3, 10);
        assert_eq!(span.len(), 7);
        assert!(!span.is_empty());
        assert_eq!(span.range(), 3..10);
    }

    #[test]
    fn test_contains_includes_identical() {
        let a = Span::new(0, 10);
        assert!(a.contains(&Span::new(2, 5)));
        assert!(a.contains(&Span::new(0, 10)));
        assert!(!Span::new(2, 5).contains(&a));
    }

    #[test]
    fn test_strictly_covers() {
        let outer = Span::new(0, 20);
        assert!(outer.strictly_covers(&Span::new(5, 8)));
        assert!(outer.strictly_covers(&Span::new(0, 8)));
        assert!(!outer.strictly_covers(&Span::new(0, 20)));
        assert!(!outer.strictly_covers(&Span::new(15, 25)));
    }

    #[test]
    fn test_intersects_start_inside() {
        let accepted = Span::new(5, 10);
        assert!(accepted.intersects(&Span::new(5, 7)));
        assert!(accepted.intersects(&Span::new(9, 15)));
        assert!(!accepted.intersects(&Span::new(10, 15)));
    }

    #[test]
    fn test_intersects_end_inside() {
        let accepted = Span::new(5, 10);
        assert!(accepted.intersects(&Span::new(0, 6)));
        assert!(!accepted.intersects(&Span::new(0, 5)));
        // Ends exactly at the accepted end: a cover, not an intersection
        assert!(!accepted.intersects(&Span::new(0, 10)));
    }

    #[test]
    fn test_display() {
        assert_eq!(Span::new(2, 9).to_string(), "2..9");
    }
}
