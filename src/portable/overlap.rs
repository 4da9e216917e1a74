//! Overlap resolution for one level
//!
//! Each level keeps the spans it has accepted so far, keyed by start
//! offset. A candidate is checked against them in ascending start order:
//!
//! - an accepted span that contains the candidate (or is identical to it)
//!   rejects it;
//! - an accepted span the candidate strictly covers is evicted on the spot,
//!   and checking continues;
//! - an accepted span the candidate only partially intersects rejects it.
//!
//! Evictions made before a later rejection stand. Because accepted spans
//! never partially intersect, start offsets are unique and only the
//! accepted span starting just before the candidate plus the spans
//! starting inside it can possibly touch it.

use std::collections::BTreeMap;

use super::span::Span;

/// Outcome of offering a candidate span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The candidate may be recorded
    Accepted {
        /// Accepted spans removed because the candidate covers them
        evicted: usize,
    },
    /// The candidate falls inside or across something already claimed
    Rejected {
        /// Spans evicted before the rejecting span was reached
        evicted: usize,
    },
}

impl Admission {
    /// Whether the candidate was accepted
    pub fn is_accepted(&self) -> bool {
        matches!(self, Admission::Accepted { .. })
    }

    /// Number of evicted spans
    pub fn evicted(&self) -> usize {
        match self {
            Admission::Accepted { evicted } | Admission::Rejected { evicted } => *evicted,
        }
    }
}

/// A match that survived overlap resolution, ready for compositing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedRecord {
    /// Interval of the original text it replaces
    pub span: Span,
    /// Fully composed replacement text
    pub annotated: String,
}

/// Accepted spans and their records for one level
#[derive(Debug, Default)]
pub struct OverlapResolver {
    records: BTreeMap<usize, AcceptedRecord>,
}

impl OverlapResolver {
    /// Empty resolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide whether `candidate` may be recorded, evicting covered spans
    pub fn admit(&mut self, candidate: Span) -> Admission {
        let mut evicted = 0;

        // The only span starting before the candidate that can reach into it
        if let Some((_, before)) = self.records.range(..candidate.start).next_back() {
            if before.span.intersects(&candidate) || before.span.contains(&candidate) {
                return Admission::Rejected { evicted };
            }
        }

        let inside: Vec<Span> = self
            .records
            .range(candidate.start..candidate.end)
            .map(|(_, record)| record.span)
            .collect();

        for existing in inside {
            if candidate.strictly_covers(&existing) {
                self.records.remove(&existing.start);
                evicted += 1;
                continue;
            }
            if existing.intersects(&candidate) {
                return Admission::Rejected { evicted };
            }
        }

        Admission::Accepted { evicted }
    }

    /// Store the record for an admitted span
    pub fn record(&mut self, span: Span, annotated: String) {
        debug_assert!(
            !self.records.contains_key(&span.start),
            "record at {} was not admitted",
            span.start
        );
        self.records.insert(span.start, AcceptedRecord { span, annotated });
    }

    /// Number of accepted records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been accepted
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Accepted spans in ascending order
    pub fn spans(&self) -> impl Iterator<Item = Span> + '_ {
        self.records.values().map(|record| record.span)
    }

    /// Consume the resolver, yielding records by descending start
    pub fn into_descending(self) -> impl Iterator<Item = AcceptedRecord> {
        self.records.into_values().rev()
    }
}
