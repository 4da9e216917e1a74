//! Cooperative yield points
//!
//! Highlighting runs synchronously on the caller's thread. A host that
//! cannot afford to be monopolized (an event loop, a UI thread, a wasm
//! page) hands the engine a [`Scheduler`]; the engine calls
//! [`Scheduler::yield_now`] every `scan_batch` candidate matches and every
//! `apply_batch` record applications within a level. Scan and apply
//! progress live in the caller's stack frames, so nothing is lost across a
//! yield: the call simply returns and the pass continues.
//!
//! Returning an error from `yield_now` aborts the highlight call and the
//! error reaches the original caller unchanged.

use std::fmt;

use super::error::{HighlightError, Result};

/// Default number of candidate matches per level between scan yields
pub const DEFAULT_SCAN_BATCH: usize = 100;

/// Default number of applied records per level between apply yields
pub const DEFAULT_APPLY_BATCH: usize = 250;

/// Which pass of a level reached the yield point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Scanning patterns and resolving overlaps
    Scan,
    /// Compositing accepted records into the level's text
    Apply,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Scan => f.write_str("scan"),
            Phase::Apply => f.write_str("apply"),
        }
    }
}

/// Where a yield happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YieldPoint {
    /// Pass that reached the batch boundary
    pub phase: Phase,
    /// Depth of the level doing the work
    pub depth: usize,
    /// Steps completed so far in this pass of this level
    pub steps: usize,
}

/// Host hook invoked at every batch boundary
pub trait Scheduler {
    /// Hand control back to the host
    ///
    /// Return `Ok(())` to resume. Any error aborts the highlight call.
    fn yield_now(&mut self, point: YieldPoint) -> Result<()>;
}

/// Never yields
#[derive(Debug, Clone, Copy, Default)]
pub struct NoYield;

impl Scheduler for NoYield {
    #[inline]
    fn yield_now(&mut self, _point: YieldPoint) -> Result<()> {
        Ok(())
    }
}

/// Yields the OS thread at each batch boundary
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadYield;

impl Scheduler for ThreadYield {
    fn yield_now(&mut self, _point: YieldPoint) -> Result<()> {
        std::thread::yield_now();
        Ok(())
    }
}

impl<F> Scheduler for F
where
    F: FnMut(YieldPoint) -> Result<()>,
{
    #[inline]
    fn yield_now(&mut self, point: YieldPoint) -> Result<()> {
        self(point)
    }
}

/// Counts steps of one pass and reports batch boundaries
#[derive(Debug, Clone, Copy)]
pub(crate) struct BatchCounter {
    every: usize,
    steps: usize,
}

impl BatchCounter {
    /// A counter firing every `every` steps; 0 never fires
    pub(crate) fn new(every: usize) -> Self {
        Self { every, steps: 0 }
    }

    /// Record one step, returning the step count if a boundary was reached
    #[inline]
    pub(crate) fn tick(&mut self) -> Option<usize> {
        self.steps += 1;
        if self.every > 0 && self.steps % self.every == 0 {
            Some(self.steps)
        } else {
            None
        }
    }

    #[cfg_attr(not(feature = "logging"), allow(dead_code))]
    pub(crate) fn steps(&self) -> usize {
        self.steps
    }
}

/// Convenience for schedulers that want to refuse with a message
pub fn reject(point: YieldPoint, reason: impl Into<String>) -> HighlightError {
    HighlightError::YieldRejected {
        phase: point.phase,
        depth: point.depth,
        reason: reason.into(),
    }
}
