//! Replacement compositing
//!
//! Once every pattern of a level has been scanned, the level's accepted
//! records are applied to its text in descending start order. The source
//! text stays immutable: each step emits the untouched gap to the right
//! of the record followed by the record's replacement, and the output is
//! assembled from the right. A record at a lower offset therefore never
//! sees a position shifted by a record applied before it.

use super::engine::{Highlighter, Level};
use super::error::Result;
use super::scheduler::{BatchCounter, Phase, Scheduler};

impl<'r, S: Scheduler> Highlighter<'r, S> {
    /// Apply a level's accepted records to its text, consuming the level
    pub(crate) fn composite(&mut self, level: Level<'_>) -> Result<String> {
        let Level {
            depth,
            source,
            resolver,
            ..
        } = level;

        if resolver.is_empty() {
            return Ok(source.to_string());
        }

        let records: Vec<_> = resolver.into_descending().collect();
        let mut pieces: Vec<&str> = Vec::with_capacity(records.len() * 2 + 1);
        let mut apply = BatchCounter::new(self.config.apply_batch);
        let mut cursor = source.len();

        for record in &records {
            debug_assert!(
                record.span.end <= cursor,
                "record {} overlaps an applied record",
                record.span
            );
            pieces.push(&source[record.span.end..cursor]);
            pieces.push(&record.annotated);
            cursor = record.span.start;

            self.stats.applied += 1;
            if let Some(steps) = apply.tick() {
                self.pause(Phase::Apply, depth, steps)?;
            }
        }
        pieces.push(&source[..cursor]);

        let total = pieces.iter().map(|piece| piece.len()).sum();
        let mut out = String::with_capacity(total);
        for piece in pieces.iter().rev() {
            out.push_str(piece);
        }
        Ok(out)
    }
}
