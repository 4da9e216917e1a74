//! Sub-group expansion
//!
//! Turns one accepted match into its replacement text. Group rules are
//! applied highest capture index first. Each rule substitutes its capture
//! inside the growing replacement string, and a higher-index group never
//! sits to the left of a lower-index one it does not contain, so going
//! from the highest index down leaves the offsets of the groups still
//! pending untouched.
//!
//! Substitution rules:
//!
//! - labels and nested patterns replace the captured text at the group's
//!   offset from the match start, and only there;
//! - nested languages replace the first occurrence of the captured text
//!   anywhere in the replacement, regardless of where the group sits.
//!
//! If the captured text is no longer at its offset (an inner group already
//! rewrote it), or no longer anywhere for a nested language, the rule is
//! skipped.

use memchr::memmem;

use super::engine::Highlighter;
use super::error::Result;
use super::pattern::{GroupRule, Pattern};
use super::scanner::Match;
use super::scheduler::Scheduler;

impl<'r, S: Scheduler> Highlighter<'r, S> {
    /// Compose the replacement for an accepted match
    pub(crate) fn expand(
        &mut self,
        found: &Match<'_>,
        pattern: &Pattern,
        depth: usize,
    ) -> Result<String> {
        if !pattern.has_groups() {
            return Ok(match pattern.name() {
                Some(name) => self.markup.wrap(name, found.text()),
                None => found.text().to_string(),
            });
        }

        let mut replacement = found.text().to_string();

        for (index, rule) in pattern.groups() {
            let block = match found.group(*index) {
                Some(block) if !block.is_empty() => block,
                _ => continue,
            };
            let offset = found.group_start(*index).unwrap_or(0);

            match rule {
                GroupRule::Language(language) => {
                    let nested = self.highlight_at(block, language, depth + 1)?;
                    replace_first(&mut replacement, block, &nested);
                }
                GroupRule::Label(label) => {
                    let wrapped = self.markup.wrap(label, block);
                    replace_at(&mut replacement, offset, block, &wrapped);
                }
                GroupRule::Patterns { name, patterns } => {
                    let patterns: Vec<&Pattern> = patterns.iter().collect();
                    let mut nested = self.process(block, &patterns, depth + 1)?;
                    if let Some(name) = name {
                        nested = self.markup.wrap(name, &nested);
                    }
                    replace_at(&mut replacement, offset, block, &nested);
                }
            }
        }

        if let Some(name) = pattern.name() {
            replacement = self.markup.wrap(name, &replacement);
        }
        Ok(replacement)
    }
}

/// Replace the first `needle` anywhere in `haystack`
///
/// Returns whether a replacement happened. `needle` must not be empty.
pub(crate) fn replace_first(haystack: &mut String, needle: &str, with: &str) -> bool {
    // A valid UTF-8 needle can only match at a char boundary
    match memmem::find(haystack.as_bytes(), needle.as_bytes()) {
        Some(at) => {
            haystack.replace_range(at..at + needle.len(), with);
            true
        }
        None => false,
    }
}

/// Replace `needle` if `haystack` holds it exactly at byte `at`
///
/// Returns whether a replacement happened.
pub(crate) fn replace_at(haystack: &mut String, at: usize, needle: &str, with: &str) -> bool {
    let found = haystack
        .as_bytes()
        .get(at..)
        .is_some_and(|tail| tail.starts_with(needle.as_bytes()));
    if found {
        haystack.replace_range(at..at + needle.len(), with);
    }
    found
}
