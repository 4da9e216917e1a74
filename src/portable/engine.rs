//! Highlighting entry point and level lifecycle
//!
//! [`Highlighter::highlight`] is the routine everything funnels through:
//!
//! 1. resolve the pattern list for the language,
//! 2. open a fresh [`Level`] at the current depth,
//! 3. scan every pattern, in order, against the level's original text and
//!    offer each match to the level's overlap resolver,
//! 4. expand accepted matches (which may re-enter this routine one level
//!    deeper for embedded languages and nested patterns),
//! 5. composite the accepted records into the level's text and drop the
//!    level.
//!
//! A level is a plain value owned by the stack frame that processes it and
//! the depth travels as an argument, so nothing about one call is visible
//! to another. Two highlighters sharing a registry never interfere.

use super::error::{HighlightError, Result};
use super::markup::{Markup, DEFAULT_TAG};
use super::overlap::OverlapResolver;
use super::pattern::Pattern;
use super::registry::LanguageRegistry;
use super::scanner::MatchScanner;
use super::scheduler::{
    BatchCounter, NoYield, Phase, Scheduler, YieldPoint, DEFAULT_APPLY_BATCH, DEFAULT_SCAN_BATCH,
};

/// Default maximum level depth
///
/// Legitimate embedding rarely goes past three or four levels (a script
/// inside markup inside a template); anything near this limit is a
/// language table that embeds itself.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Configuration options for highlighting
///
/// # Example
///
/// ```rust
/// use hilite::portable::engine::HighlightConfig;
///
/// let config = HighlightConfig::new()
///     .with_scan_batch(500)
///     .with_max_depth(8)
///     .with_global_class("rainbow");
/// assert_eq!(config.apply_batch, 250);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightConfig {
    /// Candidate matches per level between scan yields (0 = never yield)
    pub scan_batch: usize,

    /// Record applications per level between apply yields (0 = never yield)
    pub apply_batch: usize,

    /// Deepest level allowed before failing with `RecursionLimitExceeded`
    pub max_depth: usize,

    /// Element name used to wrap labeled spans
    pub tag: String,

    /// Class appended to every wrapped span
    pub global_class: Option<String>,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            scan_batch: DEFAULT_SCAN_BATCH,
            apply_batch: DEFAULT_APPLY_BATCH,
            max_depth: DEFAULT_MAX_DEPTH,
            tag: DEFAULT_TAG.to_string(),
            global_class: None,
        }
    }
}

impl HighlightConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scan batch size
    pub fn with_scan_batch(mut self, batch: usize) -> Self {
        self.scan_batch = batch;
        self
    }

    /// Set the apply batch size
    pub fn with_apply_batch(mut self, batch: usize) -> Self {
        self.apply_batch = batch;
        self
    }

    /// Set the maximum level depth
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set the wrapping element name
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Set a class appended to every wrap
    pub fn with_global_class(mut self, class: impl Into<String>) -> Self {
        self.global_class = Some(class.into());
        self
    }

    fn markup(&self) -> Markup {
        Markup::new(self.tag.clone(), self.global_class.clone())
    }
}

/// Counters accumulated by a [`Highlighter`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighlightStats {
    /// Levels entered, top level included
    pub levels: usize,
    /// Deepest level entered
    pub deepest: usize,
    /// Candidate matches examined
    pub candidates: usize,
    /// Candidates admitted by overlap resolution
    pub accepted: usize,
    /// Candidates rejected by overlap resolution
    pub rejected: usize,
    /// Previously accepted records superseded by broader matches
    pub evicted: usize,
    /// Records composited into level text
    pub applied: usize,
    /// Scheduler yields
    pub yields: usize,
}

/// Scratch space of one nesting depth
pub(crate) struct Level<'t> {
    pub(crate) depth: usize,
    pub(crate) source: &'t str,
    pub(crate) resolver: OverlapResolver,
    scan: BatchCounter,
}

impl<'t> Level<'t> {
    fn new(depth: usize, source: &'t str, scan_batch: usize) -> Self {
        Self {
            depth,
            source,
            resolver: OverlapResolver::new(),
            scan: BatchCounter::new(scan_batch),
        }
    }
}

/// Highlights text against a [`LanguageRegistry`]
///
/// The registry is only read. A highlighter is cheap to build; make one per
/// host task if each needs its own scheduler.
///
/// # Example
///
/// ```rust
/// use hilite::portable::{Highlighter, LanguageRegistry, Pattern};
///
/// let mut registry = LanguageRegistry::new();
/// registry.register(
///     "calc",
///     vec![Pattern::new(r"\d+").unwrap().named("integer")],
///     false,
/// );
///
/// let mut highlighter = Highlighter::new(&registry);
/// let out = highlighter.highlight("1 + 2", "calc").unwrap();
/// assert_eq!(
///     out,
///     r#"<span class="integer">1</span> + <span class="integer">2</span>"#
/// );
/// ```
pub struct Highlighter<'r, S = NoYield> {
    registry: &'r LanguageRegistry,
    pub(crate) config: HighlightConfig,
    pub(crate) markup: Markup,
    scheduler: S,
    pub(crate) stats: HighlightStats,
}

impl<'r> Highlighter<'r, NoYield> {
    /// Highlighter that never yields
    pub fn new(registry: &'r LanguageRegistry) -> Self {
        Self::with_scheduler(registry, NoYield)
    }
}

impl<'r, S: Scheduler> Highlighter<'r, S> {
    /// Highlighter that hands control to `scheduler` at batch boundaries
    pub fn with_scheduler(registry: &'r LanguageRegistry, scheduler: S) -> Self {
        let config = HighlightConfig::default();
        Self {
            registry,
            markup: config.markup(),
            config,
            scheduler,
            stats: HighlightStats::default(),
        }
    }

    /// Replace the configuration
    pub fn config(mut self, config: HighlightConfig) -> Self {
        self.markup = config.markup();
        self.config = config;
        self
    }

    /// Current configuration
    pub fn current_config(&self) -> &HighlightConfig {
        &self.config
    }

    /// Counters accumulated since creation or the last reset
    pub fn stats(&self) -> HighlightStats {
        self.stats
    }

    /// Zero the counters
    pub fn reset_stats(&mut self) {
        self.stats = HighlightStats::default();
    }

    /// The scheduler
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Give the scheduler back
    pub fn into_scheduler(self) -> S {
        self.scheduler
    }

    /// Annotate `text` as `language`
    ///
    /// Unknown languages fall back to the default pattern set. The input is
    /// never modified; text no pattern matches comes back byte-for-byte.
    ///
    /// # Errors
    /// - [`HighlightError::RecursionLimitExceeded`] when embedded content
    ///   nests deeper than `max_depth`
    /// - whatever the scheduler returns from a refused yield
    pub fn highlight(&mut self, text: &str, language: &str) -> Result<String> {
        self.highlight_at(text, language, 0)
    }

    /// Annotate `text` with an explicit pattern list instead of a language
    pub fn highlight_with(&mut self, text: &str, patterns: &[&Pattern]) -> Result<String> {
        self.process(text, patterns, 0)
    }

    pub(crate) fn highlight_at(
        &mut self,
        text: &str,
        language: &str,
        depth: usize,
    ) -> Result<String> {
        let registry = self.registry;
        let patterns = registry.resolve(language);
        log_debug!(
            "highlight {:?} at depth {} with {} patterns",
            language,
            depth,
            patterns.len()
        );
        self.process(text, &patterns, depth)
    }

    /// Run one level: scan every pattern, then composite
    pub(crate) fn process(
        &mut self,
        text: &str,
        patterns: &[&Pattern],
        depth: usize,
    ) -> Result<String> {
        if depth > self.config.max_depth {
            log_debug!("depth {} exceeds max {}", depth, self.config.max_depth);
            return Err(HighlightError::RecursionLimitExceeded {
                depth,
                max_depth: self.config.max_depth,
            });
        }

        self.stats.levels += 1;
        self.stats.deepest = self.stats.deepest.max(depth);

        let mut level = Level::new(depth, text, self.config.scan_batch);
        for pattern in patterns {
            self.scan_pattern(&mut level, pattern)?;
        }

        log_trace!(
            "level {} scanned {} candidates, {} records",
            depth,
            level.scan.steps(),
            level.resolver.len()
        );
        let out = self.composite(level);
        log_debug!("leave level {}", depth);
        out
    }

    fn scan_pattern(&mut self, level: &mut Level<'_>, pattern: &Pattern) -> Result<()> {
        for found in MatchScanner::new(pattern.regex(), level.source) {
            self.stats.candidates += 1;

            let span = found.span();
            let admission = level.resolver.admit(span);
            if admission.evicted() > 0 {
                log_trace!(
                    "{} evicted {} records at depth {}",
                    span,
                    admission.evicted(),
                    level.depth
                );
                self.stats.evicted += admission.evicted();
            }

            if admission.is_accepted() {
                let annotated = self.expand(&found, pattern, level.depth)?;
                level.resolver.record(span, annotated);
                self.stats.accepted += 1;
            } else {
                self.stats.rejected += 1;
            }

            if let Some(steps) = level.scan.tick() {
                self.pause(Phase::Scan, level.depth, steps)?;
            }
        }
        Ok(())
    }

    /// Hand control to the scheduler
    pub(crate) fn pause(&mut self, phase: Phase, depth: usize, steps: usize) -> Result<()> {
        self.stats.yields += 1;
        log_trace!("yield during {} at depth {} after {} steps", phase, depth, steps);
        self.scheduler.yield_now(YieldPoint {
            phase,
            depth,
            steps,
        })
    }
}
