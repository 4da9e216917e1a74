//! Language registry
//!
//! Maps language names to ordered pattern lists. Registration is additive:
//! registering more patterns for a language puts them *ahead* of the ones
//! already there, so a later registration takes priority. Every language
//! also picks up the patterns of [`DEFAULT_LANGUAGE`] after its own,
//! unless it was last registered with `bypass_defaults`.
//!
//! Pattern order is a contract. Structural rules (comments, strings)
//! registered early claim their spans first, and smaller rules that fall
//! inside them are rejected.
//!
//! A registry is only read while highlighting. The process-wide registry
//! behind [`register`] and [`highlight`] holds a read lock for the length
//! of a highlight call, so registration waits for in-flight calls.

use std::sync::{OnceLock, PoisonError, RwLock};

use ahash::RandomState;
use hashbrown::HashMap;

use super::engine::{HighlightConfig, Highlighter};
use super::error::Result;
use super::pattern::{Pattern, PatternDef};

/// Reserved name of the language whose patterns apply to every language
pub const DEFAULT_LANGUAGE: &str = "generic";

/// Patterns and defaults policy of one language
#[derive(Debug, Clone, Default)]
pub struct LanguageDefinition {
    patterns: Vec<Pattern>,
    bypass_defaults: bool,
}

impl LanguageDefinition {
    /// Registered patterns, highest priority first
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Whether default patterns are skipped for this language
    pub fn bypass_defaults(&self) -> bool {
        self.bypass_defaults
    }
}

/// Registry of language pattern tables
#[derive(Debug, Clone)]
pub struct LanguageRegistry {
    languages: HashMap<String, LanguageDefinition, RandomState>,
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            languages: HashMap::with_hasher(RandomState::new()),
        }
    }

    /// Merge `patterns` ahead of those already registered for `language`
    ///
    /// `bypass_defaults` overwrites the language's previous setting. It
    /// drops the default language from resolution but keeps the patterns
    /// earlier calls stored; use [`clear`](Self::clear) to start over.
    pub fn register(
        &mut self,
        language: impl Into<String>,
        patterns: Vec<Pattern>,
        bypass_defaults: bool,
    ) {
        let language = language.into();
        log_debug!(
            "register {} patterns for {:?} (bypass defaults: {})",
            patterns.len(),
            language,
            bypass_defaults
        );

        let definition = self.languages.entry(language).or_default();
        let mut merged = patterns;
        merged.append(&mut definition.patterns);
        definition.patterns = merged;
        definition.bypass_defaults = bypass_defaults;
    }

    /// Compile and register serialized patterns
    ///
    /// Nothing is registered if any pattern fails to compile.
    ///
    /// # Errors
    /// [`HighlightError::InvalidPattern`](super::error::HighlightError::InvalidPattern)
    /// for the first pattern that does not compile.
    pub fn register_defs(
        &mut self,
        language: impl Into<String>,
        defs: &[PatternDef],
        bypass_defaults: bool,
    ) -> Result<()> {
        let patterns = defs
            .iter()
            .map(Pattern::from_def)
            .collect::<Result<Vec<_>>>()?;
        self.register(language, patterns, bypass_defaults);
        Ok(())
    }

    /// Register a JSON array of pattern definitions
    ///
    /// # Errors
    /// [`HighlightError::InvalidDefinition`](super::error::HighlightError::InvalidDefinition)
    /// when the JSON does not describe a pattern list, or `InvalidPattern`
    /// when a pattern does not compile.
    pub fn register_json(
        &mut self,
        language: impl Into<String>,
        json: &str,
        bypass_defaults: bool,
    ) -> Result<()> {
        let defs: Vec<PatternDef> = serde_json::from_str(json)?;
        self.register_defs(language, &defs, bypass_defaults)
    }

    /// Effective pattern list for `language`, in scan order
    ///
    /// Unknown languages resolve to the default patterns alone.
    pub fn resolve(&self, language: &str) -> Vec<&Pattern> {
        let own = self.languages.get(language);
        let bypass = own.is_some_and(|definition| definition.bypass_defaults);

        let mut patterns: Vec<&Pattern> = own
            .map(|definition| definition.patterns.iter().collect())
            .unwrap_or_default();

        if !bypass && language != DEFAULT_LANGUAGE {
            if let Some(defaults) = self.languages.get(DEFAULT_LANGUAGE) {
                patterns.extend(defaults.patterns.iter());
            }
        }
        patterns
    }

    /// Definition registered for `language`, if any
    pub fn get(&self, language: &str) -> Option<&LanguageDefinition> {
        self.languages.get(language)
    }

    /// Whether `language` has been registered
    pub fn contains(&self, language: &str) -> bool {
        self.languages.contains_key(language)
    }

    /// Registered language names, sorted
    pub fn languages(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.languages.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered languages
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    /// Whether nothing has been registered
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Remove every language
    pub fn clear(&mut self) {
        self.languages.clear();
    }
}

// ============================================================================
// Global Registry Functions
// ============================================================================

/// Global registry shared by the free functions below
static GLOBAL_REGISTRY: OnceLock<RwLock<LanguageRegistry>> = OnceLock::new();

fn global_registry() -> &'static RwLock<LanguageRegistry> {
    GLOBAL_REGISTRY.get_or_init(|| RwLock::new(LanguageRegistry::new()))
}

/// Register patterns with the global registry
pub fn register(language: impl Into<String>, patterns: Vec<Pattern>, bypass_defaults: bool) {
    let mut guard = global_registry()
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    guard.register(language, patterns, bypass_defaults);
}

/// Register a JSON pattern list with the global registry
pub fn register_json(language: impl Into<String>, json: &str, bypass_defaults: bool) -> Result<()> {
    let mut guard = global_registry()
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    guard.register_json(language, json, bypass_defaults)
}

/// Highlight with the global registry and default configuration
pub fn highlight(text: &str, language: &str) -> Result<String> {
    highlight_with_config(text, language, HighlightConfig::default())
}

/// Highlight with the global registry and a custom configuration
pub fn highlight_with_config(
    text: &str,
    language: &str,
    config: HighlightConfig,
) -> Result<String> {
    let guard = global_registry()
        .read()
        .unwrap_or_else(PoisonError::into_inner);
    Highlighter::new(&guard).config(config).highlight(text, language)
}

/// Number of patterns `language` resolves to in the global registry
pub fn resolve_count(language: &str) -> usize {
    let guard = global_registry()
        .read()
        .unwrap_or_else(PoisonError::into_inner);
    guard.resolve(language).len()
}

/// Clear the global registry
///
/// # Warning
///
/// This is intended for testing purposes only.
pub fn clear_registry() {
    let mut guard = global_registry()
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    guard.clear();
}
