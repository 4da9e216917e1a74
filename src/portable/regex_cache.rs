//! Per-thread cache of compiled expressions
//!
//! Language tables repeat expressions (identifier and string rules shared
//! by several languages) and a host may re-register a language whenever it
//! extends it. Compiled expressions are kept per thread and handed out as
//! clones; a `Regex` clone shares the compiled program.
//!
//! The cache holds at most [`MAX_CACHED_EXPRESSIONS`] entries. When it is
//! full it is emptied before the next insert, which keeps a host that
//! registers generated tables in a loop from growing it without bound.

use std::cell::RefCell;

use ahash::RandomState;
use hashbrown::HashMap;
use regex::Regex;

use super::error::{HighlightError, Result};

/// Entries kept per thread before the cache is emptied
pub const MAX_CACHED_EXPRESSIONS: usize = 1024;

#[derive(Default)]
struct ExpressionCache {
    compiled: HashMap<String, Regex, RandomState>,
    stats: CacheStats,
}

thread_local! {
    static EXPRESSIONS: RefCell<ExpressionCache> = RefCell::new(ExpressionCache::default());
}

/// Lookup counters for the current thread's cache
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups served from the cache
    pub hits: u64,
    /// Lookups that compiled the expression
    pub misses: u64,
    /// Times the cache was emptied for being full
    pub flushes: u64,
}

/// Compiled form of `expression`, from the cache when possible
///
/// # Errors
/// [`HighlightError::InvalidPattern`] when the expression does not compile.
/// Failures are not cached.
pub fn get_or_compile(expression: &str) -> Result<Regex> {
    EXPRESSIONS.with(|cell| {
        let mut cache = cell.borrow_mut();
        if let Some(regex) = cache.compiled.get(expression).cloned() {
            cache.stats.hits += 1;
            return Ok(regex);
        }

        cache.stats.misses += 1;
        let regex = Regex::new(expression)
            .map_err(|err| HighlightError::invalid_pattern(expression, err.to_string()))?;

        if cache.compiled.len() >= MAX_CACHED_EXPRESSIONS {
            log_debug!("expression cache full, flushing {} entries", cache.compiled.len());
            cache.compiled.clear();
            cache.stats.flushes += 1;
        }
        cache.compiled.insert(expression.to_string(), regex.clone());
        Ok(regex)
    })
}

/// Empty the current thread's cache and reset its counters
pub fn clear_cache() {
    EXPRESSIONS.with(|cell| *cell.borrow_mut() = ExpressionCache::default());
}

/// Number of expressions cached on the current thread
pub fn cache_size() -> usize {
    EXPRESSIONS.with(|cell| cell.borrow().compiled.len())
}

/// Counters for the current thread's cache
pub fn stats() -> CacheStats {
    EXPRESSIONS.with(|cell| cell.borrow().stats)
}
