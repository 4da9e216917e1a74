//! Batch highlighting support
//!
//! Highlights many independent `(text, language)` jobs against one shared
//! registry. Every job gets its own [`Highlighter`], so jobs share nothing
//! but read access to the registry.
//!
//! # Feature Flag
//!
//! Jobs run on rayon's pool when the `parallel` feature is enabled and
//! sequentially otherwise. The API is the same either way:
//!
//! ```toml
//! [dependencies]
//! hilite = { version = "0.1", features = ["parallel"] }
//! ```
//!
//! # Example
//!
//! ```rust
//! use hilite::portable::{parallel::highlight_batch, HighlightConfig, LanguageRegistry, Pattern};
//!
//! let mut registry = LanguageRegistry::new();
//! registry.register("num", vec![Pattern::new(r"\d+").unwrap().named("n")], false);
//!
//! let jobs = [("1 a", "num"), ("b 2", "num")];
//! let results = highlight_batch(&registry, &jobs, &HighlightConfig::default());
//!
//! // Results are in the same order as jobs
//! assert_eq!(results[0].as_deref().unwrap(), r#"<span class="n">1</span> a"#);
//! assert_eq!(results[1].as_deref().unwrap(), r#"b <span class="n">2</span>"#);
//! ```

use super::engine::{HighlightConfig, Highlighter};
use super::error::Result;
use super::registry::LanguageRegistry;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

fn highlight_one(
    registry: &LanguageRegistry,
    text: &str,
    language: &str,
    config: &HighlightConfig,
) -> Result<String> {
    Highlighter::new(registry)
        .config(config.clone())
        .highlight(text, language)
}

/// Highlight many `(text, language)` jobs
///
/// # Returns
/// One result per job, in job order. A failing job does not affect the
/// others.
#[cfg(feature = "rayon")]
pub fn highlight_batch(
    registry: &LanguageRegistry,
    jobs: &[(&str, &str)],
    config: &HighlightConfig,
) -> Vec<Result<String>> {
    highlight_batch_with(registry, jobs, config, &ParallelConfig::default())
}

/// Highlight many jobs sequentially (fallback when rayon is not available)
#[cfg(not(feature = "rayon"))]
pub fn highlight_batch(
    registry: &LanguageRegistry,
    jobs: &[(&str, &str)],
    config: &HighlightConfig,
) -> Vec<Result<String>> {
    jobs.iter()
        .map(|(text, language)| highlight_one(registry, text, language, config))
        .collect()
}

/// Highlight many jobs with explicit pool settings
///
/// A dedicated pool is built when `parallel.num_threads` is set. If it
/// cannot be built the global pool is used instead.
#[cfg(feature = "rayon")]
pub fn highlight_batch_with(
    registry: &LanguageRegistry,
    jobs: &[(&str, &str)],
    config: &HighlightConfig,
    parallel: &ParallelConfig,
) -> Vec<Result<String>> {
    let run = || -> Vec<Result<String>> {
        jobs.par_iter()
            .with_min_len(parallel.min_chunk_size.max(1))
            .map(|(text, language)| highlight_one(registry, text, language, config))
            .collect()
    };

    match parallel.num_threads {
        Some(threads) => match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
            Ok(pool) => pool.install(run),
            Err(_err) => {
                log_debug!("falling back to the global pool: {}", _err);
                run()
            }
        },
        None => run(),
    }
}

/// Highlight many jobs sequentially, ignoring pool settings
#[cfg(not(feature = "rayon"))]
pub fn highlight_batch_with(
    registry: &LanguageRegistry,
    jobs: &[(&str, &str)],
    config: &HighlightConfig,
    _parallel: &ParallelConfig,
) -> Vec<Result<String>> {
    highlight_batch(registry, jobs, config)
}

/// Highlight many owned `(text, language)` jobs
///
/// Useful when the texts were read from files into `String`s.
#[cfg(feature = "rayon")]
pub fn highlight_batch_owned(
    registry: &LanguageRegistry,
    jobs: Vec<(String, String)>,
    config: &HighlightConfig,
) -> Vec<Result<String>> {
    jobs.into_par_iter()
        .map(|(text, language)| highlight_one(registry, &text, &language, config))
        .collect()
}

/// Highlight many owned jobs sequentially (fallback)
#[cfg(not(feature = "rayon"))]
pub fn highlight_batch_owned(
    registry: &LanguageRegistry,
    jobs: Vec<(String, String)>,
    config: &HighlightConfig,
) -> Vec<Result<String>> {
    jobs.into_iter()
        .map(|(text, language)| highlight_one(registry, &text, &language, config))
        .collect()
}

/// Configuration for batch highlighting
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Number of threads to use (None = rayon's global pool)
    pub num_threads: Option<usize>,
    /// Minimum jobs handed to one worker at a time
    pub min_chunk_size: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            num_threads: None,
            min_chunk_size: 1,
        }
    }
}

impl ParallelConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of threads to use
    pub fn with_num_threads(mut self, n: usize) -> Self {
        self.num_threads = Some(n);
        self
    }

    /// Set the minimum chunk size
    pub fn with_min_chunk_size(mut self, size: usize) -> Self {
        self.min_chunk_size = size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portable::error::HighlightError;
    use crate::portable::pattern::{GroupRule, Pattern};

    fn registry() -> LanguageRegistry {
        let mut registry = LanguageRegistry::new();
        registry.register("num", vec![Pattern::new(r"\d+").unwrap().named("n")], false);
        registry.register(
            "loop",
            vec![Pattern::new(r"(.+)")
                .unwrap()
                .group(1, GroupRule::language("loop"))
                .unwrap()],
            false,
        );
        registry
    }

    #[test]
    fn test_batch_preserves_order() {
        let registry = registry();
        let texts: Vec<String> = (0..20).map(|i| format!("x{}", i)).collect();
        let jobs: Vec<(&str, &str)> = texts.iter().map(|t| (t.as_str(), "num")).collect();

        let results = highlight_batch(&registry, &jobs, &HighlightConfig::default());
        assert_eq!(results.len(), 20);
        for (i, result) in results.iter().enumerate() {
            assert_eq!(
                result.as_deref().unwrap(),
                format!(r#"x<span class="n">{}</span>"#, i)
            );
        }
    }

    #[test]
    fn test_batch_with_failures() {
        let registry = registry();
        let jobs = [("1", "num"), ("abc", "loop"), ("2", "num")];
        let config = HighlightConfig::new().with_max_depth(3);

        let results = highlight_batch(&registry, &jobs, &config);
        assert!(results[0].is_ok());
        assert!(matches!(
            results[1],
            Err(HighlightError::RecursionLimitExceeded { max_depth: 3, .. })
        ));
        assert!(results[2].is_ok());
    }

    #[test]
    fn test_batch_owned() {
        let registry = registry();
        let jobs = vec![
            ("7".to_string(), "num".to_string()),
            ("no digits".to_string(), "num".to_string()),
        ];
        let results = highlight_batch_owned(&registry, jobs, &HighlightConfig::default());
        assert_eq!(results.len(), 2);
        assert_eq!(results[1].as_deref().unwrap(), "no digits");
    }

    #[test]
    fn test_batch_with_pool_settings() {
        let registry = registry();
        let jobs = [("1", "num"), ("2", "num"), ("3", "num")];
        let parallel = ParallelConfig::new().with_num_threads(2).with_min_chunk_size(2);
        let results =
            highlight_batch_with(&registry, &jobs, &HighlightConfig::default(), &parallel);
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.is_ok()));
    }

    #[test]
    fn test_parallel_config_default() {
        let config = ParallelConfig::default();
        assert!(config.num_threads.is_none());
        assert_eq!(config.min_chunk_size, 1);
    }

    #[test]
    fn test_parallel_config_builder() {
        let config = ParallelConfig::new()
            .with_num_threads(4)
            .with_min_chunk_size(10);

        assert_eq!(config.num_threads, Some(4));
        assert_eq!(config.min_chunk_size, 10);
    }
}
