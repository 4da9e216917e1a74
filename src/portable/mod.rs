//! Portable highlighting core for hilite
//!
//! This module contains the host-agnostic annotation engine. It never
//! touches a DOM or performs I/O, so the same code backs native callers,
//! the batch API and the WASM binding.
//!
//! # Module Organization
//!
//! ## Pattern Tables
//! - [`Pattern`] - Compiled expression with an optional name and group rules
//! - [`GroupRule`] - What to do with one capture group
//! - [`PatternDef`] / [`GroupDef`] - Serialized form of a pattern table
//! - [`LanguageRegistry`] - Language name to pattern list
//!
//! ## Engine
//! - [`Highlighter`] - Entry point; runs levels and owns the scheduler
//! - [`HighlightConfig`] - Batch sizes, depth ceiling, markup
//! - [`HighlightStats`] - Counters for one highlighter
//!
//! ## Building Blocks
//! - [`MatchScanner`] - Successive non-empty matches of one expression
//! - [`OverlapResolver`] - Admits or rejects candidate spans per level
//! - [`Markup`] - Renders labeled spans
//!
//! ## Cooperative Yielding
//! - [`Scheduler`] - Receives control at batch boundaries
//! - [`NoYield`] / [`ThreadYield`] - Stock schedulers
//!
//! ## Error Handling
//! - [`HighlightError`] - Every failure the crate reports

// ============================================================================
// Logging
// ============================================================================

/// Logging macros - use log crate when logging feature is enabled
#[cfg(feature = "logging")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "logging"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "logging")]
macro_rules! log_trace {
    ($($arg:tt)*) => { log::trace!($($arg)*) };
}

#[cfg(not(feature = "logging"))]
macro_rules! log_trace {
    ($($arg:tt)*) => {};
}

// ============================================================================
// Module Declarations
// ============================================================================

pub mod compositor;
pub mod engine;
pub mod error;
pub mod expander;
pub mod markup;
pub mod overlap;
pub mod pattern;
pub mod regex_cache;
pub mod registry;
pub mod scanner;
pub mod scheduler;
pub mod span;

// Batch highlighting (always available, uses rayon when feature is enabled)
pub mod parallel;

// ============================================================================
// Core Types
// ============================================================================

pub use engine::{HighlightConfig, HighlightStats, Highlighter, DEFAULT_MAX_DEPTH};
pub use pattern::{GroupDef, GroupRule, Pattern, PatternDef};
pub use registry::{LanguageDefinition, LanguageRegistry, DEFAULT_LANGUAGE};
pub use span::Span;

// ============================================================================
// Error Handling
// ============================================================================

pub use error::{HighlightError, Result};

// ============================================================================
// Building Blocks
// ============================================================================

pub use markup::{Markup, DEFAULT_TAG};
pub use overlap::{AcceptedRecord, Admission, OverlapResolver};
pub use scanner::{Match, MatchScanner};

// ============================================================================
// Scheduling
// ============================================================================

pub use scheduler::{
    NoYield, Phase, Scheduler, ThreadYield, YieldPoint, DEFAULT_APPLY_BATCH, DEFAULT_SCAN_BATCH,
};

// ============================================================================
// Regex Cache
// ============================================================================

pub use regex_cache::{get_or_compile as get_regex, stats as regex_stats, CacheStats};

// ============================================================================
// Global Registry
// ============================================================================

pub use registry::{
    clear_registry, highlight, highlight_with_config, register, register_json, resolve_count,
};

// ============================================================================
// Batch Highlighting
// ============================================================================

pub use parallel::{highlight_batch, highlight_batch_owned, highlight_batch_with, ParallelConfig};
