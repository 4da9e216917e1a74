//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from hilite.
//! Importing this module with a wildcard import brings the core types into scope:
//!
//! ```
//! use hilite::prelude::*;
//!
//! let mut registry = LanguageRegistry::new();
//! registry.register("num", vec![Pattern::new(r"\d+").unwrap().named("n")], false);
//! let out = Highlighter::new(&registry).highlight("a1", "num").unwrap();
//! assert_eq!(out, r#"a<span class="n">1</span>"#);
//! ```
//!
//! # Re-exported Items
//!
//! ## Core Types
//! - [`Highlighter`] - Entry point
//! - [`HighlightConfig`] - Highlighting options
//! - [`HighlightStats`] - Counters of a highlighter
//! - [`LanguageRegistry`] - Language pattern tables
//! - [`Pattern`] - Compiled pattern
//! - [`GroupRule`] - Capture group rule
//!
//! ## Serialized Tables
//! - [`PatternDef`] - Pattern as data
//! - [`GroupDef`] - Group rule as data
//!
//! ## Scheduling
//! - [`Scheduler`] - Yield hook trait
//! - [`YieldPoint`] - Where a yield happened
//! - [`Phase`] - Scan or apply
//!
//! ## Error Handling
//! - [`HighlightError`] - Error type
//! - [`Result`] - Result alias

// ============================================================================
// Core Types
// ============================================================================

pub use crate::portable::{
    GroupRule, HighlightConfig, HighlightStats, Highlighter, LanguageRegistry, Pattern, Span,
};

// ============================================================================
// Serialized Tables
// ============================================================================

pub use crate::portable::{GroupDef, PatternDef};

// ============================================================================
// Scheduling
// ============================================================================

pub use crate::portable::{NoYield, Phase, Scheduler, ThreadYield, YieldPoint};

// ============================================================================
// Error Handling
// ============================================================================

pub use crate::portable::{HighlightError, Result};
