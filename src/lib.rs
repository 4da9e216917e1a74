//! hilite - Regex-driven Lexical Annotation Engine
//!
//! hilite wraps the parts of a text that match registered patterns in
//! labeled markup. It provides:
//! - Per-language ordered pattern tables with a shared default language
//! - Overlap resolution: broader matches supersede narrower ones, and
//!   nothing ever nests across a boundary
//! - Capture-group rules that label, re-scan, or hand a capture to another
//!   language at a deeper level
//! - Cooperative yielding at batch boundaries through a pluggable scheduler
//! - Pattern tables as JSON
//! - Optional parallel batch highlighting
//! - Optional WASM bindings
//!
//! ## Quick Start
//!
//! ```rust
//! use hilite::portable::{Highlighter, LanguageRegistry, Pattern};
//!
//! let mut registry = LanguageRegistry::new();
//! registry.register(
//!     "c",
//!     vec![
//!         Pattern::new(r"(?m)//.*$").unwrap().named("comment"),
//!         Pattern::new(r"\b\d+\b").unwrap().named("integer"),
//!         Pattern::new(r"\bint\b").unwrap().named("keyword"),
//!     ],
//!     false,
//! );
//!
//! let mut highlighter = Highlighter::new(&registry);
//! let out = highlighter.highlight("int x = 5; // 6", "c").unwrap();
//! assert_eq!(
//!     out,
//!     concat!(
//!         r#"<span class="keyword">int</span> x = <span class="integer">5</span>; "#,
//!         r#"<span class="comment">// 6</span>"#
//!     )
//! );
//! ```
//!
//! ## Pattern Tables as JSON
//!
//! ```rust
//! use hilite::portable::{Highlighter, LanguageRegistry};
//!
//! let mut registry = LanguageRegistry::new();
//! registry
//!     .register_json(
//!         "ini",
//!         r#"[
//!             { "name": "comment", "pattern": ";.*$", "flags": "m" },
//!             { "pattern": "^(\\w+)=", "flags": "m", "matches": { "1": "key" } }
//!         ]"#,
//!         false,
//!     )
//!     .unwrap();
//!
//! let out = Highlighter::new(&registry).highlight("port=80", "ini").unwrap();
//! assert_eq!(out, r#"<span class="key">port</span>=80"#);
//! ```
//!
//! ## Feature Flags
//!
//! - `logging` - Enable debug logging using the `log` crate
//! - `parallel` - Run batch highlighting on rayon's thread pool
//! - `wasm` - Enable WebAssembly bindings

// Lint configuration for production quality
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all)]
#![allow(clippy::new_without_default)]
// Allow some pedantic lints that are too noisy
#![allow(clippy::module_inception)]
#![allow(clippy::redundant_closure)]

// Prelude module for convenient imports
pub mod prelude;

// Portable core - shared by native callers and the WASM binding
pub mod portable;

/// Re-export commonly used types for convenience
pub use portable::{
    // Errors
    error::{HighlightError, Result},
    // Scheduling
    scheduler::{NoYield, Phase, Scheduler, ThreadYield, YieldPoint},
    GroupDef,
    GroupRule,
    HighlightConfig,
    HighlightStats,
    Highlighter,
    LanguageRegistry,
    Pattern,
    PatternDef,
    Span,
};

// Conditional compilation for WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmHighlighter;
