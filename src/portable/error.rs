//! Error types for hilite
//!
//! Nothing that happens while matching is an error: unmatched patterns,
//! unknown languages and empty captures are all silent no-ops. The
//! variants below are the genuine faults, either configuration problems
//! caught at registration time or conditions that abort a highlight call.

use std::fmt;

use super::scheduler::Phase;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, HighlightError>;

/// Errors produced by registration or highlighting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HighlightError {
    /// A pattern's expression could not be compiled, or it declares a
    /// sub-group the expression does not have
    InvalidPattern {
        /// The offending expression source
        pattern: String,
        /// Why it was rejected
        reason: String,
    },

    /// A serialized pattern table could not be read
    InvalidDefinition {
        /// Deserializer message
        reason: String,
    },

    /// Embedded content nested deeper than the configured ceiling
    ///
    /// Typically a language that embeds itself, directly or through a
    /// cycle of sub-languages.
    RecursionLimitExceeded {
        /// Depth of the level that was about to be entered
        depth: usize,
        /// Maximum allowed depth
        max_depth: usize,
    },

    /// The host scheduler refused to resume after a yield point
    YieldRejected {
        /// Whether the scan or apply pass was suspended
        phase: Phase,
        /// Level depth at the yield point
        depth: usize,
        /// Message supplied by the scheduler
        reason: String,
    },
}

impl HighlightError {
    /// Build an `InvalidPattern` error
    pub fn invalid_pattern(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        HighlightError::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error was raised during registration rather than highlighting
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            HighlightError::InvalidPattern { .. } | HighlightError::InvalidDefinition { .. }
        )
    }
}

impl fmt::Display for HighlightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HighlightError::InvalidPattern { pattern, reason } => {
                write!(f, "Invalid pattern '{}': {}", pattern, reason)
            }
            HighlightError::InvalidDefinition { reason } => {
                write!(f, "Invalid pattern definition: {}", reason)
            }
            HighlightError::RecursionLimitExceeded { depth, max_depth } => {
                write!(
                    f,
                    "Recursion limit exceeded: depth {} exceeds maximum {}",
                    depth, max_depth
                )
            }
            HighlightError::YieldRejected {
                phase,
                depth,
                reason,
            } => {
                write!(
                    f,
                    "Scheduler rejected resume during {} at depth {}: {}",
                    phase, depth, reason
                )
            }
        }
    }
}

impl std::error::Error for HighlightError {}

impl From<serde_json::Error> for HighlightError {
    fn from(err: serde_json::Error) -> Self {
        HighlightError::InvalidDefinition {
            reason: err.to_string(),
        }
    }
}
