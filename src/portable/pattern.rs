//! Pattern rules
//!
//! A [`Pattern`] is one rule of a language table: an expression, an
//! optional class label for the whole match, and directives for individual
//! capture groups. Patterns are compiled once, when they are built, and
//! are immutable afterwards. The same pattern may be scanned by many
//! levels at once; the scan cursor lives in the scanner, never here.
//!
//! Tables can also be written as data. [`PatternDef`] is the serialized
//! shape:
//!
//! ```json
//! {
//!   "name": "meta.tag",
//!   "pattern": "(<style>)([\\s\\S]*?)(</style>)",
//!   "flags": "i",
//!   "matches": {
//!     "1": "tag.open",
//!     "2": { "language": "css" },
//!     "3": { "name": "tag.close", "pattern": "</?\\w+>" }
//!   }
//! }
//! ```

use std::collections::BTreeMap;

use regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize};

use super::error::{HighlightError, Result};
use super::regex_cache;

/// What to do with one capture group of an accepted match
#[derive(Debug, Clone)]
pub enum GroupRule {
    /// Wrap the captured text with this label
    Label(String),

    /// Highlight the captured text as another language
    Language(String),

    /// Highlight the captured text with these patterns at a fresh level,
    /// then wrap the result with `name` when present
    Patterns {
        /// Label for the composed result
        name: Option<String>,
        /// Patterns applied to the capture, in priority order
        patterns: Vec<Pattern>,
    },
}

impl GroupRule {
    /// Plain label rule
    pub fn label(label: impl Into<String>) -> Self {
        GroupRule::Label(label.into())
    }

    /// Nested language rule
    pub fn language(language: impl Into<String>) -> Self {
        GroupRule::Language(language.into())
    }

    /// Single nested pattern
    pub fn pattern(pattern: Pattern) -> Self {
        GroupRule::Patterns {
            name: None,
            patterns: vec![pattern],
        }
    }

    /// Nested pattern list, optionally wrapped as a whole
    pub fn patterns(name: Option<String>, patterns: Vec<Pattern>) -> Self {
        GroupRule::Patterns { name, patterns }
    }
}

/// A compiled rule: expression, optional label, sub-group directives
#[derive(Debug, Clone)]
pub struct Pattern {
    name: Option<String>,
    regex: Regex,
    /// Sorted by capture index, highest first
    groups: Vec<(usize, GroupRule)>,
}

impl Pattern {
    /// Compile a pattern from an expression
    ///
    /// # Errors
    /// [`HighlightError::InvalidPattern`] if the expression does not compile.
    pub fn new(expression: &str) -> Result<Self> {
        Ok(Self {
            name: None,
            regex: regex_cache::get_or_compile(expression)?,
            groups: Vec::new(),
        })
    }

    /// Compile a pattern with JavaScript-style flag letters
    ///
    /// `i`, `m`, `s` and `x` map to the matching inline flags; `g`, `u`
    /// and `y` are accepted and ignored since scanning is always global.
    pub fn with_flags(expression: &str, flags: &str) -> Result<Self> {
        let mut inline = String::new();
        for flag in flags.chars() {
            match flag {
                'i' | 'm' | 's' | 'x' => {
                    if !inline.contains(flag) {
                        inline.push(flag);
                    }
                }
                'g' | 'u' | 'y' => {}
                other => {
                    return Err(HighlightError::invalid_pattern(
                        expression,
                        format!("unsupported flag '{}'", other),
                    ))
                }
            }
        }

        if inline.is_empty() {
            Self::new(expression)
        } else {
            Self::new(&format!("(?{}){}", inline, expression))
        }
    }

    /// Set the label wrapped around the whole match
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach a rule to capture group `index`
    ///
    /// A plain label on group 0 of an unnamed pattern becomes the
    /// pattern's name. A second rule for the same index replaces the first.
    ///
    /// # Errors
    /// [`HighlightError::InvalidPattern`] if the expression has no such group.
    pub fn group(mut self, index: usize, rule: GroupRule) -> Result<Self> {
        if index >= self.regex.captures_len() {
            return Err(HighlightError::invalid_pattern(
                self.regex.as_str(),
                format!(
                    "group {} declared but the expression has {} capture groups",
                    index,
                    self.regex.captures_len() - 1
                ),
            ));
        }

        if index == 0 && self.name.is_none() {
            if let GroupRule::Label(label) = rule {
                self.name = Some(label);
                return Ok(self);
            }
        }

        self.groups.retain(|(existing, _)| *existing != index);
        let at = self
            .groups
            .iter()
            .position(|(existing, _)| *existing < index)
            .unwrap_or(self.groups.len());
        self.groups.insert(at, (index, rule));
        Ok(self)
    }

    /// Build a pattern from its serialized form
    pub fn from_def(def: &PatternDef) -> Result<Self> {
        let mut pattern = Self::with_flags(&def.pattern, &def.flags)?;
        if let Some(name) = &def.name {
            pattern = pattern.named(name.clone());
        }
        for (&index, group) in &def.matches {
            pattern = pattern.group(index, GroupRule::from_def(group)?)?;
        }
        Ok(pattern)
    }

    /// Label for the whole match, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The compiled expression
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Expression source, including any inline flag prefix
    pub fn expression(&self) -> &str {
        self.regex.as_str()
    }

    /// Group rules, highest capture index first
    pub fn groups(&self) -> &[(usize, GroupRule)] {
        &self.groups
    }

    /// Whether an accepted match needs the group expander
    pub fn has_groups(&self) -> bool {
        !self.groups.is_empty()
    }
}

impl GroupRule {
    fn from_def(def: &GroupDef) -> Result<Self> {
        Ok(match def {
            GroupDef::Label(label) => GroupRule::Label(label.clone()),
            GroupDef::Language { language } => GroupRule::Language(language.clone()),
            GroupDef::Patterns { name, matches } => GroupRule::Patterns {
                name: name.clone(),
                patterns: matches
                    .iter()
                    .map(Pattern::from_def)
                    .collect::<Result<Vec<_>>>()?,
            },
            GroupDef::Pattern(def) => GroupRule::pattern(Pattern::from_def(def)?),
        })
    }
}

/// Serialized form of a [`Pattern`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternDef {
    /// Label for the whole match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Regular expression source
    pub pattern: String,
    /// Flag letters, see [`Pattern::with_flags`]
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub flags: String,
    /// Rules keyed by capture group index
    #[serde(
        default,
        deserialize_with = "group_indices",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub matches: BTreeMap<usize, GroupDef>,
}

// Keys are read as strings first: untagged enums buffer their content and
// cannot turn a string key into an integer on their own.
fn group_indices<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<usize, GroupDef>, D::Error>
where
    D: Deserializer<'de>,
{
    BTreeMap::<String, GroupDef>::deserialize(deserializer)?
        .into_iter()
        .map(|(key, group)| {
            key.parse::<usize>()
                .map(|index| (index, group))
                .map_err(|_| {
                    de::Error::custom(format!("group key '{}' is not a capture index", key))
                })
        })
        .collect()
}

impl PatternDef {
    /// A definition with just an expression and a label
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            pattern: pattern.into(),
            flags: String::new(),
            matches: BTreeMap::new(),
        }
    }
}

/// Serialized form of a [`GroupRule`]
///
/// Variants are tried in declaration order, so an object carrying a
/// `language` key is always a language rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupDef {
    /// `"keyword.operator"`
    Label(String),
    /// `{ "language": "css" }`
    Language {
        /// Language to highlight the capture as
        language: String,
    },
    /// `{ "name": "string", "matches": [ ... ] }`
    Patterns {
        /// Label for the composed result
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        /// Patterns applied to the capture
        matches: Vec<PatternDef>,
    },
    /// `{ "name": "escape", "pattern": "\\\\." }`
    Pattern(Box<PatternDef>),
}
