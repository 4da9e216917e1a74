//! Match scanning
//!
//! [`MatchScanner`] walks one expression over one level's source text and
//! yields every non-empty match in order. The cursor belongs to the
//! scanner value, not to the pattern, so a pattern can be scanned by a
//! parent level and an embedded level at the same time without cross-talk.
//!
//! Scanning always runs against the level's original text. Annotations
//! are only applied by the compositor after every pattern is exhausted,
//! so no pattern ever sees another pattern's markup.

use regex::{Captures, Regex};

use super::span::Span;

/// One occurrence of a pattern in a level's source text
///
/// Offsets are byte positions in the level's source. Group texts borrow
/// from that source.
#[derive(Debug, Clone)]
pub struct Match<'t> {
    start: usize,
    end: usize,
    text: &'t str,
    /// Index 0 is the whole match; `None` for groups that did not take part
    groups: Vec<Option<(usize, &'t str)>>,
}

impl<'t> Match<'t> {
    fn from_captures(caps: &Captures<'t>) -> Option<Self> {
        let whole = caps.get(0)?;
        let groups = caps
            .iter()
            .map(|group| group.map(|m| (m.start(), m.as_str())))
            .collect();
        Some(Self {
            start: whole.start(),
            end: whole.end(),
            text: whole.as_str(),
            groups,
        })
    }

    /// Start byte offset
    pub fn start(&self) -> usize {
        self.start
    }

    /// End byte offset (exclusive)
    pub fn end(&self) -> usize {
        self.end
    }

    /// The claimed interval
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }

    /// Full matched text
    pub fn text(&self) -> &'t str {
        self.text
    }

    /// Captured text of group `index`, if it participated
    pub fn group(&self, index: usize) -> Option<&'t str> {
        self.groups
            .get(index)
            .copied()
            .flatten()
            .map(|(_, text)| text)
    }

    /// Start of group `index` relative to the match start
    pub fn group_start(&self, index: usize) -> Option<usize> {
        self.groups
            .get(index)
            .copied()
            .flatten()
            .map(|(start, _)| start - self.start)
    }
}

/// Iterator over the non-empty matches of one expression in one text
pub struct MatchScanner<'r, 't> {
    regex: &'r Regex,
    source: &'t str,
    cursor: usize,
}

impl<'r, 't> MatchScanner<'r, 't> {
    /// Start scanning `source` from the beginning
    pub fn new(regex: &'r Regex, source: &'t str) -> Self {
        Self {
            regex,
            source,
            cursor: 0,
        }
    }

    /// Current cursor position
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor past an empty match at `at`
    fn step_past(&mut self, at: usize) {
        self.cursor = self.source[at..]
            .chars()
            .next()
            .map(|c| at + c.len_utf8())
            .unwrap_or(self.source.len() + 1);
    }
}

impl<'r, 't> Iterator for MatchScanner<'r, 't> {
    type Item = Match<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.cursor <= self.source.len() {
            // captures_at keeps the full text visible, so anchors and word
            // boundaries see the real surrounding context
            let caps = self.regex.captures_at(self.source, self.cursor)?;
            let found = Match::from_captures(&caps)?;

            if found.end > found.start {
                self.cursor = found.end;
                return Some(found);
            }

            self.step_past(found.start);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect<'t>(regex: &Regex, source: &'t str) -> Vec<(usize, usize, &'t str)> {
        MatchScanner::new(regex, source)
            .map(|m| (m.start(), m.end(), m.text()))
            .collect()
    }

    #[test]
    fn test_scans_all_occurrences() {
        let regex = Regex::new(r"\d+").unwrap();
        assert_eq!(
            collect(&regex, "a 12 b 345 c 6"),
            vec![(2, 4, "12"), (7, 10, "345"), (13, 14, "6")]
        );
    }

    #[test]
    fn test_no_match() {
        let regex = Regex::new(r"\d+").unwrap();
        assert!(collect(&regex, "no digits here").is_empty());
        assert!(collect(&regex, "").is_empty());
    }

    #[test]
    fn test_empty_matches_skipped() {
        let regex = Regex::new(r"\d*").unwrap();
        assert_eq!(collect(&regex, "ab12c3"), vec![(2, 4, "12"), (5, 6, "3")]);
    }

    #[test]
    fn test_empty_matches_skip_multibyte() {
        let regex = Regex::new(r"x*").unwrap();
        assert_eq!(collect(&regex, "héx"), vec![(3, 4, "x")]);
    }

    #[test]
    fn test_word_boundary_uses_full_context() {
        // Scanning from the cursor must not treat the cursor as a text start
        let regex = Regex::new(r"\bint\b").unwrap();
        assert_eq!(collect(&regex, "int print int"), vec![(0, 3, "int"), (10, 13, "int")]);
    }

    #[test]
    fn test_multiline_anchor() {
        let regex = Regex::new(r"(?m)//.*$").unwrap();
        assert_eq!(
            collect(&regex, "// a\nx\n// b"),
            vec![(0, 4, "// a"), (7, 11, "// b")]
        );
    }

    #[test]
    fn test_groups_relative_to_match() {
        let regex = Regex::new(r"(\w+)=(\d+)?").unwrap();
        let source = "  key=42 other=";
        let matches: Vec<Match<'_>> = MatchScanner::new(&regex, source).collect();
        assert_eq!(matches.len(), 2);

        let first = &matches[0];
        assert_eq!(first.span(), Span::new(2, 8));
        assert_eq!(first.group(1), Some("key"));
        assert_eq!(first.group_start(1), Some(0));
        assert_eq!(first.group(2), Some("42"));
        assert_eq!(first.group_start(2), Some(4));

        let second = &matches[1];
        assert_eq!(second.group(1), Some("other"));
        assert_eq!(second.group(2), None);
        assert_eq!(second.group_start(2), None);
        assert_eq!(second.group(7), None);
    }

    #[test]
    fn test_independent_scanners_share_regex() {
        let regex = Regex::new(r"[a-z]").unwrap();
        let mut outer = MatchScanner::new(&regex, "ab");
        let mut inner = MatchScanner::new(&regex, "xyz");

        assert_eq!(outer.next().map(|m| m.text()), Some("a"));
        assert_eq!(inner.next().map(|m| m.text()), Some("x"));
        assert_eq!(inner.next().map(|m| m.text()), Some("y"));
        assert_eq!(outer.next().map(|m| m.text()), Some("b"));
        assert_eq!(outer.cursor(), 2);
    }
}
