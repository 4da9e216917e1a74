//! Output markup
//!
//! A labeled span is rendered as `<tag class="c1 c2">text</tag>`. Labels
//! use `.` as the class separator, so `keyword.operator` becomes
//! `class="keyword operator"`. Text is inserted verbatim; the engine never
//! escapes or rewrites the characters it wraps.

use std::borrow::Cow;

/// Default element name for wrapped spans
pub const DEFAULT_TAG: &str = "span";

/// Renders labeled spans
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markup {
    tag: String,
    global_class: Option<String>,
}

impl Default for Markup {
    fn default() -> Self {
        Self {
            tag: DEFAULT_TAG.to_string(),
            global_class: None,
        }
    }
}

impl Markup {
    /// Markup with a custom tag and optional class appended to every wrap
    pub fn new(tag: impl Into<String>, global_class: Option<String>) -> Self {
        Self {
            tag: tag.into(),
            global_class,
        }
    }

    /// Element name used for wrapping
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Wrap `text` with `label`
    pub fn wrap(&self, label: &str, text: &str) -> String {
        let classes = class_list(label);
        let extra = self.global_class.as_deref().map_or(0, |c| c.len() + 1);
        let mut out =
            String::with_capacity(text.len() + classes.len() + extra + 2 * self.tag.len() + 14);

        out.push('<');
        out.push_str(&self.tag);
        out.push_str(" class=\"");
        out.push_str(&classes);
        if let Some(global) = &self.global_class {
            out.push(' ');
            out.push_str(global);
        }
        out.push_str("\">");
        out.push_str(text);
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
        out
    }
}

/// Class attribute value for a dotted label
pub fn class_list(label: &str) -> Cow<'_, str> {
    if label.contains('.') {
        Cow::Owned(label.replace('.', " "))
    } else {
        Cow::Borrowed(label)
    }
}
