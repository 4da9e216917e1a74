//! Integration tests for core highlighting behavior
//!
//! These tests cover:
//! - Labeled and unlabeled matches
//! - Overlap resolution between patterns
//! - Sub-group labels and nested pattern rules
//! - Markup configuration
//! - Inputs nothing matches

use hilite::portable::{
    GroupRule, HighlightConfig, Highlighter, LanguageRegistry, Pattern, DEFAULT_LANGUAGE,
};

fn pattern(name: &str, expression: &str) -> Pattern {
    Pattern::new(expression).unwrap().named(name)
}

fn c_registry() -> LanguageRegistry {
    let mut registry = LanguageRegistry::new();
    registry.register(
        "c",
        vec![
            pattern("comment", r"(?m)//.*$"),
            pattern("integer", r"\b\d+\b"),
            pattern("keyword", r"\bint\b"),
        ],
        false,
    );
    registry
}

// ============================================================================
// Basic Annotation Tests
// ============================================================================

#[test]
fn test_comment_keyword_integer() {
    let registry = c_registry();
    let out = Highlighter::new(&registry)
        .highlight("// hello\nint x = 5;", "c")
        .unwrap();

    assert_eq!(
        out,
        concat!(
            r#"<span class="comment">// hello</span>"#,
            "\n",
            r#"<span class="keyword">int</span> x = <span class="integer">5</span>;"#
        )
    );
}

#[test]
fn test_whitespace_preserved() {
    let registry = c_registry();
    let input = "\t int\r\n\n  7  ";
    let out = Highlighter::new(&registry).highlight(input, "c").unwrap();
    assert_eq!(
        out,
        "\t <span class=\"keyword\">int</span>\r\n\n  <span class=\"integer\">7</span>  "
    );
}

#[test]
fn test_dotted_label_becomes_class_list() {
    let mut registry = LanguageRegistry::new();
    registry.register("py", vec![pattern("keyword.operator", r"\b(and|or|not)\b")], false);

    let out = Highlighter::new(&registry).highlight("a and b", "py").unwrap();
    assert_eq!(out, r#"a <span class="keyword operator">and</span> b"#);
}

#[test]
fn test_multibyte_text() {
    let mut registry = LanguageRegistry::new();
    registry.register("txt", vec![pattern("word", r"[[:alpha:]]+"), pattern("n", r"\d+")], true);

    let out = Highlighter::new(&registry).highlight("é 42 ü", "txt").unwrap();
    assert_eq!(out, r#"é <span class="n">42</span> ü"#);
}

#[test]
fn test_unicode_word_class() {
    let mut registry = LanguageRegistry::new();
    registry.register("txt", vec![pattern("word", r"\w+")], true);

    let out = Highlighter::new(&registry).highlight("naïve café", "txt").unwrap();
    assert_eq!(
        out,
        r#"<span class="word">naïve</span> <span class="word">café</span>"#
    );
}

#[test]
fn test_unlabeled_match_only_wraps_groups() {
    let mut registry = LanguageRegistry::new();
    registry.register(
        "css",
        vec![Pattern::new(r"(\d+)(px|em)")
            .unwrap()
            .group(2, GroupRule::label("unit"))
            .unwrap()],
        false,
    );

    let out = Highlighter::new(&registry).highlight("width: 10px", "css").unwrap();
    assert_eq!(out, r#"width: 10<span class="unit">px</span>"#);
}

#[test]
fn test_empty_matches_are_skipped() {
    let mut registry = LanguageRegistry::new();
    registry.register("n", vec![pattern("n", r"\d*")], false);

    let out = Highlighter::new(&registry).highlight("a1b22", "n").unwrap();
    assert_eq!(out, r#"a<span class="n">1</span>b<span class="n">22</span>"#);
}

// ============================================================================
// No-op Tests
// ============================================================================

#[test]
fn test_no_match_returns_input_unchanged() {
    let registry = c_registry();
    let input = "nothing to see <here> & \"there\"";
    let out = Highlighter::new(&registry).highlight(input, "c").unwrap();
    assert_eq!(out, input);
}

#[test]
fn test_empty_input() {
    let registry = c_registry();
    let out = Highlighter::new(&registry).highlight("", "c").unwrap();
    assert_eq!(out, "");
}

#[test]
fn test_empty_registry() {
    let registry = LanguageRegistry::new();
    let out = Highlighter::new(&registry).highlight("int 5", "c").unwrap();
    assert_eq!(out, "int 5");
}

#[test]
fn test_unknown_language_uses_defaults() {
    let mut registry = c_registry();
    registry.register(DEFAULT_LANGUAGE, vec![pattern("number", r"\d+")], false);

    let mut highlighter = Highlighter::new(&registry);
    let unknown = highlighter.highlight("int 5", "nonexistent").unwrap();
    let defaults = highlighter.highlight("int 5", DEFAULT_LANGUAGE).unwrap();

    assert_eq!(unknown, defaults);
    assert_eq!(unknown, r#"int <span class="number">5</span>"#);
}

// ============================================================================
// Overlap Tests
// ============================================================================

#[test]
fn test_containing_span_wins() {
    let mut registry = LanguageRegistry::new();
    registry.register(
        "l",
        vec![pattern("comment", r"#.*"), pattern("keyword", r"abc")],
        false,
    );

    let mut highlighter = Highlighter::new(&registry);
    let out = highlighter.highlight("# abc defg", "l").unwrap();
    assert_eq!(out, r#"<span class="comment"># abc defg</span>"#);
    assert_eq!(highlighter.stats().rejected, 1);
}

#[test]
fn test_broader_later_match_supersedes() {
    let mut registry = LanguageRegistry::new();
    registry.register(
        "l",
        vec![pattern("inner", r"XYZ"), pattern("outer", r"a{5}XYZb{12}")],
        false,
    );

    let mut highlighter = Highlighter::new(&registry);
    let out = highlighter.highlight("aaaaaXYZbbbbbbbbbbbb", "l").unwrap();
    assert_eq!(out, r#"<span class="outer">aaaaaXYZbbbbbbbbbbbb</span>"#);

    let stats = highlighter.stats();
    assert_eq!(stats.evicted, 1);
    assert_eq!(stats.applied, 1);
}

#[test]
fn test_partial_overlap_rejected() {
    let mut registry = LanguageRegistry::new();
    registry.register("l", vec![pattern("first", r"abc"), pattern("second", r"cde")], false);

    let out = Highlighter::new(&registry).highlight("abcde", "l").unwrap();
    assert_eq!(out, r#"<span class="first">abc</span>de"#);
}

#[test]
fn test_identical_span_keeps_first() {
    let mut registry = LanguageRegistry::new();
    registry.register(
        "l",
        vec![pattern("keyword", r"\bif\b"), pattern("identifier", r"\b\w+\b")],
        false,
    );

    let out = Highlighter::new(&registry).highlight("if x", "l").unwrap();
    assert_eq!(
        out,
        r#"<span class="keyword">if</span> <span class="identifier">x</span>"#
    );
}

#[test]
fn test_string_shields_comment_marker() {
    let mut registry = LanguageRegistry::new();
    registry.register(
        "js",
        vec![pattern("string", r#""[^"]*""#), pattern("comment", r"(?m)//.*$")],
        false,
    );

    let out = Highlighter::new(&registry)
        .highlight("x = \"http://a\";\n// note", "js")
        .unwrap();
    assert_eq!(
        out,
        concat!(
            r#"x = <span class="string">"http://a"</span>;"#,
            "\n",
            r#"<span class="comment">// note</span>"#
        )
    );
}

// ============================================================================
// Sub-group Tests
// ============================================================================

#[test]
fn test_function_declaration_groups() {
    let mut registry = LanguageRegistry::new();
    registry.register(
        "js",
        vec![Pattern::new(r"(function)\s+(\w+)")
            .unwrap()
            .named("meta.function")
            .group(1, GroupRule::label("storage.function"))
            .unwrap()
            .group(2, GroupRule::label("entity.name.function"))
            .unwrap()],
        false,
    );

    let out = Highlighter::new(&registry)
        .highlight("function  go() {}", "js")
        .unwrap();
    assert_eq!(
        out,
        concat!(
            r#"<span class="meta function">"#,
            r#"<span class="storage function">function</span>  "#,
            r#"<span class="entity name function">go</span>"#,
            r#"</span>() {}"#
        )
    );
}

#[test]
fn test_nested_pattern_rule() {
    let mut registry = LanguageRegistry::new();
    registry.register(
        "js",
        vec![Pattern::new(r#"(")([^"]*)(")"#)
            .unwrap()
            .named("string")
            .group(
                2,
                GroupRule::pattern(Pattern::new(r"\\.").unwrap().named("constant.escape")),
            )
            .unwrap()],
        false,
    );

    let out = Highlighter::new(&registry)
        .highlight(r#"s = "a\tb";"#, "js")
        .unwrap();
    assert_eq!(
        out,
        r#"s = <span class="string">"a<span class="constant escape">\t</span>b"</span>;"#
    );
}

// ============================================================================
// Markup Configuration Tests
// ============================================================================

#[test]
fn test_custom_tag_and_global_class() {
    let registry = c_registry();
    let config = HighlightConfig::new().with_tag("em").with_global_class("hl");
    let out = Highlighter::new(&registry)
        .config(config)
        .highlight("int 1", "c")
        .unwrap();
    assert_eq!(
        out,
        r#"<em class="keyword hl">int</em> <em class="integer hl">1</em>"#
    );
}

#[test]
fn test_reused_highlighter_is_independent_per_call() {
    let registry = c_registry();
    let mut highlighter = Highlighter::new(&registry);

    let first = highlighter.highlight("int 1", "c").unwrap();
    let second = highlighter.highlight("int 1", "c").unwrap();
    assert_eq!(first, second);
    assert_eq!(highlighter.stats().levels, 2);
}
