//! Markup codec tests
//!
//! Reading legacy and pasted markup into the document tree, and writing it
//! back out in canonical form.

use richpad::html::{parse, serialize};
use richpad::model::{Block, Inline, TextKind};

fn canonical(markup: &str) -> String {
    serialize(&parse(markup))
}

// ========================================================================
// Canonical output
// ========================================================================

#[test]
fn test_legacy_tags_are_canonicalized() {
    assert_eq!(
        canonical("<div><strong>B</strong> <em>I</em> <del>S</del> <ins>U</ins></div>"),
        "<p><b>B</b> <i>I</i> <s>S</s> <u>U</u></p>"
    );
}

#[test]
fn test_style_attributes_become_formats() {
    assert_eq!(
        canonical(r#"<p><span style="font-weight: 700; font-style: italic">x</span></p>"#),
        "<p><b><i>x</i></b></p>"
    );
    assert_eq!(
        canonical(r#"<p><span style="color: red; font-size: 12px">x</span></p>"#),
        r#"<p><span style="font-size: 12px; color: red;">x</span></p>"#
    );
}

#[test]
fn test_entities_round_trip() {
    assert_eq!(
        canonical("<p>Fish &amp; chips &lt;3 &quot;q&quot;</p>"),
        "<p>Fish &amp; chips &lt;3 \"q\"</p>"
    );
    assert_eq!(canonical("<p>a&nbsp;b</p>"), "<p>a&nbsp;b</p>");
}

#[test]
fn test_empty_inputs() {
    assert_eq!(canonical(""), "");
    assert_eq!(canonical("   \n"), "");
    assert_eq!(canonical("<p><br></p>"), "");
    assert_eq!(canonical("<p></p><p></p>"), "<p><br></p><p><br></p>");
}

#[test]
fn test_unknown_and_ignored_elements() {
    assert_eq!(
        canonical("<p>safe<script>alert(1)</script></p><style>p{}</style>"),
        "<p>safe</p>"
    );
    assert_eq!(canonical("<section><p>kept</p></section>"), "<p>kept</p>");
}

// ========================================================================
// Structure
// ========================================================================

#[test]
fn test_headings_and_mixed_lists() {
    let doc = parse("<h3>Title</h3><ol><li>a</li></ol><ul><li>b</li></ul>");
    let kinds: Vec<TextKind> = doc
        .blocks
        .iter()
        .filter_map(|b| b.as_text().map(|t| t.kind))
        .collect();
    assert_eq!(
        kinds,
        vec![
            TextKind::Heading(3),
            TextKind::ListItem { ordered: true },
            TextKind::ListItem { ordered: false },
        ]
    );
    assert_eq!(
        serialize(&doc),
        "<h3>Title</h3><ol><li>a</li></ol><ul><li>b</li></ul>"
    );
}

#[test]
fn test_line_breaks_inside_paragraph() {
    let doc = parse("<p>one<br>two</p>");
    match &doc.blocks[0] {
        Block::Text(text) => {
            assert_eq!(text.inlines.len(), 3);
            assert_eq!(text.inlines[1], Inline::LineBreak);
        }
        other => panic!("expected text block, got {:?}", other),
    }
    assert_eq!(serialize(&doc), "<p>one<br>two</p>");
}

#[test]
fn test_canonical_output_is_stable() {
    for markup in [
        r#"<h2 style="text-align: center;">Hi</h2><p>a <a href="/x"><b>b</b></a> c</p>"#,
        r#"<table style="border-collapse: collapse; width: 100%;"><tbody><tr><td style="border: 1px solid #ccc; padding: 8px;">x</td></tr></tbody></table>"#,
        r#"<iframe src="https://www.youtube.com/embed/ABC123" width="560" height="315" frameborder="0" allowfullscreen></iframe>"#,
        "<blockquote>q</blockquote><pre>code  here</pre>",
    ] {
        let once = canonical(markup);
        assert_eq!(once, markup);
        assert_eq!(canonical(&once), once);
    }
}
