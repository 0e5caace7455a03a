//! Command Executor tests
//!
//! Identifiers in, one transformation plus exactly one notification out.

mod common;

use common::{count, last, recording_editor};
use richpad::messages::SurfaceMsg;
use richpad::model::Position;

fn select(editor: &mut richpad::RichTextEditor, block: usize, from: usize, to: usize) {
    editor.input(SurfaceMsg::SetSelection {
        anchor: Position::new(block, from),
        head: Position::new(block, to),
    });
}

// ========================================================================
// Inline styles
// ========================================================================

#[test]
fn test_bold_twice_restores_uniform_selection() {
    for value in [
        "<p>hello world</p>",
        "<p><i>slanted</i> text</p>",
        r#"<p style="text-align: center;">centered</p>"#,
        "<p><em>legacy</em> tags</p>",
    ] {
        let (mut editor, log) = recording_editor(value);
        editor.exec("selectAll", None);
        editor.exec("bold", None);
        assert_ne!(editor.content(), value);
        editor.exec("bold", None);
        assert_eq!(editor.content(), value);
        assert_eq!(count(&log), 3);
    }
}

#[test]
fn test_bold_on_partial_range() {
    let (mut editor, log) = recording_editor("<p>hello world</p>");
    select(&mut editor, 0, 6, 11);
    assert!(editor.exec("bold", None));
    assert_eq!(last(&log).as_deref(), Some("<p>hello <b>world</b></p>"));
}

#[test]
fn test_mixed_selection_becomes_fully_styled() {
    let (mut editor, _) = recording_editor("<p><u>ab</u>cd</p>");
    editor.exec("selectAll", None);
    editor.exec("underline", None);
    assert_eq!(editor.content(), "<p><u>abcd</u></p>");
}

#[test]
fn test_toggle_on_caret_styles_next_typed_text() {
    let (mut editor, log) = recording_editor("<p>plain</p>");
    // Still notifies: the command ran, even though nothing visible changed
    assert!(editor.exec("strikeThrough", None));
    assert_eq!(last(&log).as_deref(), Some("<p>plain</p>"));
    editor.type_text("!");
    assert_eq!(editor.content(), "<p>plain<s>!</s></p>");
}

#[test]
fn test_font_and_color_apply_to_selection_only() {
    let (mut editor, _) = recording_editor("<p>one two</p>");
    select(&mut editor, 0, 0, 3);
    editor.exec("fontName", Some("Georgia"));
    editor.exec("foreColor", Some("#336699"));
    assert_eq!(
        editor.content(),
        r##"<p><span style="font-family: Georgia; color: #336699;">one</span> two</p>"##
    );
}

#[test]
fn test_remove_format() {
    let (mut editor, _) = recording_editor("<p><b><i>x</i></b>y</p>");
    editor.exec("selectAll", None);
    editor.exec("removeFormat", None);
    assert_eq!(editor.content(), "<p>xy</p>");
}

// ========================================================================
// Blocks
// ========================================================================

#[test]
fn test_list_commands_toggle() {
    let (mut editor, _) = recording_editor("<p>a</p><p>b</p>");
    editor.exec("selectAll", None);
    editor.exec("insertOrderedList", None);
    assert_eq!(editor.content(), "<ol><li>a</li><li>b</li></ol>");
    editor.exec("insertUnorderedList", None);
    assert_eq!(editor.content(), "<ul><li>a</li><li>b</li></ul>");
    editor.exec("insertUnorderedList", None);
    assert_eq!(editor.content(), "<p>a</p><p>b</p>");
}

#[test]
fn test_format_block_variants() {
    let (mut editor, _) = recording_editor("<p>title</p>");
    editor.exec("formatBlock", Some("<h2>"));
    assert_eq!(editor.content(), "<h2>title</h2>");
    editor.exec("formatBlock", Some("blockquote"));
    assert_eq!(editor.content(), "<blockquote>title</blockquote>");
    editor.exec("formatBlock", Some("blockquote"));
    assert_eq!(editor.content(), "<p>title</p>");
    editor.exec("formatBlock", Some("pre"));
    assert_eq!(editor.content(), "<pre>title</pre>");
}

#[test]
fn test_justify_applies_to_caret_block() {
    let (mut editor, _) = recording_editor("<p>a</p><p>b</p>");
    editor.exec("justifyRight", None);
    assert_eq!(
        editor.content(),
        r#"<p>a</p><p style="text-align: right;">b</p>"#
    );
    editor.exec("justifyLeft", None);
    assert_eq!(editor.content(), "<p>a</p><p>b</p>");
}

// ========================================================================
// Insertions
// ========================================================================

#[test]
fn test_create_link_on_selection_and_caret() {
    let (mut editor, _) = recording_editor("<p>read more</p>");
    select(&mut editor, 0, 5, 9);
    editor.exec("createLink", Some("https://example.com/post"));
    assert_eq!(
        editor.content(),
        r#"<p>read <a href="https://example.com/post">more</a></p>"#
    );

    let (mut editor, _) = recording_editor("");
    editor.exec("createLink", Some("https://a.test"));
    assert_eq!(
        editor.content(),
        r#"<p><a href="https://a.test">https://a.test</a></p>"#
    );
}

#[test]
fn test_insert_image_and_html() {
    let (mut editor, _) = recording_editor("<p>ab</p>");
    editor.input(SurfaceMsg::SetCaret(Position::new(0, 1)));
    editor.exec("insertImage", Some("/img/logo.png"));
    assert_eq!(editor.content(), r#"<p>a<img src="/img/logo.png">b</p>"#);

    editor.exec("insertHTML", Some("<i>it</i>"));
    assert_eq!(
        editor.content(),
        r#"<p>a<img src="/img/logo.png"><i>it</i>b</p>"#
    );
}

#[test]
fn test_undo_redo_commands() {
    let (mut editor, log) = recording_editor("<p>v</p>");
    editor.type_text("1");
    editor.type_text("2");
    editor.exec("undo", None);
    assert_eq!(editor.content(), "<p>v1</p>");
    editor.exec("undo", None);
    assert_eq!(editor.content(), "<p>v</p>");
    editor.exec("redo", None);
    assert_eq!(last(&log).as_deref(), Some("<p>v1</p>"));
}

// ========================================================================
// No-ops and focus
// ========================================================================

#[test]
fn test_unknown_identifier_is_silent_noop() {
    let (mut editor, log) = recording_editor("<p>x</p>");
    assert!(!editor.exec("makeItPop", None));
    assert!(!editor.exec("createLink", None));
    assert!(!editor.exec("formatBlock", Some("marquee")));
    assert!(!editor.exec("foreColor", Some("red;background:url(x)")));
    assert_eq!(count(&log), 0);
    assert_eq!(editor.content(), "<p>x</p>");
    assert!(!editor.is_focused());
}

#[test]
fn test_every_command_restores_focus() {
    let (mut editor, _) = recording_editor("<p>x</p>");
    editor.blur();
    editor.exec("justifyCenter", None);
    assert!(editor.is_focused());
}
