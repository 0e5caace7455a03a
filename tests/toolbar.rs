//! Toolbar Controller tests
//!
//! Clicks with prompted input: links, images, tables, video, colors, fonts.

mod common;

use common::{count, last, recording_editor};
use richpad::messages::SurfaceMsg;
use richpad::model::{Block, Position};
use richpad::toolbar::{
    visible_actions, ActionId, CancelPrompt, ScriptedPrompt, FONT_FAMILY_PROMPT, FONT_SIZE_PROMPT,
    LINK_TEXT_PROMPT, LINK_URL_PROMPT,
};

// ========================================================================
// Link
// ========================================================================

#[test]
fn test_cancelled_link_prompt_changes_nothing() {
    let (mut editor, log) = recording_editor("<p>hello</p>");
    editor.exec("selectAll", None);
    let before = editor.content();
    let notified = count(&log);

    assert!(!editor.click(ActionId::Link, &mut CancelPrompt));
    assert!(!editor.click(ActionId::Link, &mut ScriptedPrompt::new([""])));
    assert_eq!(editor.content(), before);
    assert_eq!(count(&log), notified);
}

#[test]
fn test_link_wraps_selection() {
    let (mut editor, log) = recording_editor("<p>our services</p>");
    editor.input(SurfaceMsg::SetSelection {
        anchor: Position::new(0, 4),
        head: Position::new(0, 12),
    });
    let mut prompt = ScriptedPrompt::new(["/services"]);
    assert!(editor.click(ActionId::Link, &mut prompt));
    assert_eq!(prompt.asked(), [LINK_URL_PROMPT]);
    assert_eq!(
        last(&log).as_deref(),
        Some(r#"<p>our <a href="/services">services</a></p>"#)
    );
}

#[test]
fn test_link_without_selection_inserts_anchor_with_text() {
    let (mut editor, _) = recording_editor("");
    let mut prompt = ScriptedPrompt::new(["https://example.com", "our site"]);
    editor.click(ActionId::Link, &mut prompt);
    assert_eq!(prompt.asked(), [LINK_URL_PROMPT, LINK_TEXT_PROMPT]);
    assert_eq!(
        editor.content(),
        r#"<p><a href="https://example.com">our site</a></p>"#
    );
}

// ========================================================================
// Image and table
// ========================================================================

#[test]
fn test_image_prompt() {
    let (mut editor, log) = recording_editor("");
    assert!(editor.click(
        ActionId::Image,
        &mut ScriptedPrompt::new(["https://cdn.test/a.png"])
    ));
    assert_eq!(
        last(&log).as_deref(),
        Some(r#"<p><img src="https://cdn.test/a.png"></p>"#)
    );
    assert!(!editor.click(ActionId::Image, &mut CancelPrompt));
    assert_eq!(count(&log), 1);
}

#[test]
fn test_two_by_two_table_has_four_empty_cells() {
    let (mut editor, log) = recording_editor("");
    assert!(editor.click(ActionId::Table, &mut ScriptedPrompt::new(["2", "2"])));

    let tables: Vec<_> = editor
        .model()
        .surface
        .document()
        .blocks
        .iter()
        .filter_map(|block| match block {
            Block::Table(table) => Some(table),
            _ => None,
        })
        .collect();
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].cell_count(), 4);
    assert!(tables[0].cells().all(|cell| cell.is_empty()));
    assert!(tables[0].bordered);

    let content = last(&log).unwrap();
    assert_eq!(content.matches("<td").count(), 4);
    assert!(content.contains("border: 1px solid"));
}

#[test]
fn test_table_splits_paragraph_at_caret() {
    let (mut editor, _) = recording_editor("<p>beforeafter</p>");
    editor.input(SurfaceMsg::SetCaret(Position::new(0, 6)));
    editor.click(ActionId::Table, &mut ScriptedPrompt::new(["1", "2"]));
    let content = editor.content();
    assert!(content.starts_with("<p>before</p><table"));
    assert!(content.ends_with("</table><p>after</p>"));
}

#[test]
fn test_invalid_table_dimensions_abandon() {
    let (mut editor, log) = recording_editor("<p>x</p>");
    for answers in [["two", "2"], ["0", "2"], ["2", "-1"], ["1000", "1"]] {
        assert!(!editor.click(ActionId::Table, &mut ScriptedPrompt::new(answers)));
    }
    assert_eq!(count(&log), 0);
}

// ========================================================================
// Video
// ========================================================================

#[test]
fn test_youtube_watch_url_becomes_embed() {
    let (mut editor, log) = recording_editor("");
    editor.click(
        ActionId::Video,
        &mut ScriptedPrompt::new(["https://www.youtube.com/watch?v=ABC123"]),
    );
    let content = last(&log).unwrap();
    assert!(content.contains("ABC123"));
    assert!(content.contains(r#"<iframe src="https://www.youtube.com/embed/ABC123""#));
}

#[test]
fn test_vimeo_and_direct_video() {
    let (mut editor, _) = recording_editor("");
    editor.click(
        ActionId::Video,
        &mut ScriptedPrompt::new(["https://vimeo.com/123456"]),
    );
    assert!(editor
        .content()
        .contains("https://player.vimeo.com/video/123456"));

    let (mut editor, _) = recording_editor("");
    editor.click(
        ActionId::Video,
        &mut ScriptedPrompt::new(["https://cdn.test/intro.mp4"]),
    );
    assert!(editor
        .content()
        .contains(r#"<video src="https://cdn.test/intro.mp4" controls></video>"#));
}

// ========================================================================
// Colors and fonts
// ========================================================================

#[test]
fn test_color_prompts() {
    let (mut editor, log) = recording_editor("<p>tone</p>");
    editor.exec("selectAll", None);
    editor.click(ActionId::TextColor, &mut ScriptedPrompt::new(["rgb(10, 20, 30)"]));
    assert_eq!(
        editor.content(),
        r#"<p><span style="color: rgb(10, 20, 30);">tone</span></p>"#
    );
    let notified = count(&log);
    assert!(!editor.click(
        ActionId::BackgroundColor,
        &mut ScriptedPrompt::new(["\"><script>"])
    ));
    assert_eq!(count(&log), notified);
}

#[test]
fn test_font_size_applies_to_selection_and_sticks_for_typing() {
    let (mut editor, _) = recording_editor("<p>ab</p>");
    editor.input(SurfaceMsg::SetSelection {
        anchor: Position::new(0, 0),
        head: Position::new(0, 1),
    });
    assert!(editor.set_font_size("24px"));
    assert_eq!(
        editor.content(),
        r#"<p><span style="font-size: 24px;">a</span>b</p>"#
    );

    editor.input(SurfaceMsg::MoveCaretDocumentEnd);
    editor.type_text("c");
    assert_eq!(
        editor.content(),
        r#"<p><span style="font-size: 24px;">a</span>b<span style="font-size: 24px;">c</span></p>"#
    );
}

#[test]
fn test_font_family_on_caret_only_affects_new_text() {
    let (mut editor, _) = recording_editor("<p>old</p>");
    editor.set_font_family("Verdana");
    assert_eq!(editor.content(), "<p>old</p>");
    editor.type_text(" new");
    assert_eq!(
        editor.content(),
        r#"<p>old<span style="font-family: Verdana;"> new</span></p>"#
    );
}

#[test]
fn test_font_family_control_prompts_for_a_configured_choice() {
    let (mut editor, log) = recording_editor("<p>Hello world</p>");
    assert!(editor
        .toolbar()
        .iter()
        .any(|a| a.id == ActionId::FontFamily));
    editor.input(SurfaceMsg::SetSelection {
        anchor: Position::new(0, 0),
        head: Position::new(0, 5),
    });

    assert!(!editor.click(ActionId::FontFamily, &mut CancelPrompt));
    assert!(!editor.click(ActionId::FontFamily, &mut ScriptedPrompt::new([""])));
    assert!(!editor.click(ActionId::FontFamily, &mut ScriptedPrompt::new(["Comic Neue"])));
    assert_eq!(editor.content(), "<p>Hello world</p>");
    assert_eq!(count(&log), 0);

    let mut prompt = ScriptedPrompt::new(["Georgia"]);
    assert!(editor.click(ActionId::FontFamily, &mut prompt));
    assert_eq!(prompt.asked(), [FONT_FAMILY_PROMPT]);
    assert_eq!(count(&log), 1);
    assert_eq!(
        last(&log).as_deref(),
        Some(r#"<p><span style="font-family: Georgia;">Hello</span> world</p>"#)
    );
    assert_eq!(
        editor.model().session.font_family.as_deref(),
        Some("Georgia")
    );
}

#[test]
fn test_font_size_control_applies_to_partial_selection() {
    let (mut editor, _) = recording_editor("<p>abc</p>");
    editor.input(SurfaceMsg::SetSelection {
        anchor: Position::new(0, 1),
        head: Position::new(0, 2),
    });
    let mut prompt = ScriptedPrompt::new(["32PX"]);
    assert!(editor.click(ActionId::FontSize, &mut prompt));
    assert_eq!(prompt.asked(), [FONT_SIZE_PROMPT]);
    assert_eq!(
        editor.content(),
        r#"<p>a<span style="font-size: 32px;">b</span>c</p>"#
    );
}

#[test]
fn test_quoted_font_family_is_accepted() {
    let (mut editor, _) = recording_editor("<p>abc</p>");
    editor.exec("selectAll", None);
    assert!(editor.set_font_family("\"Times New Roman\""));
    assert_eq!(
        editor.content(),
        r#"<p><span style="font-family: 'Times New Roman';">abc</span></p>"#
    );
}

// ========================================================================
// Registry and panel
// ========================================================================

#[test]
fn test_more_tools_toggle_is_local_state() {
    let (mut editor, log) = recording_editor("<p>x</p>");
    let primary = editor.toolbar().len();
    assert!(!editor.click(ActionId::MoreTools, &mut CancelPrompt));
    assert!(editor.toolbar().len() > primary);
    assert!(editor.toolbar().iter().any(|a| a.id == ActionId::Undo));
    assert_eq!(count(&log), 0);
    assert_eq!(
        visible_actions(&editor.model().session).len(),
        editor.toolbar().len()
    );
}

#[test]
fn test_active_state_follows_selection() {
    let (mut editor, _) = recording_editor("<ul><li><b>item</b></li></ul>");
    editor.exec("selectAll", None);
    let active: Vec<ActionId> = editor
        .toolbar()
        .iter()
        .filter(|a| a.is_active(&editor.model().surface))
        .map(|a| a.id)
        .collect();
    assert!(active.contains(&ActionId::Bold));
    assert!(active.contains(&ActionId::BulletList));
    assert!(active.contains(&ActionId::AlignLeft));
    assert!(!active.contains(&ActionId::Italic));
}
