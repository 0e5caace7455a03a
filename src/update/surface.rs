//! Native editing on the surface: typing, Enter, Backspace, caret movement

use super::sync::notify;
use crate::commands::Cmd;
use crate::editable::EditableSurface;
use crate::messages::{Direction, SurfaceMsg};
use crate::model::{EditorModel, EditorSession};

/// Type text, filling in the session's font choices where the caret style
/// has no explicit value
pub fn type_text(surface: &mut EditableSurface, session: &EditorSession, text: &str) -> bool {
    let mut style = surface.caret_style();
    if style.font_family.is_none() {
        style.font_family = session.font_family.clone();
    }
    if style.font_size.is_none() {
        style.font_size = session.font_size.clone();
    }
    surface.insert_styled_text(text, style)
}

/// Handle surface messages. Only input that changes the document notifies.
pub fn update_surface(model: &mut EditorModel, msg: SurfaceMsg) -> Option<Cmd> {
    let surface = &mut model.surface;
    let changed = match msg {
        SurfaceMsg::InsertText(text) => {
            surface.focus();
            type_text(surface, &model.session, &text)
        }
        SurfaceMsg::InsertParagraph => {
            surface.focus();
            surface.insert_paragraph()
        }
        SurfaceMsg::InsertLineBreak => {
            surface.focus();
            surface.insert_line_break()
        }
        SurfaceMsg::DeleteBackward => {
            surface.focus();
            surface.delete_backward()
        }
        SurfaceMsg::DeleteForward => {
            surface.focus();
            surface.delete_forward()
        }

        SurfaceMsg::MoveCaret(Direction::Left) => {
            surface.move_left(false);
            false
        }
        SurfaceMsg::MoveCaret(Direction::Right) => {
            surface.move_right(false);
            false
        }
        SurfaceMsg::MoveCaretWord(Direction::Left) => {
            surface.move_word_left(false);
            false
        }
        SurfaceMsg::MoveCaretWord(Direction::Right) => {
            surface.move_word_right(false);
            false
        }
        SurfaceMsg::MoveCaretWithSelection(Direction::Left) => {
            surface.move_left(true);
            false
        }
        SurfaceMsg::MoveCaretWithSelection(Direction::Right) => {
            surface.move_right(true);
            false
        }
        SurfaceMsg::MoveCaretWordWithSelection(Direction::Left) => {
            surface.move_word_left(true);
            false
        }
        SurfaceMsg::MoveCaretWordWithSelection(Direction::Right) => {
            surface.move_word_right(true);
            false
        }
        SurfaceMsg::MoveCaretDocumentStart => {
            surface.move_document_start(false);
            false
        }
        SurfaceMsg::MoveCaretDocumentEnd => {
            surface.move_document_end(false);
            false
        }
        SurfaceMsg::SetCaret(pos) => {
            surface.focus();
            surface.set_caret(pos);
            false
        }
        SurfaceMsg::SetSelection { anchor, head } => {
            surface.focus();
            surface.set_selection(anchor, head);
            false
        }
        SurfaceMsg::SelectAll => {
            surface.select_all();
            false
        }
    };
    changed.then(|| notify(model))
}
