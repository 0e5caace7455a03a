//! Command Executor: resolve, apply, refocus, notify

use tracing::debug;

use super::surface::type_text;
use super::sync::notify;
use crate::commands::Cmd;
use crate::editable::EditableSurface;
use crate::model::{EditorModel, EditorSession, TextKind};
use crate::operation::Operation;

/// Execute a command given by identifier. Unknown identifiers and missing
/// arguments are ignored without a notification.
pub fn update_exec(model: &mut EditorModel, command: &str, arg: Option<&str>) -> Option<Cmd> {
    match Operation::from_command(command, arg) {
        Ok(op) => update_command(model, op),
        Err(err) => {
            debug!(command, %err, "ignoring command");
            None
        }
    }
}

/// Apply a resolved operation, restore focus and notify exactly once
pub fn update_command(model: &mut EditorModel, op: Operation) -> Option<Cmd> {
    let changed = apply_operation(&mut model.surface, &model.session, &op);
    model.surface.focus();
    debug!(op = op.name(), changed, "executed command");
    Some(notify(model))
}

/// Apply `op` to the surface; true when the document changed
pub fn apply_operation(
    surface: &mut EditableSurface,
    session: &EditorSession,
    op: &Operation,
) -> bool {
    match op {
        Operation::ToggleStyle(flag) => surface.toggle_style(*flag),
        Operation::List { ordered } => surface.set_block_kind(
            TextKind::ListItem {
                ordered: *ordered,
            },
            true,
        ),
        Operation::FormatBlock(kind) => surface.set_block_kind(*kind, true),
        Operation::Align(align) => surface.set_alignment(*align),
        Operation::CreateLink(url) => surface.create_link(url),
        Operation::InsertLink { url, text } => surface.insert_link(url, text),
        Operation::Unlink => surface.unlink(),
        Operation::InsertImage(src) => surface.insert_image(src, None),
        Operation::InsertHtml(markup) => surface.insert_html(markup),
        Operation::InsertText(text) => type_text(surface, session, text),
        Operation::InsertParagraph => surface.insert_paragraph(),
        Operation::InsertLineBreak => surface.insert_line_break(),
        Operation::DeleteBackward => surface.delete_backward(),
        Operation::DeleteForward => surface.delete_forward(),
        Operation::SetStyle(property, value) => {
            surface.set_style_property(*property, Some(value.clone()))
        }
        Operation::RemoveFormat => surface.remove_format(),
        Operation::SelectAll => {
            surface.select_all();
            false
        }
        Operation::InsertTable { rows, cols } => surface.insert_table(*rows, *cols),
        Operation::InsertEmbed(embed) => surface.insert_embed(embed.clone()),
        Operation::Undo => surface.undo(),
        Operation::Redo => surface.redo(),
    }
}
