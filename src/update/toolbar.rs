//! Toolbar state: font pickers and the "more tools" panel

use tracing::debug;

use super::command::update_command;
use crate::commands::Cmd;
use crate::messages::ToolbarMsg;
use crate::model::style::sanitize_css_value;
use crate::model::{EditorModel, StyleProperty};
use crate::operation::Operation;

/// Handle toolbar messages
pub fn update_toolbar(model: &mut EditorModel, msg: ToolbarMsg) -> Option<Cmd> {
    match msg {
        ToolbarMsg::SetFontFamily(family) => {
            let Some(family) = sanitize_css_value(&family) else {
                debug!(%family, "rejected font family");
                return None;
            };
            model.session.font_family = Some(family.clone());
            update_command(model, Operation::SetStyle(StyleProperty::FontFamily, family))
        }
        ToolbarMsg::SetFontSize(size) => {
            let Some(size) = sanitize_css_value(&size) else {
                debug!(%size, "rejected font size");
                return None;
            };
            model.session.font_size = Some(size.clone());
            update_command(model, Operation::SetStyle(StyleProperty::FontSize, size))
        }
        ToolbarMsg::ToggleMoreTools => {
            model.session.toggle_more_tools();
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Position;

    #[test]
    fn test_font_size_applies_to_selection_only() {
        let mut model = EditorModel::default();
        model.surface.load("<p>abc</p>");
        model
            .surface
            .set_selection(Position::new(0, 0), Position::new(0, 1));
        let cmd = update_toolbar(&mut model, ToolbarMsg::SetFontSize("18px".to_string()));
        assert_eq!(
            cmd,
            Some(Cmd::NotifyChange(
                r#"<p><span style="font-size: 18px;">a</span>bc</p>"#.to_string()
            ))
        );
        assert_eq!(model.session.font_size.as_deref(), Some("18px"));
    }

    #[test]
    fn test_toggle_more_tools_is_silent() {
        let mut model = EditorModel::default();
        assert_eq!(update_toolbar(&mut model, ToolbarMsg::ToggleMoreTools), None);
        assert!(model.session.more_tools_visible);
    }

    #[test]
    fn test_unsafe_font_is_rejected() {
        let mut model = EditorModel::default();
        let cmd = update_toolbar(
            &mut model,
            ToolbarMsg::SetFontFamily("x;}</style>".to_string()),
        );
        assert_eq!(cmd, None);
        assert_eq!(model.session.font_family, None);
    }
}
