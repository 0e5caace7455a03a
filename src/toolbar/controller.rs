//! Turns a toolbar click into an editor message, prompting where needed

use tracing::debug;

use super::prompt::Prompt;
use super::{ActionOp, AuxInput, ToolbarAction};
use crate::embed::resolve_video;
use crate::messages::{Msg, ToolbarMsg};
use crate::model::style::sanitize_css_value;
use crate::model::{EditorModel, StyleProperty};
use crate::operation::Operation;

pub const LINK_URL_PROMPT: &str = "Enter URL:";
pub const LINK_TEXT_PROMPT: &str = "Enter link text:";
pub const IMAGE_URL_PROMPT: &str = "Enter image URL:";
const VIDEO_URL_PROMPT: &str = "Enter video URL (YouTube, Vimeo or a direct link):";
const TABLE_ROWS_PROMPT: &str = "Number of rows:";
const TABLE_COLS_PROMPT: &str = "Number of columns:";
pub const FONT_FAMILY_PROMPT: &str = "Font family:";
pub const FONT_SIZE_PROMPT: &str = "Font size:";

/// Ask and keep only a non-blank answer. No default is offered, so an
/// empty answer abandons the action.
fn ask_nonempty(prompt: &mut dyn Prompt, message: &str) -> Option<String> {
    match prompt.ask(message, "") {
        Some(answer) if !answer.trim().is_empty() => Some(answer.trim().to_string()),
        Some(_) => {
            debug!(message, "prompt answered empty, abandoning");
            None
        }
        None => {
            debug!(message, "prompt cancelled");
            None
        }
    }
}

fn ask_count(prompt: &mut dyn Prompt, message: &str, max: usize) -> Option<usize> {
    let answer = ask_nonempty(prompt, message)?;
    match answer.parse::<usize>() {
        Ok(n) if (1..=max).contains(&n) => Some(n),
        _ => {
            debug!(%answer, max, "rejected table dimension");
            None
        }
    }
}

fn color_prompt(property: StyleProperty) -> &'static str {
    match property {
        StyleProperty::Background => "Enter background color:",
        _ => "Enter text color:",
    }
}

/// Ask for one of `choices`. Quotes around the answer are ignored and the
/// match is case-insensitive; the configured spelling is returned.
fn ask_choice(prompt: &mut dyn Prompt, message: &str, choices: &[String]) -> Option<String> {
    let answer = ask_nonempty(prompt, message)?;
    let wanted = answer.trim_matches(&['"', '\''][..]).trim();
    let choice = choices.iter().find(|c| c.eq_ignore_ascii_case(wanted)).cloned();
    if choice.is_none() {
        debug!(%answer, ?choices, "answer is not an offered choice");
    }
    choice
}

/// Resolve a click on `action` into the message it dispatches.
///
/// `None` means the action was abandoned: a prompt was cancelled or
/// answered with nothing usable. Abandoned actions leave the document alone.
pub fn resolve_action(
    action: &ToolbarAction,
    model: &EditorModel,
    prompt: &mut dyn Prompt,
) -> Option<Msg> {
    match (action.op, action.input) {
        (ActionOp::ToggleMoreTools, _) => Some(Msg::Toolbar(ToolbarMsg::ToggleMoreTools)),
        (ActionOp::Exec { command, arg }, AuxInput::None) => Some(Msg::exec(command, arg)),
        (ActionOp::Exec { command, .. }, AuxInput::ImageUrl) => {
            let url = ask_nonempty(prompt, IMAGE_URL_PROMPT)?;
            Some(Msg::exec(command, Some(&url)))
        }
        (_, AuxInput::Link) => {
            let url = ask_nonempty(prompt, LINK_URL_PROMPT)?;
            if !model.surface.selection().is_empty() {
                return Some(Msg::Command(Operation::CreateLink(url)));
            }
            let text = ask_nonempty(prompt, LINK_TEXT_PROMPT)?;
            Some(Msg::Command(Operation::InsertLink { url, text }))
        }
        (_, AuxInput::TableSize) => {
            let rows = ask_count(prompt, TABLE_ROWS_PROMPT, model.config.table_max_rows)?;
            let cols = ask_count(prompt, TABLE_COLS_PROMPT, model.config.table_max_cols)?;
            Some(Msg::Command(Operation::InsertTable { rows, cols }))
        }
        (_, AuxInput::VideoUrl) => {
            let url = ask_nonempty(prompt, VIDEO_URL_PROMPT)?;
            let embed = resolve_video(&url, model.config.video_width, model.config.video_height)?;
            Some(Msg::Command(Operation::InsertEmbed(embed)))
        }
        (_, AuxInput::Color(property)) => {
            let answer = ask_nonempty(prompt, color_prompt(property))?;
            let Some(color) = sanitize_css_value(&answer) else {
                debug!(%answer, "rejected color");
                return None;
            };
            Some(Msg::Command(Operation::SetStyle(property, color)))
        }
        (_, AuxInput::Choice(property)) => {
            let config = &model.config;
            let msg = match property {
                StyleProperty::FontFamily => ToolbarMsg::SetFontFamily(ask_choice(
                    prompt,
                    FONT_FAMILY_PROMPT,
                    &config.font_families,
                )?),
                StyleProperty::FontSize => ToolbarMsg::SetFontSize(ask_choice(
                    prompt,
                    FONT_SIZE_PROMPT,
                    &config.font_sizes,
                )?),
                StyleProperty::Color | StyleProperty::Background => {
                    debug!(action = action.identifier, "no choice list for property");
                    return None;
                }
            };
            Some(Msg::Toolbar(msg))
        }
        (ActionOp::Insert, AuxInput::None | AuxInput::ImageUrl) => {
            debug!(action = action.identifier, "action has nothing to run");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Embed, Position};
    use crate::toolbar::{action, ActionId, CancelPrompt, ScriptedPrompt, StdioPrompt};

    fn resolve(id: ActionId, model: &EditorModel, prompt: &mut dyn Prompt) -> Option<Msg> {
        let action = action(id).expect("registered action");
        resolve_action(action, model, prompt)
    }

    #[test]
    fn test_plain_action_needs_no_prompt() {
        let model = EditorModel::default();
        let mut prompt = ScriptedPrompt::default();
        assert_eq!(
            resolve(ActionId::Bold, &model, &mut prompt),
            Some(Msg::exec("bold", None))
        );
        assert_eq!(
            resolve(ActionId::Quote, &model, &mut prompt),
            Some(Msg::exec("formatBlock", Some("blockquote")))
        );
        assert!(prompt.asked().is_empty());
    }

    #[test]
    fn test_link_with_selection_asks_only_url() {
        let mut model = EditorModel::default();
        model.surface.load("<p>docs</p>");
        model.surface.select_all();
        let mut prompt = ScriptedPrompt::new(["https://docs.test"]);
        assert_eq!(
            resolve(ActionId::Link, &model, &mut prompt),
            Some(Msg::Command(Operation::CreateLink("https://docs.test".into())))
        );
        assert_eq!(prompt.asked(), [LINK_URL_PROMPT]);
    }

    #[test]
    fn test_link_without_selection_asks_for_text() {
        let model = EditorModel::default();
        let mut prompt = ScriptedPrompt::new(["https://a.test", "A"]);
        assert_eq!(
            resolve(ActionId::Link, &model, &mut prompt),
            Some(Msg::Command(Operation::InsertLink {
                url: "https://a.test".into(),
                text: "A".into()
            }))
        );
    }

    #[test]
    fn test_cancel_and_blank_abandon() {
        let model = EditorModel::default();
        assert_eq!(resolve(ActionId::Link, &model, &mut CancelPrompt), None);
        assert_eq!(
            resolve(ActionId::Image, &model, &mut ScriptedPrompt::new(["   "])),
            None
        );
        assert_eq!(
            resolve(ActionId::Link, &model, &mut ScriptedPrompt::new(["u"]).then_cancel()),
            None
        );
    }

    #[test]
    fn test_table_dimensions_are_validated() {
        let mut model = EditorModel::default();
        model.surface.set_caret(Position::zero());
        assert_eq!(
            resolve(ActionId::Table, &model, &mut ScriptedPrompt::new(["2", "3"])),
            Some(Msg::Command(Operation::InsertTable { rows: 2, cols: 3 }))
        );
        for bad in [["0", "2"], ["x", "2"], ["2", "999"]] {
            assert_eq!(
                resolve(ActionId::Table, &model, &mut ScriptedPrompt::new(bad)),
                None
            );
        }
    }

    #[test]
    fn test_video_uses_configured_size() {
        let mut model = EditorModel::default();
        model.config.video_width = 640;
        model.config.video_height = 360;
        let msg = resolve(
            ActionId::Video,
            &model,
            &mut ScriptedPrompt::new(["https://youtu.be/ABC123"]),
        );
        assert_eq!(
            msg,
            Some(Msg::Command(Operation::InsertEmbed(Embed::Frame {
                src: "https://www.youtube.com/embed/ABC123".into(),
                width: 640,
                height: 360,
            })))
        );
    }

    #[test]
    fn test_unsafe_color_is_treated_as_empty() {
        let model = EditorModel::default();
        assert_eq!(
            resolve(
                ActionId::TextColor,
                &model,
                &mut ScriptedPrompt::new(["red; position: fixed"])
            ),
            None
        );
        assert_eq!(
            resolve(ActionId::BackgroundColor, &model, &mut ScriptedPrompt::new(["#ff0"])),
            Some(Msg::Command(Operation::SetStyle(
                StyleProperty::Background,
                "#ff0".into()
            )))
        );
    }

    #[test]
    fn test_font_pickers_offer_configured_choices() {
        let model = EditorModel::default();
        let mut prompt = ScriptedPrompt::new(["\"times new roman\""]);
        assert_eq!(
            resolve(ActionId::FontFamily, &model, &mut prompt),
            Some(Msg::Toolbar(ToolbarMsg::SetFontFamily(
                "Times New Roman".into()
            )))
        );
        assert_eq!(prompt.asked(), [FONT_FAMILY_PROMPT]);

        assert_eq!(
            resolve(ActionId::FontSize, &model, &mut ScriptedPrompt::new(["18px"])),
            Some(Msg::Toolbar(ToolbarMsg::SetFontSize("18px".into())))
        );
        assert_eq!(
            resolve(ActionId::FontSize, &model, &mut ScriptedPrompt::new(["17px"])),
            None
        );
        assert_eq!(resolve(ActionId::FontFamily, &model, &mut CancelPrompt), None);
    }

    #[test]
    fn test_empty_stdin_line_abandons_instead_of_defaulting() {
        let model = EditorModel::default();
        let mut output = Vec::new();
        let mut prompt = StdioPrompt::new(b"\n" as &[u8], &mut output);
        assert_eq!(resolve(ActionId::Table, &model, &mut prompt), None);

        let mut output = Vec::new();
        let mut prompt = StdioPrompt::new(b"https://a.test\n\n" as &[u8], &mut output);
        assert_eq!(resolve(ActionId::Link, &model, &mut prompt), None);
    }
}
