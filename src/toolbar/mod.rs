//! Toolbar Controller
//!
//! A static registry of toolbar actions, and the controller that turns a
//! click (plus any prompted input) into an editor message.

mod controller;
mod prompt;

pub use controller::{
    resolve_action, FONT_FAMILY_PROMPT, FONT_SIZE_PROMPT, IMAGE_URL_PROMPT, LINK_TEXT_PROMPT,
    LINK_URL_PROMPT,
};
pub use prompt::{CancelPrompt, Prompt, ScriptedPrompt, StdioPrompt};

use crate::editable::EditableSurface;
use crate::model::{Alignment, Block, EditorSession, StyleFlag, StyleProperty, TextKind};

/// Identifies a toolbar control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionId {
    // Inline styles
    Bold,
    Italic,
    Underline,
    Strikethrough,

    // Fonts
    FontFamily,
    FontSize,

    // Blocks
    BulletList,
    NumberedList,
    Quote,
    CodeBlock,

    // Alignment
    AlignLeft,
    AlignCenter,
    AlignRight,
    AlignJustify,

    // Insertions
    Link,
    Image,
    Table,
    Video,

    // Secondary
    Unlink,
    TextColor,
    BackgroundColor,
    RemoveFormat,
    Undo,
    Redo,

    MoreTools,
}

/// Input an action collects before it runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuxInput {
    None,
    /// URL, plus display text when nothing is selected
    Link,
    ImageUrl,
    /// Row and column counts
    TableSize,
    VideoUrl,
    Color(StyleProperty),
    /// One of the configured values for a font property
    Choice(StyleProperty),
}

/// What an action does once its input is collected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOp {
    /// Run a command identifier with an optional fixed argument
    Exec {
        command: &'static str,
        arg: Option<&'static str>,
    },
    /// Operations assembled from prompted input
    Insert,
    ToggleMoreTools,
}

/// A toolbar action descriptor
#[derive(Debug, Clone)]
pub struct ToolbarAction {
    pub id: ActionId,
    /// Stable identifier used by scripts
    pub identifier: &'static str,
    pub label: &'static str,
    pub op: ActionOp,
    pub input: AuxInput,
    /// Only shown while the "more tools" panel is open
    pub secondary: bool,
}

impl ToolbarAction {
    pub fn needs_input(&self) -> bool {
        self.input != AuxInput::None
    }

    /// Whether the control renders as pressed for the current caret/selection
    pub fn is_active(&self, surface: &EditableSurface) -> bool {
        let caret_kind = || {
            surface
                .document()
                .blocks
                .get(surface.caret().block)
                .and_then(Block::as_text)
                .map(|text| (text.kind, text.align))
        };
        match self.id {
            ActionId::Bold => surface.style_active(StyleFlag::Bold),
            ActionId::Italic => surface.style_active(StyleFlag::Italic),
            ActionId::Underline => surface.style_active(StyleFlag::Underline),
            ActionId::Strikethrough => surface.style_active(StyleFlag::Strikethrough),
            ActionId::BulletList => {
                matches!(caret_kind(), Some((TextKind::ListItem { ordered: false }, _)))
            }
            ActionId::NumberedList => {
                matches!(caret_kind(), Some((TextKind::ListItem { ordered: true }, _)))
            }
            ActionId::Quote => matches!(caret_kind(), Some((TextKind::Quote, _))),
            ActionId::CodeBlock => matches!(caret_kind(), Some((TextKind::Code, _))),
            ActionId::AlignLeft => matches!(caret_kind(), Some((_, Alignment::Left))),
            ActionId::AlignCenter => matches!(caret_kind(), Some((_, Alignment::Center))),
            ActionId::AlignRight => matches!(caret_kind(), Some((_, Alignment::Right))),
            ActionId::AlignJustify => matches!(caret_kind(), Some((_, Alignment::Justify))),
            _ => false,
        }
    }
}

const fn exec(command: &'static str) -> ActionOp {
    ActionOp::Exec { command, arg: None }
}

/// Static registry of all toolbar actions, in display order
pub static TOOLBAR_ACTIONS: &[ToolbarAction] = &[
    ToolbarAction {
        id: ActionId::Bold,
        identifier: "bold",
        label: "Bold",
        op: exec("bold"),
        input: AuxInput::None,
        secondary: false,
    },
    ToolbarAction {
        id: ActionId::Italic,
        identifier: "italic",
        label: "Italic",
        op: exec("italic"),
        input: AuxInput::None,
        secondary: false,
    },
    ToolbarAction {
        id: ActionId::Underline,
        identifier: "underline",
        label: "Underline",
        op: exec("underline"),
        input: AuxInput::None,
        secondary: false,
    },
    ToolbarAction {
        id: ActionId::Strikethrough,
        identifier: "strikethrough",
        label: "Strikethrough",
        op: exec("strikeThrough"),
        input: AuxInput::None,
        secondary: false,
    },
    ToolbarAction {
        id: ActionId::FontFamily,
        identifier: "font-family",
        label: "Font",
        op: ActionOp::Insert,
        input: AuxInput::Choice(StyleProperty::FontFamily),
        secondary: false,
    },
    ToolbarAction {
        id: ActionId::FontSize,
        identifier: "font-size",
        label: "Font Size",
        op: ActionOp::Insert,
        input: AuxInput::Choice(StyleProperty::FontSize),
        secondary: false,
    },
    ToolbarAction {
        id: ActionId::BulletList,
        identifier: "bullet-list",
        label: "Bullet List",
        op: exec("insertUnorderedList"),
        input: AuxInput::None,
        secondary: false,
    },
    ToolbarAction {
        id: ActionId::NumberedList,
        identifier: "numbered-list",
        label: "Numbered List",
        op: exec("insertOrderedList"),
        input: AuxInput::None,
        secondary: false,
    },
    ToolbarAction {
        id: ActionId::Quote,
        identifier: "quote",
        label: "Quote",
        op: ActionOp::Exec {
            command: "formatBlock",
            arg: Some("blockquote"),
        },
        input: AuxInput::None,
        secondary: false,
    },
    ToolbarAction {
        id: ActionId::CodeBlock,
        identifier: "code",
        label: "Code Block",
        op: ActionOp::Exec {
            command: "formatBlock",
            arg: Some("pre"),
        },
        input: AuxInput::None,
        secondary: false,
    },
    ToolbarAction {
        id: ActionId::AlignLeft,
        identifier: "align-left",
        label: "Align Left",
        op: exec("justifyLeft"),
        input: AuxInput::None,
        secondary: false,
    },
    ToolbarAction {
        id: ActionId::AlignCenter,
        identifier: "align-center",
        label: "Align Center",
        op: exec("justifyCenter"),
        input: AuxInput::None,
        secondary: false,
    },
    ToolbarAction {
        id: ActionId::AlignRight,
        identifier: "align-right",
        label: "Align Right",
        op: exec("justifyRight"),
        input: AuxInput::None,
        secondary: false,
    },
    ToolbarAction {
        id: ActionId::AlignJustify,
        identifier: "align-justify",
        label: "Justify",
        op: exec("justifyFull"),
        input: AuxInput::None,
        secondary: true,
    },
    ToolbarAction {
        id: ActionId::Link,
        identifier: "link",
        label: "Insert Link",
        op: ActionOp::Insert,
        input: AuxInput::Link,
        secondary: false,
    },
    ToolbarAction {
        id: ActionId::Image,
        identifier: "image",
        label: "Insert Image",
        op: exec("insertImage"),
        input: AuxInput::ImageUrl,
        secondary: false,
    },
    ToolbarAction {
        id: ActionId::Table,
        identifier: "table",
        label: "Insert Table",
        op: ActionOp::Insert,
        input: AuxInput::TableSize,
        secondary: false,
    },
    ToolbarAction {
        id: ActionId::Video,
        identifier: "video",
        label: "Insert Video",
        op: ActionOp::Insert,
        input: AuxInput::VideoUrl,
        secondary: false,
    },
    ToolbarAction {
        id: ActionId::Unlink,
        identifier: "unlink",
        label: "Remove Link",
        op: exec("unlink"),
        input: AuxInput::None,
        secondary: true,
    },
    ToolbarAction {
        id: ActionId::TextColor,
        identifier: "text-color",
        label: "Text Color",
        op: ActionOp::Insert,
        input: AuxInput::Color(StyleProperty::Color),
        secondary: true,
    },
    ToolbarAction {
        id: ActionId::BackgroundColor,
        identifier: "background-color",
        label: "Background Color",
        op: ActionOp::Insert,
        input: AuxInput::Color(StyleProperty::Background),
        secondary: true,
    },
    ToolbarAction {
        id: ActionId::RemoveFormat,
        identifier: "remove-format",
        label: "Clear Formatting",
        op: exec("removeFormat"),
        input: AuxInput::None,
        secondary: true,
    },
    ToolbarAction {
        id: ActionId::Undo,
        identifier: "undo",
        label: "Undo",
        op: exec("undo"),
        input: AuxInput::None,
        secondary: true,
    },
    ToolbarAction {
        id: ActionId::Redo,
        identifier: "redo",
        label: "Redo",
        op: exec("redo"),
        input: AuxInput::None,
        secondary: true,
    },
    ToolbarAction {
        id: ActionId::MoreTools,
        identifier: "more",
        label: "More Tools",
        op: ActionOp::ToggleMoreTools,
        input: AuxInput::None,
        secondary: false,
    },
];

/// Look up an action by id
pub fn action(id: ActionId) -> Option<&'static ToolbarAction> {
    TOOLBAR_ACTIONS.iter().find(|a| a.id == id)
}

/// Look up an action by its script identifier
pub fn find_action(identifier: &str) -> Option<&'static ToolbarAction> {
    TOOLBAR_ACTIONS.iter().find(|a| a.identifier == identifier)
}

/// Controls to render for the current session
pub fn visible_actions(session: &EditorSession) -> Vec<&'static ToolbarAction> {
    TOOLBAR_ACTIONS
        .iter()
        .filter(|a| !a.secondary || session.more_tools_visible)
        .collect()
}
