//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use crate::model::Position;
use crate::operation::Operation;

/// Direction for caret movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Content Synchronizer messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncMsg {
    /// The owner passed a (possibly unchanged) document value
    ExternalValue(String),
    /// The surface gained focus
    Focus,
    /// The surface lost focus
    Blur,
}

/// Native editing on the surface (keyboard and pointer input)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceMsg {
    // === Input ===
    /// Typed or pasted text
    InsertText(String),
    /// Enter
    InsertParagraph,
    /// Shift+Enter
    InsertLineBreak,
    /// Backspace
    DeleteBackward,
    /// Delete
    DeleteForward,

    // === Caret and Selection ===
    /// Move caret by one position
    MoveCaret(Direction),
    /// Move caret by word
    MoveCaretWord(Direction),
    /// Move caret with selection (Shift+Arrow)
    MoveCaretWithSelection(Direction),
    /// Move word with selection
    MoveCaretWordWithSelection(Direction),
    MoveCaretDocumentStart,
    MoveCaretDocumentEnd,
    /// Place the caret (click)
    SetCaret(Position),
    /// Select a range (drag)
    SetSelection { anchor: Position, head: Position },
    SelectAll,
}

/// Toolbar state messages that do not need a prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolbarMsg {
    /// Font family picked from the dropdown
    SetFontFamily(String),
    /// Font size picked from the dropdown
    SetFontSize(String),
    /// Show or hide the secondary actions
    ToggleMoreTools,
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    Sync(SyncMsg),
    Surface(SurfaceMsg),
    /// Execute a command by identifier
    Exec { command: String, arg: Option<String> },
    /// Execute an already-resolved operation
    Command(Operation),
    Toolbar(ToolbarMsg),
}

impl Msg {
    /// Convenience for [`Msg::Exec`]
    pub fn exec(command: &str, arg: Option<&str>) -> Self {
        Msg::Exec {
            command: command.to_string(),
            arg: arg.map(str::to_string),
        }
    }
}
