//! Editing scripts
//!
//! A script is a YAML (or JSON) list of steps replayed against an editor,
//! the way a user would drive it: typing, keys, commands and toolbar clicks.
//!
//! ```yaml
//! steps:
//!   - type: "Hello"
//!   - key: select-all
//!   - exec: bold
//!   - exec: { command: formatBlock, arg: h2 }
//!   - click: { action: link, answers: ["https://example.com"] }
//!   - blur
//! ```

use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::editor::RichTextEditor;
use crate::messages::{Direction, SurfaceMsg};
use crate::model::Position;
use crate::toolbar::{find_action, Prompt, ScriptedPrompt};

/// Root structure of a script file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Script {
    /// Replaces the editor's value before the first step
    #[serde(default)]
    pub value: Option<String>,
    pub steps: Vec<Step>,
}

/// A command identifier, optionally with an argument
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ExecStep {
    Name(String),
    WithArg {
        command: String,
        #[serde(default)]
        arg: Option<String>,
    },
}

/// One scripted user interaction
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    Type(String),
    Key(String),
    Exec(ExecStep),
    /// Place the caret at `[block, offset]`
    Caret([usize; 2]),
    Select {
        anchor: [usize; 2],
        head: [usize; 2],
    },
    /// Click a toolbar action. Without `answers`, the runner's fallback
    /// prompt is asked.
    Click {
        action: String,
        #[serde(default)]
        answers: Option<Vec<String>>,
        /// Cancel the prompt after the answers run out
        #[serde(default)]
        cancel: bool,
    },
    FontFamily(String),
    FontSize(String),
    SetValue(String),
    Focus,
    Blur,
}

/// Named keys a script can press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    ShiftEnter,
    Backspace,
    Delete,
    Left,
    Right,
    ShiftLeft,
    ShiftRight,
    WordLeft,
    WordRight,
    ShiftWordLeft,
    ShiftWordRight,
    Home,
    End,
    SelectAll,
}

impl FromStr for Key {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s.trim().to_ascii_lowercase().as_str() {
            "enter" | "return" => Key::Enter,
            "shift-enter" | "shift+enter" => Key::ShiftEnter,
            "backspace" => Key::Backspace,
            "delete" | "del" => Key::Delete,
            "left" => Key::Left,
            "right" => Key::Right,
            "shift-left" | "shift+left" => Key::ShiftLeft,
            "shift-right" | "shift+right" => Key::ShiftRight,
            "word-left" | "alt+left" => Key::WordLeft,
            "word-right" | "alt+right" => Key::WordRight,
            "shift-word-left" | "shift+alt+left" => Key::ShiftWordLeft,
            "shift-word-right" | "shift+alt+right" => Key::ShiftWordRight,
            "home" => Key::Home,
            "end" => Key::End,
            "select-all" | "cmd+a" | "ctrl+a" => Key::SelectAll,
            _ => return Err(ScriptError::InvalidKey(s.to_string())),
        };
        Ok(key)
    }
}

impl Key {
    pub fn to_msg(self) -> SurfaceMsg {
        match self {
            Key::Enter => SurfaceMsg::InsertParagraph,
            Key::ShiftEnter => SurfaceMsg::InsertLineBreak,
            Key::Backspace => SurfaceMsg::DeleteBackward,
            Key::Delete => SurfaceMsg::DeleteForward,
            Key::Left => SurfaceMsg::MoveCaret(Direction::Left),
            Key::Right => SurfaceMsg::MoveCaret(Direction::Right),
            Key::ShiftLeft => SurfaceMsg::MoveCaretWithSelection(Direction::Left),
            Key::ShiftRight => SurfaceMsg::MoveCaretWithSelection(Direction::Right),
            Key::WordLeft => SurfaceMsg::MoveCaretWord(Direction::Left),
            Key::WordRight => SurfaceMsg::MoveCaretWord(Direction::Right),
            Key::ShiftWordLeft => SurfaceMsg::MoveCaretWordWithSelection(Direction::Left),
            Key::ShiftWordRight => SurfaceMsg::MoveCaretWordWithSelection(Direction::Right),
            Key::Home => SurfaceMsg::MoveCaretDocumentStart,
            Key::End => SurfaceMsg::MoveCaretDocumentEnd,
            Key::SelectAll => SurfaceMsg::SelectAll,
        }
    }
}

/// Errors that can occur when loading or running scripts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    IoError(String),
    ParseError(String),
    InvalidKey(String),
    UnknownAction(String),
}

impl std::fmt::Display for ScriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScriptError::IoError(e) => write!(f, "IO error: {}", e),
            ScriptError::ParseError(e) => write!(f, "Parse error: {}", e),
            ScriptError::InvalidKey(k) => write!(f, "Invalid key: {}", k),
            ScriptError::UnknownAction(a) => write!(f, "Unknown toolbar action: {}", a),
        }
    }
}

impl std::error::Error for ScriptError {}

/// Load a script, choosing the format by file extension (`.json` or YAML)
pub fn load_script_file(path: &Path) -> Result<Script, ScriptError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| ScriptError::IoError(e.to_string()))?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if is_json {
        parse_script_json(&content)
    } else {
        parse_script_yaml(&content)
    }
}

pub fn parse_script_yaml(yaml: &str) -> Result<Script, ScriptError> {
    serde_yaml::from_str(yaml).map_err(|e| ScriptError::ParseError(e.to_string()))
}

pub fn parse_script_json(json: &str) -> Result<Script, ScriptError> {
    serde_json::from_str(json).map_err(|e| ScriptError::ParseError(e.to_string()))
}

/// Parse a single step, as typed at an interactive prompt
pub fn parse_step(line: &str) -> Result<Step, ScriptError> {
    serde_yaml::from_str(line).map_err(|e| ScriptError::ParseError(e.to_string()))
}

fn position([block, offset]: [usize; 2]) -> Position {
    Position::new(block, offset)
}

/// Run one step. Returns true when the editor notified its owner.
pub fn run_step(
    editor: &mut RichTextEditor,
    step: &Step,
    fallback: &mut dyn Prompt,
) -> Result<bool, ScriptError> {
    tracing::debug!(?step, "running script step");
    let notified = match step {
        Step::Type(text) => editor.type_text(text),
        Step::Key(name) => editor.input(name.parse::<Key>()?.to_msg()),
        Step::Exec(ExecStep::Name(command)) => editor.exec(command, None),
        Step::Exec(ExecStep::WithArg { command, arg }) => editor.exec(command, arg.as_deref()),
        Step::Caret(at) => editor.input(SurfaceMsg::SetCaret(position(*at))),
        Step::Select { anchor, head } => editor.input(SurfaceMsg::SetSelection {
            anchor: position(*anchor),
            head: position(*head),
        }),
        Step::Click {
            action,
            answers,
            cancel,
        } => {
            let action =
                find_action(action).ok_or_else(|| ScriptError::UnknownAction(action.clone()))?;
            match answers {
                Some(answers) => {
                    let mut prompt = ScriptedPrompt::new(answers.iter().cloned());
                    if *cancel {
                        prompt = prompt.then_cancel();
                    }
                    editor.click_action(action, &mut prompt)
                }
                None => editor.click_action(action, fallback),
            }
        }
        Step::FontFamily(family) => editor.set_font_family(family),
        Step::FontSize(size) => editor.set_font_size(size),
        Step::SetValue(value) => {
            editor.set_value(value);
            false
        }
        Step::Focus => {
            editor.focus();
            false
        }
        Step::Blur => editor.blur(),
    };
    Ok(notified)
}

impl Script {
    /// Replay every step. Returns the number of change notifications.
    pub fn run(
        &self,
        editor: &mut RichTextEditor,
        fallback: &mut dyn Prompt,
    ) -> Result<usize, ScriptError> {
        if let Some(value) = &self.value {
            editor.set_value(value);
        }
        let mut notifications = 0;
        for step in &self.steps {
            if run_step(editor, step, fallback)? {
                notifications += 1;
            }
        }
        Ok(notifications)
    }
}
