//! Formatting operations and the command identifiers that name them
//!
//! Identifiers follow the `execCommand` vocabulary content-editable markup
//! is written against, so stored toolbar wiring keeps working unchanged.

use std::fmt;

use crate::model::style::sanitize_css_value;
use crate::model::{Alignment, Embed, StyleFlag, StyleProperty, TextKind};

/// A fully-resolved operation on the editable surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    ToggleStyle(StyleFlag),
    /// Toggle list items of the given kind
    List {
        ordered: bool,
    },
    /// Set the block kind, toggling back to paragraph
    FormatBlock(TextKind),
    Align(Alignment),
    /// Link the selection, or insert the URL as a link on a caret
    CreateLink(String),
    /// Insert a new link with its own display text
    InsertLink {
        url: String,
        text: String,
    },
    Unlink,
    InsertImage(String),
    InsertHtml(String),
    InsertText(String),
    InsertParagraph,
    InsertLineBreak,
    DeleteBackward,
    DeleteForward,
    SetStyle(StyleProperty, String),
    RemoveFormat,
    SelectAll,
    InsertTable {
        rows: usize,
        cols: usize,
    },
    InsertEmbed(Embed),
    Undo,
    Redo,
}

/// Why a command identifier could not be resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationError {
    /// Not a known identifier
    Unknown(String),
    /// A known identifier that needs an argument
    MissingArgument(&'static str),
    /// The argument is not acceptable for the identifier
    InvalidArgument {
        command: &'static str,
        value: String,
    },
}

impl fmt::Display for OperationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationError::Unknown(name) => write!(f, "unknown command '{}'", name),
            OperationError::MissingArgument(command) => {
                write!(f, "command '{}' needs an argument", command)
            }
            OperationError::InvalidArgument { command, value } => {
                write!(f, "invalid argument '{}' for command '{}'", value, command)
            }
        }
    }
}

impl std::error::Error for OperationError {}

/// Parse a `formatBlock` argument: `p`, `<h2>`, `blockquote`, ...
fn parse_block_kind(value: &str) -> Option<TextKind> {
    let tag = value
        .trim()
        .trim_start_matches('<')
        .trim_end_matches('>')
        .to_ascii_lowercase();
    match tag.as_str() {
        "p" | "div" => Some(TextKind::Paragraph),
        "blockquote" => Some(TextKind::Quote),
        "pre" => Some(TextKind::Code),
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => tag[1..].parse().ok().map(TextKind::Heading),
        _ => None,
    }
}

impl Operation {
    /// Resolve an identifier and optional argument
    pub fn from_command(command: &str, arg: Option<&str>) -> Result<Self, OperationError> {
        let arg = arg.filter(|a| !a.trim().is_empty());

        fn required<'a>(
            name: &'static str,
            arg: Option<&'a str>,
        ) -> Result<&'a str, OperationError> {
            arg.ok_or(OperationError::MissingArgument(name))
        }

        fn css(name: &'static str, arg: Option<&str>) -> Result<String, OperationError> {
            let value = required(name, arg)?;
            sanitize_css_value(value).ok_or_else(|| OperationError::InvalidArgument {
                command: name,
                value: value.to_string(),
            })
        }

        let op = match command {
            "bold" => Operation::ToggleStyle(StyleFlag::Bold),
            "italic" => Operation::ToggleStyle(StyleFlag::Italic),
            "underline" => Operation::ToggleStyle(StyleFlag::Underline),
            "strikeThrough" => Operation::ToggleStyle(StyleFlag::Strikethrough),
            "insertUnorderedList" => Operation::List { ordered: false },
            "insertOrderedList" => Operation::List { ordered: true },
            "formatBlock" => {
                let value = required("formatBlock", arg)?;
                let kind =
                    parse_block_kind(value).ok_or_else(|| OperationError::InvalidArgument {
                        command: "formatBlock",
                        value: value.to_string(),
                    })?;
                Operation::FormatBlock(kind)
            }
            "justifyLeft" => Operation::Align(Alignment::Left),
            "justifyCenter" => Operation::Align(Alignment::Center),
            "justifyRight" => Operation::Align(Alignment::Right),
            "justifyFull" => Operation::Align(Alignment::Justify),
            "createLink" => Operation::CreateLink(required("createLink", arg)?.trim().to_string()),
            "unlink" => Operation::Unlink,
            "insertImage" => {
                Operation::InsertImage(required("insertImage", arg)?.trim().to_string())
            }
            "insertHTML" => Operation::InsertHtml(required("insertHTML", arg)?.to_string()),
            "insertText" => Operation::InsertText(required("insertText", arg)?.to_string()),
            "insertParagraph" => Operation::InsertParagraph,
            "insertLineBreak" => Operation::InsertLineBreak,
            "delete" => Operation::DeleteBackward,
            "forwardDelete" => Operation::DeleteForward,
            "fontName" => Operation::SetStyle(StyleProperty::FontFamily, css("fontName", arg)?),
            "fontSize" => Operation::SetStyle(StyleProperty::FontSize, css("fontSize", arg)?),
            "foreColor" => Operation::SetStyle(StyleProperty::Color, css("foreColor", arg)?),
            "hiliteColor" | "backColor" => {
                Operation::SetStyle(StyleProperty::Background, css("backColor", arg)?)
            }
            "removeFormat" => Operation::RemoveFormat,
            "selectAll" => Operation::SelectAll,
            "undo" => Operation::Undo,
            "redo" => Operation::Redo,
            other => return Err(OperationError::Unknown(other.to_string())),
        };
        Ok(op)
    }

    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Operation::ToggleStyle(_) => "toggle_style",
            Operation::List { .. } => "list",
            Operation::FormatBlock(_) => "format_block",
            Operation::Align(_) => "align",
            Operation::CreateLink(_) => "create_link",
            Operation::InsertLink { .. } => "insert_link",
            Operation::Unlink => "unlink",
            Operation::InsertImage(_) => "insert_image",
            Operation::InsertHtml(_) => "insert_html",
            Operation::InsertText(_) => "insert_text",
            Operation::InsertParagraph => "insert_paragraph",
            Operation::InsertLineBreak => "insert_line_break",
            Operation::DeleteBackward => "delete_backward",
            Operation::DeleteForward => "delete_forward",
            Operation::SetStyle(..) => "set_style",
            Operation::RemoveFormat => "remove_format",
            Operation::SelectAll => "select_all",
            Operation::InsertTable { .. } => "insert_table",
            Operation::InsertEmbed(_) => "insert_embed",
            Operation::Undo => "undo",
            Operation::Redo => "redo",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_identifiers() {
        assert_eq!(
            Operation::from_command("bold", None),
            Ok(Operation::ToggleStyle(StyleFlag::Bold))
        );
        assert_eq!(
            Operation::from_command("insertOrderedList", None),
            Ok(Operation::List { ordered: true })
        );
        assert_eq!(
            Operation::from_command("justifyFull", None),
            Ok(Operation::Align(Alignment::Justify))
        );
    }

    #[test]
    fn test_format_block_arguments() {
        assert_eq!(
            Operation::from_command("formatBlock", Some("<H3>")),
            Ok(Operation::FormatBlock(TextKind::Heading(3)))
        );
        assert_eq!(
            Operation::from_command("formatBlock", Some("blockquote")),
            Ok(Operation::FormatBlock(TextKind::Quote))
        );
        assert!(matches!(
            Operation::from_command("formatBlock", Some("marquee")),
            Err(OperationError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_missing_and_unknown() {
        assert_eq!(
            Operation::from_command("createLink", Some("  ")),
            Err(OperationError::MissingArgument("createLink"))
        );
        assert_eq!(
            Operation::from_command("explode", None),
            Err(OperationError::Unknown("explode".to_string()))
        );
        // Identifiers are case-sensitive, like the DOM API
        assert!(Operation::from_command("BOLD", None).is_err());
    }

    #[test]
    fn test_color_arguments_are_sanitized() {
        assert_eq!(
            Operation::from_command("foreColor", Some("#336699")),
            Ok(Operation::SetStyle(StyleProperty::Color, "#336699".to_string()))
        );
        assert!(Operation::from_command("hiliteColor", Some("red;}")).is_err());
    }
}
