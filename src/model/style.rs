//! Character-level styling carried by every text run.

/// Inline formatting applied to a run of text.
///
/// `None` for the string-valued properties means "inherit", which the writer
/// renders as no declaration at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub font_family: Option<String>,
    pub font_size: Option<String>,
    pub color: Option<String>,
    pub background: Option<String>,
}

impl TextStyle {
    pub fn plain() -> Self {
        Self::default()
    }

    /// True when the run carries no formatting at all
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }

    /// True when the style needs a `<span style=...>` wrapper
    pub fn has_declarations(&self) -> bool {
        self.font_family.is_some()
            || self.font_size.is_some()
            || self.color.is_some()
            || self.background.is_some()
    }

    pub fn get(&self, flag: StyleFlag) -> bool {
        match flag {
            StyleFlag::Bold => self.bold,
            StyleFlag::Italic => self.italic,
            StyleFlag::Underline => self.underline,
            StyleFlag::Strikethrough => self.strikethrough,
        }
    }

    pub fn set(&mut self, flag: StyleFlag, on: bool) {
        match flag {
            StyleFlag::Bold => self.bold = on,
            StyleFlag::Italic => self.italic = on,
            StyleFlag::Underline => self.underline = on,
            StyleFlag::Strikethrough => self.strikethrough = on,
        }
    }

    /// Apply a single CSS declaration (`name: value`) to this style.
    ///
    /// Unknown properties are ignored.
    pub fn apply_declaration(&mut self, name: &str, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }
        match name.trim().to_ascii_lowercase().as_str() {
            "font-weight" => {
                self.bold = match value {
                    "bold" | "bolder" => true,
                    "normal" | "lighter" => false,
                    other => other.parse::<u32>().map(|w| w >= 600).unwrap_or(self.bold),
                }
            }
            "font-style" => self.italic = value == "italic" || value == "oblique",
            "text-decoration" | "text-decoration-line" => {
                if value.contains("underline") {
                    self.underline = true;
                }
                if value.contains("line-through") {
                    self.strikethrough = true;
                }
                if value == "none" {
                    self.underline = false;
                    self.strikethrough = false;
                }
            }
            "font-family" => self.font_family = Some(value.to_string()),
            "font-size" => self.font_size = Some(value.to_string()),
            "color" => self.color = Some(value.to_string()),
            "background-color" | "background" => self.background = Some(value.to_string()),
            _ => {}
        }
    }
}

/// Boolean inline formats that the toolbar can toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleFlag {
    Bold,
    Italic,
    Underline,
    Strikethrough,
}

/// String-valued inline properties set through a value argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    FontFamily,
    FontSize,
    Color,
    Background,
}

impl StyleProperty {
    pub fn assign(self, style: &mut TextStyle, value: Option<String>) {
        match self {
            StyleProperty::FontFamily => style.font_family = value,
            StyleProperty::FontSize => style.font_size = value,
            StyleProperty::Color => style.color = value,
            StyleProperty::Background => style.background = value,
        }
    }
}

/// Accept a CSS value (color, font family, font size) only when every
/// character is in a conservative alphabet; anything that could close the
/// declaration or the attribute is rejected. Double quotes around family
/// names become single quotes, which never end the `style` attribute.
pub fn sanitize_css_value(value: &str) -> Option<String> {
    let value = value.trim().replace('"', "'");
    let safe = !value.is_empty()
        && value.chars().all(|c| {
            c.is_ascii_alphanumeric()
                || matches!(c, ' ' | '#' | '(' | ')' | ',' | '.' | '%' | '-' | '_' | '\'')
        });
    safe.then_some(value)
}

/// Split an inline `style` attribute into `(name, value)` declarations
pub fn parse_declarations(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|decl| {
            let (name, value) = decl.split_once(':')?;
            let name = name.trim();
            let value = value.trim();
            if name.is_empty() || value.is_empty() {
                None
            } else {
                Some((name.to_ascii_lowercase(), value.to_string()))
            }
        })
        .collect()
}
