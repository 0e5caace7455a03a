//! Editor session state - transient toolbar choices
//!
//! Lives as long as the editor instance and is never persisted.

/// The toolbar's remembered choices
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorSession {
    /// Last font family picked from the toolbar
    pub font_family: Option<String>,
    /// Last font size picked from the toolbar
    pub font_size: Option<String>,
    /// Whether the secondary ("more tools") panel is open
    pub more_tools_visible: bool,
}

impl EditorSession {
    pub fn toggle_more_tools(&mut self) {
        self.more_tools_visible = !self.more_tools_visible;
    }
}
