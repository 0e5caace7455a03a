//! Editor model - the complete state of one editor instance
//!
//! This module contains the document tree and the state types following the
//! Elm Architecture pattern.

pub mod document;
pub mod inline;
pub mod session;
pub mod style;

pub use document::{
    Alignment, Block, Cell, Document, Embed, Inline, Position, Table, TextBlock, TextKind, TextRun,
};
pub use session::EditorSession;
pub use style::{StyleFlag, StyleProperty, TextStyle};

use crate::config::EditorConfig;
use crate::editable::EditableSurface;
use crate::update::sync::ContentSync;

/// The complete editor model
#[derive(Debug, Clone)]
pub struct EditorModel {
    /// The focusable region holding the document, selection and focus state
    pub surface: EditableSurface,
    /// Transient toolbar state (font family/size, more-tools panel)
    pub session: EditorSession,
    /// Bookkeeping for reconciling the external value
    pub sync: ContentSync,
    /// User preferences
    pub config: EditorConfig,
}

impl EditorModel {
    pub fn new(config: EditorConfig) -> Self {
        let surface = EditableSurface::new(&config.placeholder, config.history_limit);
        Self {
            surface,
            session: EditorSession::default(),
            sync: ContentSync::default(),
            config,
        }
    }

    /// Override the placeholder shown when the document is empty
    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.surface.set_placeholder(placeholder);
        self
    }

    /// Current serialized content of the surface
    pub fn content(&self) -> String {
        self.surface.serialized()
    }
}

impl Default for EditorModel {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}
