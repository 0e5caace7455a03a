//! richpad - a structured rich-text editing core
//!
//! The editor owns a document tree instead of wrapping a browser's editing
//! primitives, so every formatting operation is deterministic. State changes
//! follow the Elm Architecture: [`Msg`] in, [`update`](update::update) on the
//! [`EditorModel`](model::EditorModel), [`Cmd`] out.

pub mod commands;
pub mod config;
pub mod config_paths;
pub mod editable;
pub mod editor;
pub mod embed;
pub mod html;
pub mod messages;
pub mod model;
pub mod operation;
pub mod script;
pub mod stats;
pub mod toolbar;
pub mod tracing;
pub mod update;
pub mod util;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::EditorConfig;
pub use editor::RichTextEditor;
pub use messages::Msg;
pub use model::EditorModel;
pub use operation::Operation;
