//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

/// Side effects requested by an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// Report the serialized content to the owner of the document value
    NotifyChange(String),
}

impl Cmd {
    /// The content carried by a change notification
    pub fn content(&self) -> &str {
        match self {
            Cmd::NotifyChange(content) => content,
        }
    }
}
