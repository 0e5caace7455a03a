//! Content statistics for the document value
//!
//! Forms that embed the editor show a word count and reading time, and
//! refuse to submit blank content.

use crate::model::{Block, Document, Inline};

/// Counts derived from a document's text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentStats {
    pub words: usize,
    /// Characters of text, block separators excluded
    pub characters: usize,
    pub characters_no_spaces: usize,
    pub blocks: usize,
    /// Whole minutes, rounded up; zero only for wordless content
    pub reading_minutes: usize,
}

impl ContentStats {
    pub fn of(document: &Document, words_per_minute: usize) -> Self {
        let text = document.plain_text();
        let words = text.split_whitespace().count();
        let characters = text.chars().filter(|&c| c != '\n').count();
        let characters_no_spaces = text.chars().filter(|c| !c.is_whitespace()).count();
        Self {
            words,
            characters,
            characters_no_spaces,
            blocks: if document.is_empty() {
                0
            } else {
                document.block_count()
            },
            reading_minutes: reading_minutes(words, words_per_minute),
        }
    }

    /// Stats for a markup string
    pub fn of_markup(markup: &str, words_per_minute: usize) -> Self {
        Self::of(&crate::html::parse(markup), words_per_minute)
    }
}

/// Minutes needed to read `words` at `words_per_minute`, rounded up
pub fn reading_minutes(words: usize, words_per_minute: usize) -> usize {
    if words == 0 {
        return 0;
    }
    words.div_ceil(words_per_minute.max(1))
}

fn inlines_have_content(inlines: &[Inline]) -> bool {
    inlines.iter().any(|item| match item {
        Inline::Text(run) => !run.text.trim().is_empty(),
        Inline::Link { runs, .. } => runs.iter().any(|run| !run.text.trim().is_empty()),
        Inline::Image { .. } => true,
        Inline::LineBreak => false,
    })
}

/// True when the document has nothing a reader would see: no text beyond
/// whitespace, no images, no media. Tables count only through their text.
pub fn is_blank(document: &Document) -> bool {
    !document.blocks.iter().any(|block| match block {
        Block::Text(text) => inlines_have_content(&text.inlines),
        Block::Table(table) => table.cells().any(|cell| inlines_have_content(&cell.inlines)),
        Block::Embed(_) => true,
    })
}

/// [`is_blank`] for a markup string
pub fn is_blank_markup(markup: &str) -> bool {
    is_blank(&crate::html::parse(markup))
}
