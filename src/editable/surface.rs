//! EditableSurface - the document being edited, with caret, selection and history.

use std::mem::take;

use crate::html::{parse, serialize};
use crate::model::inline::{insert_at, plain_text_of, position_chars, split_at, split_range, style_at};
use crate::model::{Block, Document, Inline, Position, TextBlock, TextKind, TextRun, TextStyle};
use crate::util::{char_type, CharType, OBJECT_REPLACEMENT};

use super::history::{EditHistory, Snapshot};
use super::selection::Selection;

/// The editable region: document tree plus the editing state around it.
///
/// After [`load`](Self::load) the surface remembers the markup it was given
/// and reports it verbatim from [`serialized`](Self::serialized) until the
/// first edit that actually changes the document, and again whenever edits
/// bring the document back to exactly what was loaded.
#[derive(Debug, Clone)]
pub struct EditableSurface {
    pub(super) document: Document,
    pub(super) selection: Selection,
    pub(super) focused: bool,
    pub(super) placeholder: String,
    /// Style for the next typed text, set by toggling a format on a caret
    pub(super) typing_style: Option<TextStyle>,
    /// Markup last loaded, while the document is unmodified
    pub(super) source: Option<String>,
    /// The loaded document and its markup
    pub(super) pristine: Option<(Document, String)>,
    pub(super) history: EditHistory,
}

impl Default for EditableSurface {
    fn default() -> Self {
        Self::new("", EditHistory::DEFAULT_MAX_SIZE)
    }
}

impl EditableSurface {
    pub fn new(placeholder: &str, history_limit: usize) -> Self {
        let mut document = Document::new();
        document.ensure_block();
        Self {
            document,
            selection: Selection::default(),
            focused: false,
            placeholder: placeholder.to_string(),
            typing_style: None,
            source: None,
            pristine: None,
            history: EditHistory::with_max_size(history_limit),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn caret(&self) -> Position {
        self.selection.head
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn set_placeholder(&mut self, placeholder: &str) {
        self.placeholder = placeholder.to_string();
    }

    pub fn typing_style(&self) -> Option<&TextStyle> {
        self.typing_style.as_ref()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Replace the whole content with `markup`. Clears history.
    pub fn load(&mut self, markup: &str) {
        let mut document = parse(markup);
        document.ensure_block();
        self.document = document;
        self.selection = Selection::collapsed(self.document.end_position());
        self.source = Some(markup.to_string());
        self.pristine = Some((self.document.clone(), markup.to_string()));
        self.typing_style = None;
        self.history.clear();
    }

    /// Current content as markup
    pub fn serialized(&self) -> String {
        match &self.source {
            Some(source) => source.clone(),
            None => serialize(&self.document),
        }
    }

    /// True when there is nothing to show
    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }

    /// The placeholder is shown exactly when the surface is empty
    pub fn placeholder_visible(&self) -> bool {
        self.is_empty()
    }

    pub fn plain_text(&self) -> String {
        self.document.plain_text()
    }

    /// Text covered by the selection; blocks separated by newlines
    pub fn selected_text(&self) -> String {
        if self.selection.is_empty() {
            return String::new();
        }
        self.selection
            .block_ranges(|b| self.document.block_len(b))
            .into_iter()
            .filter_map(|(b, from, to)| match self.document.blocks.get(b) {
                Some(Block::Text(text)) => {
                    let (_, middle, _) = split_range(text.inlines.clone(), from, to);
                    Some(plain_text_of(&middle))
                }
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Style that text typed at the caret would get
    pub fn caret_style(&self) -> TextStyle {
        if let Some(style) = &self.typing_style {
            return style.clone();
        }
        let pos = self.selection.start();
        self.document
            .blocks
            .get(pos.block)
            .and_then(Block::as_text)
            .map(|text| style_at(&text.inlines, pos.offset))
            .unwrap_or_default()
    }

    pub(super) fn snapshot(&self) -> Snapshot {
        Snapshot {
            document: self.document.clone(),
            selection: self.selection,
            source: self.source.clone(),
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.document = snapshot.document;
        self.selection = snapshot.selection;
        self.source = snapshot.source;
        self.typing_style = None;
    }

    /// Run an edit against the document. Returns true when the document
    /// changed, in which case the previous state is recorded for undo.
    pub(super) fn edit(&mut self, f: impl FnOnce(&mut Self) -> bool) -> bool {
        let before = self.snapshot();
        if !f(self) {
            self.document = before.document;
            return false;
        }
        self.document.ensure_block();
        self.document.merge_runs();
        let anchor = self.document.clamp(self.selection.anchor);
        let head = self.document.clamp(self.selection.head);
        self.selection = Selection::new(anchor, head);

        if self.document == before.document {
            return false;
        }
        self.source = self
            .pristine
            .as_ref()
            .filter(|(document, _)| *document == self.document)
            .map(|(_, markup)| markup.clone());
        self.history.push(before);
        true
    }
}

// =============================================================================
// Selection and Movement
// =============================================================================

impl EditableSurface {
    pub fn set_selection(&mut self, anchor: Position, head: Position) {
        self.selection = Selection::new(self.document.clamp(anchor), self.document.clamp(head));
        self.typing_style = None;
    }

    pub fn set_caret(&mut self, pos: Position) {
        self.set_selection(pos, pos);
    }

    pub fn select_all(&mut self) {
        self.set_selection(self.document.start_position(), self.document.end_position());
    }

    fn move_head(&mut self, pos: Position, extend_selection: bool) {
        if extend_selection {
            self.selection.extend_to(pos);
        } else {
            self.selection = Selection::collapsed(pos);
        }
        self.typing_style = None;
    }

    /// Move caret left by one position
    pub fn move_left(&mut self, extend_selection: bool) {
        let sel = self.selection;
        if !extend_selection && !sel.is_empty() {
            self.set_caret(sel.start());
            return;
        }
        let head = sel.head;
        let target = if head.offset > 0 {
            Position::new(head.block, head.offset - 1)
        } else if head.block > 0 {
            Position::new(head.block - 1, self.document.block_len(head.block - 1))
        } else {
            head
        };
        self.move_head(target, extend_selection);
    }

    /// Move caret right by one position
    pub fn move_right(&mut self, extend_selection: bool) {
        let sel = self.selection;
        if !extend_selection && !sel.is_empty() {
            self.set_caret(sel.end());
            return;
        }
        let head = sel.head;
        let target = if head.offset < self.document.block_len(head.block) {
            Position::new(head.block, head.offset + 1)
        } else if head.block + 1 < self.document.block_count() {
            Position::new(head.block + 1, 0)
        } else {
            head
        };
        self.move_head(target, extend_selection);
    }

    fn block_chars(&self, block: usize) -> Vec<char> {
        match self.document.blocks.get(block) {
            Some(Block::Text(text)) => position_chars(&text.inlines),
            Some(_) => vec![OBJECT_REPLACEMENT],
            None => Vec::new(),
        }
    }

    /// Move caret by one word to the left
    pub fn move_word_left(&mut self, extend_selection: bool) {
        let sel = self.selection;
        if !extend_selection && !sel.is_empty() {
            self.set_caret(sel.start());
            return;
        }
        let head = sel.head;
        // At block start: move to end of previous block
        if head.offset == 0 {
            self.move_left(extend_selection);
            return;
        }

        let chars = self.block_chars(head.block);
        let mut pos = head.offset.min(chars.len());

        // Skip any whitespace/punctuation first (moving backwards)
        while pos > 0 && char_type(chars[pos - 1]) != CharType::WordChar {
            pos -= 1;
        }
        // Then skip word characters
        while pos > 0 && char_type(chars[pos - 1]) == CharType::WordChar {
            pos -= 1;
        }
        self.move_head(Position::new(head.block, pos), extend_selection);
    }

    /// Move caret by one word to the right
    pub fn move_word_right(&mut self, extend_selection: bool) {
        let sel = self.selection;
        if !extend_selection && !sel.is_empty() {
            self.set_caret(sel.end());
            return;
        }
        let head = sel.head;
        let chars = self.block_chars(head.block);
        if head.offset >= chars.len() {
            self.move_right(extend_selection);
            return;
        }

        let mut pos = head.offset;
        // Skip current word type
        let start_type = char_type(chars[pos]);
        while pos < chars.len() && char_type(chars[pos]) == start_type {
            pos += 1;
        }
        // Skip any following whitespace
        while pos < chars.len() && char_type(chars[pos]) == CharType::Whitespace {
            pos += 1;
        }
        self.move_head(Position::new(head.block, pos), extend_selection);
    }

    pub fn move_document_start(&mut self, extend_selection: bool) {
        self.move_head(self.document.start_position(), extend_selection);
    }

    pub fn move_document_end(&mut self, extend_selection: bool) {
        self.move_head(self.document.end_position(), extend_selection);
    }
}

// =============================================================================
// Editing Operations
// =============================================================================

impl EditableSurface {
    /// Type text at the caret, replacing the selection
    pub fn insert_text(&mut self, text: &str) -> bool {
        let style = self.caret_style();
        self.insert_styled_text(text, style)
    }

    /// Type text with an explicit style. Newlines split paragraphs.
    pub fn insert_styled_text(&mut self, text: &str, style: TextStyle) -> bool {
        if text.is_empty() && self.selection.is_empty() {
            return false;
        }
        let typed = self.edit(|s| {
            let mut caret = s.take_selection();
            for (i, line) in text.split('\n').enumerate() {
                if i > 0 {
                    caret = s.split_block(caret);
                }
                let line = line.strip_suffix('\r').unwrap_or(line);
                if !line.is_empty() {
                    let run = TextRun::new(line, style.clone());
                    caret = s.insert_inline_at(caret, Inline::Text(run));
                }
            }
            s.selection = Selection::collapsed(caret);
            true
        });
        if typed {
            self.typing_style = None;
        }
        typed
    }

    /// Enter: split the current block
    pub fn insert_paragraph(&mut self) -> bool {
        self.edit(|s| {
            let caret = s.take_selection();
            let caret = s.split_block(caret);
            s.selection = Selection::collapsed(caret);
            true
        })
    }

    /// Shift+Enter: a line break inside the current block
    pub fn insert_line_break(&mut self) -> bool {
        self.edit(|s| {
            let caret = s.take_selection();
            let caret = s.insert_inline_at(caret, Inline::LineBreak);
            s.selection = Selection::collapsed(caret);
            true
        })
    }

    /// Insert inline content at the caret, replacing the selection
    pub fn insert_inlines(&mut self, items: Vec<Inline>) -> bool {
        if items.is_empty() {
            return false;
        }
        self.edit(|s| {
            let caret = s.take_selection();
            let caret = s.text_caret(caret);
            let len: usize = items.iter().map(Inline::len).sum();
            if let Some(text) = s.document.blocks.get_mut(caret.block).and_then(Block::as_text_mut) {
                let (mut left, right) = split_at(take(&mut text.inlines), caret.offset);
                left.extend(items);
                left.extend(right);
                text.inlines = left;
            }
            s.selection = Selection::collapsed(Position::new(caret.block, caret.offset + len));
            true
        })
    }

    /// Insert whole blocks at the caret. The current text block is split
    /// around them, and a text block always follows so the caret has a home.
    pub fn insert_blocks(&mut self, blocks: Vec<Block>) -> bool {
        if blocks.is_empty() {
            return false;
        }
        self.edit(|s| {
            let caret = s.take_selection();
            let caret = s.document.clamp(caret);

            let mut tail = None;
            let at = match s.document.blocks.get_mut(caret.block) {
                Some(Block::Text(text)) => {
                    let (left, right) = split_at(take(&mut text.inlines), caret.offset);
                    let mut rest = TextBlock::with_inlines(text.kind, right);
                    rest.align = text.align;
                    if !rest.is_empty() {
                        tail = Some(rest);
                    }
                    text.inlines = left;
                    if text.is_empty() {
                        s.document.blocks.remove(caret.block);
                        caret.block
                    } else {
                        caret.block + 1
                    }
                }
                Some(_) if caret.offset == 0 => caret.block,
                Some(_) => caret.block + 1,
                None => 0,
            };

            let count = blocks.len();
            let last_text_len = blocks.last().and_then(Block::as_text).map(TextBlock::len);
            let rest = s.document.blocks.split_off(at);
            s.document.blocks.extend(blocks);
            s.document.blocks.extend(rest);
            let after = at + count;

            let caret = if let Some(rest) = tail {
                s.document.blocks.insert(after, Block::Text(rest));
                Position::new(after, 0)
            } else if let Some(len) = last_text_len {
                Position::new(after - 1, len)
            } else if matches!(s.document.blocks.get(after), Some(Block::Text(_))) {
                Position::new(after, 0)
            } else {
                s.document
                    .blocks
                    .insert(after, Block::Text(TextBlock::paragraph()));
                Position::new(after, 0)
            };
            s.selection = Selection::collapsed(caret);
            true
        })
    }

    /// Delete the selection
    pub fn delete_selection(&mut self) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        self.edit(|s| {
            let caret = s.take_selection();
            s.selection = Selection::collapsed(caret);
            true
        })
    }

    /// Backspace
    pub fn delete_backward(&mut self) -> bool {
        if !self.selection.is_empty() {
            return self.delete_selection();
        }
        let caret = self.document.clamp(self.selection.head);
        self.edit(|s| s.delete_before(caret))
    }

    /// Delete
    pub fn delete_forward(&mut self) -> bool {
        if !self.selection.is_empty() {
            return self.delete_selection();
        }
        let caret = self.document.clamp(self.selection.head);
        self.edit(|s| s.delete_after(caret))
    }

    pub fn undo(&mut self) -> bool {
        let current = self.snapshot();
        match self.history.pop_undo(current) {
            Some(previous) => {
                self.restore(previous);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        let current = self.snapshot();
        match self.history.pop_redo(current) {
            Some(next) => {
                self.restore(next);
                true
            }
            None => false,
        }
    }
}

// =============================================================================
// Document Primitives
// =============================================================================

impl EditableSurface {
    /// Remove the selected range, returning the collapsed caret
    pub(super) fn take_selection(&mut self) -> Position {
        if self.selection.is_empty() {
            return self.document.clamp(self.selection.head);
        }
        let start = self.document.clamp(self.selection.start());
        let end = self.document.clamp(self.selection.end());
        self.remove_range(start, end)
    }

    /// A caret inside a text block: next to an atomic block a fresh
    /// paragraph is opened on the caret's side.
    pub(super) fn text_caret(&mut self, pos: Position) -> Position {
        self.document.ensure_block();
        let pos = self.document.clamp(pos);
        match self.document.blocks.get(pos.block) {
            Some(Block::Text(_)) => pos,
            _ => {
                let at = if pos.offset == 0 { pos.block } else { pos.block + 1 };
                self.document
                    .blocks
                    .insert(at, Block::Text(TextBlock::paragraph()));
                Position::new(at, 0)
            }
        }
    }

    fn insert_inline_at(&mut self, caret: Position, item: Inline) -> Position {
        let caret = self.text_caret(caret);
        let len = item.len();
        if let Some(text) = self.document.blocks.get_mut(caret.block).and_then(Block::as_text_mut) {
            text.inlines = insert_at(take(&mut text.inlines), caret.offset, item);
        }
        Position::new(caret.block, caret.offset + len)
    }

    fn split_block(&mut self, caret: Position) -> Position {
        let caret = self.text_caret(caret);
        let Some(Block::Text(text)) = self.document.blocks.get_mut(caret.block) else {
            return caret;
        };

        // Enter on an empty list item or quote leaves it
        if text.is_empty() && (text.kind.is_list_item() || text.kind == TextKind::Quote) {
            text.kind = TextKind::Paragraph;
            return caret;
        }

        let (left, right) = split_at(take(&mut text.inlines), caret.offset);
        text.inlines = left;
        let kind = match text.kind {
            TextKind::Heading(_) if right.is_empty() => TextKind::Paragraph,
            kind => kind,
        };
        let mut next = TextBlock::with_inlines(kind, right);
        next.align = text.align;
        self.document
            .blocks
            .insert(caret.block + 1, Block::Text(next));
        Position::new(caret.block + 1, 0)
    }

    /// Caret after removing the block at `index`
    fn caret_after_removal(&mut self, index: usize) -> Position {
        self.document.ensure_block();
        if index < self.document.block_count() {
            Position::new(index, 0)
        } else {
            self.document.end_position()
        }
    }

    /// Remove `start..end`, merging the boundary text blocks
    pub(super) fn remove_range(&mut self, start: Position, end: Position) -> Position {
        if start >= end {
            return start;
        }
        let doc = &mut self.document;
        if start == doc.start_position() && end == doc.end_position() {
            doc.blocks = vec![Block::Text(TextBlock::paragraph())];
            return Position::zero();
        }

        if start.block == end.block {
            match doc.blocks.get_mut(start.block) {
                Some(Block::Text(text)) => {
                    let (mut before, _, after) =
                        split_range(take(&mut text.inlines), start.offset, end.offset);
                    before.extend(after);
                    text.inlines = before;
                }
                Some(_) => {
                    doc.blocks.remove(start.block);
                    return self.caret_after_removal(start.block);
                }
                None => {}
            }
            return start;
        }

        let mut removed: Vec<Block> = doc.blocks.drain(start.block..=end.block).collect();
        let last = removed.pop();
        let first = removed.into_iter().next();

        let head = match first {
            Some(Block::Text(mut text)) => {
                text.inlines = split_at(take(&mut text.inlines), start.offset).0;
                Some(Block::Text(text))
            }
            Some(atomic) if start.offset > 0 => Some(atomic),
            _ => None,
        };
        let tail = match last {
            Some(Block::Text(mut text)) => {
                text.inlines = split_at(take(&mut text.inlines), end.offset).1;
                Some(Block::Text(text))
            }
            Some(atomic) if end.offset == 0 => Some(atomic),
            _ => None,
        };

        let mut pieces = Vec::with_capacity(2);
        let caret = match (head, tail) {
            (Some(Block::Text(mut head)), Some(Block::Text(tail))) => {
                head.inlines.extend(tail.inlines);
                pieces.push(Block::Text(head));
                start
            }
            (head, tail) => {
                let caret = match &head {
                    Some(Block::Text(_)) => start,
                    Some(_) => Position::new(start.block + 1, 0),
                    None => Position::new(start.block, 0),
                };
                pieces.extend(head);
                pieces.extend(tail);
                caret
            }
        };
        let rest = doc.blocks.split_off(start.block);
        doc.blocks.extend(pieces);
        doc.blocks.extend(rest);
        self.document.ensure_block();
        self.document.clamp(caret)
    }

    fn delete_before(&mut self, caret: Position) -> bool {
        let prev = caret.block.checked_sub(1);
        match self.document.blocks.get_mut(caret.block) {
            Some(Block::Text(_)) if caret.offset > 0 => {
                let from = Position::new(caret.block, caret.offset - 1);
                let caret = self.remove_range(from, caret);
                self.selection = Selection::collapsed(caret);
                true
            }
            // Backspace at the start of a list item or quote outdents it
            Some(Block::Text(text))
                if text.kind.is_list_item() || text.kind == TextKind::Quote =>
            {
                text.kind = TextKind::Paragraph;
                true
            }
            Some(Block::Text(_)) => {
                let Some(prev) = prev else {
                    return false;
                };
                if self.document.blocks.get(prev).map(Block::is_text) == Some(true) {
                    let from = Position::new(prev, self.document.block_len(prev));
                    let caret = self.remove_range(from, caret);
                    self.selection = Selection::collapsed(caret);
                } else {
                    self.document.blocks.remove(prev);
                    self.selection = Selection::collapsed(Position::new(prev, 0));
                }
                true
            }
            Some(_) if caret.offset > 0 => {
                self.document.blocks.remove(caret.block);
                let caret = match prev {
                    Some(prev) => {
                        self.document.ensure_block();
                        Position::new(prev, self.document.block_len(prev))
                    }
                    None => self.caret_after_removal(caret.block),
                };
                self.selection = Selection::collapsed(caret);
                true
            }
            Some(_) => {
                // Before an atomic block: remove an atomic or empty predecessor
                let Some(prev) = prev else {
                    return false;
                };
                let removable = match self.document.blocks.get(prev) {
                    Some(Block::Text(text)) => text.is_empty(),
                    Some(_) => true,
                    None => false,
                };
                if removable {
                    self.document.blocks.remove(prev);
                    self.selection = Selection::collapsed(Position::new(prev, 0));
                } else {
                    self.selection =
                        Selection::collapsed(Position::new(prev, self.document.block_len(prev)));
                }
                removable
            }
            None => false,
        }
    }

    fn delete_after(&mut self, caret: Position) -> bool {
        let len = self.document.block_len(caret.block);
        let next = caret.block + 1;
        match self.document.blocks.get(caret.block) {
            Some(Block::Text(_)) if caret.offset < len => {
                let caret = self.remove_range(caret, Position::new(caret.block, caret.offset + 1));
                self.selection = Selection::collapsed(caret);
                true
            }
            Some(Block::Text(_)) => match self.document.blocks.get(next) {
                Some(Block::Text(_)) => {
                    let caret = self.remove_range(caret, Position::new(next, 0));
                    self.selection = Selection::collapsed(caret);
                    true
                }
                Some(_) => {
                    self.document.blocks.remove(next);
                    true
                }
                None => false,
            },
            Some(_) if caret.offset == 0 => {
                self.document.blocks.remove(caret.block);
                let caret = self.caret_after_removal(caret.block);
                self.selection = Selection::collapsed(caret);
                true
            }
            Some(_) => match self.document.blocks.get(next) {
                Some(Block::Text(text)) if !text.is_empty() => {
                    self.selection = Selection::collapsed(Position::new(next, 0));
                    false
                }
                Some(_) => {
                    self.document.blocks.remove(next);
                    true
                }
                None => false,
            },
            None => false,
        }
    }
}
