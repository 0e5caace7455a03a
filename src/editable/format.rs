//! Formatting transforms over the selection.
//!
//! With a collapsed caret, inline formats change the typing style instead of
//! the document; block formats always apply to the caret's block.

use std::mem::take;

use crate::html::{parse_fragment, Fragment};
use crate::model::inline::{for_each_run_mut, runs_of, split_range, unwrap_links, wrap_in_link};
use crate::model::{
    Alignment, Block, Embed, Inline, StyleFlag, StyleProperty, Table, TextKind, TextRun,
    TextStyle,
};

use super::surface::EditableSurface;

impl EditableSurface {
    fn selected_ranges(&self) -> Vec<(usize, usize, usize)> {
        self.selection
            .block_ranges(|b| self.document.block_len(b))
    }

    /// Indices of the text blocks the selection touches
    fn selected_text_blocks(&self) -> Vec<usize> {
        self.selected_ranges()
            .into_iter()
            .map(|(b, _, _)| b)
            .filter(|&b| self.document.blocks.get(b).map(Block::is_text) == Some(true))
            .collect()
    }

    /// Inline content covered by the selection, all blocks concatenated
    fn selected_inlines(&self) -> Vec<Inline> {
        let mut out = Vec::new();
        for (b, from, to) in self.selected_ranges() {
            if let Some(Block::Text(text)) = self.document.blocks.get(b) {
                let (_, middle, _) = split_range(text.inlines.clone(), from, to);
                out.extend(middle);
            }
        }
        out
    }

    /// Replace the selected part of every touched text block with `f(part)`
    fn map_selected(&mut self, mut f: impl FnMut(Vec<Inline>) -> Vec<Inline>) {
        for (b, from, to) in self.selected_ranges() {
            if let Some(text) = self.document.blocks.get_mut(b).and_then(Block::as_text_mut) {
                let (mut before, middle, after) = split_range(take(&mut text.inlines), from, to);
                before.extend(f(middle));
                before.extend(after);
                text.inlines = before;
            }
        }
    }

    fn restyle_selection(&mut self, f: impl Fn(&mut TextStyle)) -> bool {
        self.edit(|s| {
            s.map_selected(|mut part| {
                for_each_run_mut(&mut part, |run| f(&mut run.style));
                part
            });
            true
        })
    }

    fn restyle_caret(&mut self, f: impl FnOnce(&mut TextStyle)) {
        let mut style = self.caret_style();
        f(&mut style);
        self.typing_style = Some(style);
    }

    /// Toggle a boolean format. The format is removed when every selected
    /// character already has it, and applied otherwise.
    pub fn toggle_style(&mut self, flag: StyleFlag) -> bool {
        if self.selection.is_empty() {
            self.restyle_caret(|style| style.set(flag, !style.get(flag)));
            return false;
        }
        let inlines = self.selected_inlines();
        let runs: Vec<&TextRun> = runs_of(&inlines);
        let all = !runs.is_empty() && runs.iter().all(|run| run.style.get(flag));
        self.restyle_selection(|style| style.set(flag, !all))
    }

    /// True when every selected character (or the caret style) has `flag`
    pub fn style_active(&self, flag: StyleFlag) -> bool {
        if self.selection.is_empty() {
            return self.caret_style().get(flag);
        }
        let inlines = self.selected_inlines();
        let runs = runs_of(&inlines);
        !runs.is_empty() && runs.iter().all(|run| run.style.get(flag))
    }

    /// Set or clear a string-valued property on the selection
    pub fn set_style_property(&mut self, property: StyleProperty, value: Option<String>) -> bool {
        if self.selection.is_empty() {
            self.restyle_caret(|style| property.assign(style, value));
            return false;
        }
        self.edit(|s| {
            s.map_selected(|mut part| {
                for_each_run_mut(&mut part, |run| property.assign(&mut run.style, value.clone()));
                part
            });
            true
        })
    }

    /// Strip inline formatting from the selection; links are kept
    pub fn remove_format(&mut self) -> bool {
        if self.selection.is_empty() {
            self.typing_style = Some(TextStyle::plain());
            return false;
        }
        self.restyle_selection(|style| *style = TextStyle::plain())
    }

    /// Set the kind of every selected text block. With `toggle`, blocks that
    /// all have `kind` already go back to paragraphs.
    pub fn set_block_kind(&mut self, kind: TextKind, toggle: bool) -> bool {
        let blocks = self.selected_text_blocks();
        if blocks.is_empty() {
            return false;
        }
        let all = blocks.iter().all(|&b| {
            self.document.blocks.get(b).and_then(Block::as_text).map(|t| t.kind) == Some(kind)
        });
        let target = if toggle && all { TextKind::Paragraph } else { kind };
        self.edit(|s| {
            for b in blocks {
                if let Some(text) = s.document.blocks.get_mut(b).and_then(Block::as_text_mut) {
                    text.kind = target;
                }
            }
            true
        })
    }

    pub fn set_alignment(&mut self, align: Alignment) -> bool {
        let blocks = self.selected_text_blocks();
        self.edit(|s| {
            for b in blocks {
                if let Some(text) = s.document.blocks.get_mut(b).and_then(Block::as_text_mut) {
                    text.align = align;
                }
            }
            true
        })
    }

    /// Link the selection to `href`. On a caret the URL itself is inserted
    /// as the link text.
    pub fn create_link(&mut self, href: &str) -> bool {
        if self.selection.is_empty() {
            return self.insert_link(href, href);
        }
        self.edit(|s| {
            s.map_selected(|part| wrap_in_link(part, href));
            true
        })
    }

    /// Insert a new link with its own display text at the caret
    pub fn insert_link(&mut self, href: &str, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        let run = TextRun::new(text, self.caret_style());
        self.insert_inlines(vec![Inline::Link {
            href: href.to_string(),
            runs: vec![run],
        }])
    }

    /// Remove links from the selection, or the link around the caret
    pub fn unlink(&mut self) -> bool {
        if !self.selection.is_empty() {
            return self.edit(|s| {
                s.map_selected(unwrap_links);
                true
            });
        }
        let caret = self.selection.head;
        self.edit(|s| {
            let Some(text) = s.document.blocks.get_mut(caret.block).and_then(Block::as_text_mut)
            else {
                return false;
            };
            let mut pos = 0;
            let mut found = None;
            for (i, item) in text.inlines.iter().enumerate() {
                let len = item.len();
                if matches!(item, Inline::Link { .. }) && pos <= caret.offset && caret.offset <= pos + len {
                    found = Some(i);
                    break;
                }
                pos += len;
            }
            let Some(index) = found else {
                return false;
            };
            let inlines = take(&mut text.inlines);
            let mut out = Vec::with_capacity(inlines.len());
            for (i, item) in inlines.into_iter().enumerate() {
                if i == index {
                    out.extend(unwrap_links(vec![item]));
                } else {
                    out.push(item);
                }
            }
            text.inlines = out;
            true
        })
    }

    pub fn insert_image(&mut self, src: &str, alt: Option<&str>) -> bool {
        self.insert_inlines(vec![Inline::Image {
            src: src.to_string(),
            alt: alt.filter(|a| !a.is_empty()).map(str::to_string),
        }])
    }

    /// Insert an empty, bordered `rows` x `cols` table
    pub fn insert_table(&mut self, rows: usize, cols: usize) -> bool {
        if rows == 0 || cols == 0 {
            return false;
        }
        self.insert_blocks(vec![Block::Table(Table::grid(rows, cols))])
    }

    pub fn insert_embed(&mut self, embed: Embed) -> bool {
        self.insert_blocks(vec![Block::Embed(embed)])
    }

    /// Insert a markup fragment at the caret
    pub fn insert_html(&mut self, markup: &str) -> bool {
        match parse_fragment(markup) {
            Fragment::Inline(inlines) => self.insert_inlines(inlines),
            Fragment::Blocks(blocks) => self.insert_blocks(blocks),
        }
    }
}
