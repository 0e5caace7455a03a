//! Document tree - the structured content behind the editable surface
//!
//! Content is a flat list of blocks. Text blocks hold inline content; tables
//! and embeds are atomic blocks with a length of one position.

use super::inline::{inlines_len, merge_inlines, normalize_inlines, plain_text_of};

/// A position in the document: block index plus character offset in that block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub block: usize,
    pub offset: usize,
}

impl Position {
    pub const fn new(block: usize, offset: usize) -> Self {
        Self { block, offset }
    }

    pub const fn zero() -> Self {
        Self {
            block: 0,
            offset: 0,
        }
    }
}

/// Horizontal alignment of a block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    pub fn css_value(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "justify",
        }
    }

    pub fn from_css(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "left" | "start" => Some(Alignment::Left),
            "center" => Some(Alignment::Center),
            "right" | "end" => Some(Alignment::Right),
            "justify" => Some(Alignment::Justify),
            _ => None,
        }
    }
}

/// Kind of a text block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TextKind {
    #[default]
    Paragraph,
    /// Heading level, 1..=6
    Heading(u8),
    Quote,
    Code,
    ListItem {
        ordered: bool,
    },
}

impl TextKind {
    pub fn is_list_item(self) -> bool {
        matches!(self, TextKind::ListItem { .. })
    }
}

/// A run of text sharing one style
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextRun {
    pub text: String,
    pub style: super::TextStyle,
}

impl TextRun {
    pub fn new(text: impl Into<String>, style: super::TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, super::TextStyle::plain())
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Inline content of a text block or table cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(TextRun),
    Link { href: String, runs: Vec<TextRun> },
    Image { src: String, alt: Option<String> },
    LineBreak,
}

impl Inline {
    /// Length in positions; images and line breaks occupy one position
    pub fn len(&self) -> usize {
        match self {
            Inline::Text(run) => run.len(),
            Inline::Link { runs, .. } => runs.iter().map(TextRun::len).sum(),
            Inline::Image { .. } | Inline::LineBreak => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A block of inline content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBlock {
    pub kind: TextKind,
    pub align: Alignment,
    pub inlines: Vec<Inline>,
}

impl TextBlock {
    pub fn new(kind: TextKind) -> Self {
        Self {
            kind,
            align: Alignment::Left,
            inlines: Vec::new(),
        }
    }

    pub fn paragraph() -> Self {
        Self::new(TextKind::Paragraph)
    }

    pub fn with_inlines(kind: TextKind, inlines: Vec<Inline>) -> Self {
        Self {
            kind,
            align: Alignment::Left,
            inlines,
        }
    }

    pub fn len(&self) -> usize {
        inlines_len(&self.inlines)
    }

    pub fn is_empty(&self) -> bool {
        self.inlines.is_empty()
    }
}

/// One table cell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    pub header: bool,
    pub inlines: Vec<Inline>,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        self.inlines.is_empty()
    }
}

/// A grid of cells inserted as a single block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<Vec<Cell>>,
    pub bordered: bool,
}

impl Table {
    /// An empty, bordered grid of `rows` x `cols` cells
    pub fn grid(rows: usize, cols: usize) -> Self {
        Self {
            rows: (0..rows)
                .map(|_| (0..cols).map(|_| Cell::default()).collect())
                .collect(),
            bordered: true,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flatten()
    }
}

/// Embedded media block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Embed {
    /// A platform player loaded in an iframe
    Frame { src: String, width: u32, height: u32 },
    /// A native video element playing the URL directly
    Video { src: String },
}

impl Embed {
    pub const DEFAULT_WIDTH: u32 = 560;
    pub const DEFAULT_HEIGHT: u32 = 315;

    pub fn src(&self) -> &str {
        match self {
            Embed::Frame { src, .. } | Embed::Video { src } => src,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Text(TextBlock),
    Table(Table),
    Embed(Embed),
}

impl Block {
    /// Number of caret positions inside the block (plus one for the end)
    pub fn len(&self) -> usize {
        match self {
            Block::Text(text) => text.len(),
            Block::Table(_) | Block::Embed(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_text(&self) -> Option<&TextBlock> {
        match self {
            Block::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextBlock> {
        match self {
            Block::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Block::Text(_))
    }
}

/// The whole document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        let mut doc = Self { blocks };
        doc.normalize();
        doc
    }

    /// Empty means nothing to show: no blocks, or one empty default paragraph
    pub fn is_empty(&self) -> bool {
        match self.blocks.as_slice() {
            [] => true,
            [Block::Text(block)] => {
                block.is_empty()
                    && block.kind == TextKind::Paragraph
                    && block.align == Alignment::Left
            }
            _ => false,
        }
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn block_len(&self, index: usize) -> usize {
        self.blocks.get(index).map(Block::len).unwrap_or(0)
    }

    /// Guarantee at least one block so the caret always has a home
    pub fn ensure_block(&mut self) {
        if self.blocks.is_empty() {
            self.blocks.push(Block::Text(TextBlock::paragraph()));
        }
    }

    pub fn start_position(&self) -> Position {
        Position::zero()
    }

    pub fn end_position(&self) -> Position {
        match self.blocks.len() {
            0 => Position::zero(),
            n => Position::new(n - 1, self.block_len(n - 1)),
        }
    }

    /// Clamp a position into the valid range of the document
    pub fn clamp(&self, pos: Position) -> Position {
        if self.blocks.is_empty() {
            return Position::zero();
        }
        let block = pos.block.min(self.blocks.len() - 1);
        Position::new(block, pos.offset.min(self.block_len(block)))
    }

    /// Plain-text rendering, one line per block; table cells separated by tabs
    pub fn plain_text(&self) -> String {
        let mut lines = Vec::with_capacity(self.blocks.len());
        for block in &self.blocks {
            match block {
                Block::Text(text) => lines.push(plain_text_of(&text.inlines)),
                Block::Table(table) => {
                    for row in &table.rows {
                        let cells: Vec<String> =
                            row.iter().map(|c| plain_text_of(&c.inlines)).collect();
                        lines.push(cells.join("\t"));
                    }
                }
                Block::Embed(_) => {}
            }
        }
        lines.join("\n")
    }

    /// Merge equal adjacent runs, drop empty runs and placeholder breaks
    pub fn normalize(&mut self) {
        self.map_inlines(normalize_inlines);
    }

    /// Merge equal adjacent runs after an edit; caret positions stay valid
    pub fn merge_runs(&mut self) {
        self.map_inlines(merge_inlines);
    }

    fn map_inlines(&mut self, f: fn(Vec<Inline>) -> Vec<Inline>) {
        for block in &mut self.blocks {
            match block {
                Block::Text(text) => {
                    let inlines = std::mem::take(&mut text.inlines);
                    text.inlines = f(inlines);
                }
                Block::Table(table) => {
                    for cell in table.rows.iter_mut().flatten() {
                        let inlines = std::mem::take(&mut cell.inlines);
                        cell.inlines = f(inlines);
                    }
                }
                Block::Embed(_) => {}
            }
        }
    }
}
