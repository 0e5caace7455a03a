//! Tree builder: turns a token stream into a [`Document`].
//!
//! The builder is forgiving in the way content-editable markup needs: bare
//! text gets an implicit paragraph, unknown elements are transparent, stray
//! end tags are ignored and nested blocks are flattened.

use super::tokenizer::{tokenize, Token};
use crate::model::style::parse_declarations;
use crate::model::{
    Alignment, Block, Cell, Document, Embed, Inline, Table, TextBlock, TextKind, TextRun,
    TextStyle,
};

const BLOCK_ELEMENTS: &[&str] = &[
    "p",
    "div",
    "section",
    "article",
    "header",
    "footer",
    "main",
    "aside",
    "nav",
    "figure",
    "figcaption",
    "address",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "blockquote",
    "pre",
    "li",
    "dd",
    "dt",
];

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "col", "embed", "hr", "input", "link", "meta", "param", "track", "wbr",
];

const IGNORED_ELEMENTS: &[&str] = &[
    "html", "head", "body", "title", "thead", "tbody", "tfoot", "colgroup", "caption",
];

/// Result of parsing a markup fragment for insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Inline content that can be spliced into the current block
    Inline(Vec<Inline>),
    /// Block content that splits the current block
    Blocks(Vec<Block>),
}

/// Parse a full document value
pub fn parse(markup: &str) -> Document {
    let mut builder = Builder::default();
    for token in tokenize(markup) {
        builder.feed(token);
    }
    builder.finish().0
}

/// Parse a fragment, keeping it inline when it contains no block structure
pub fn parse_fragment(markup: &str) -> Fragment {
    let mut builder = Builder::default();
    for token in tokenize(markup) {
        builder.feed(token);
    }
    let (doc, saw_block) = builder.finish();
    if !saw_block {
        if let [Block::Text(block)] = doc.blocks.as_slice() {
            return Fragment::Inline(block.inlines.clone());
        }
        if doc.blocks.is_empty() {
            return Fragment::Inline(Vec::new());
        }
    }
    Fragment::Blocks(doc.blocks)
}

#[derive(Debug)]
struct OpenBlock {
    block: TextBlock,
    /// Opened by an element rather than by stray inline content
    explicit: bool,
}

#[derive(Debug)]
struct BlockContext {
    tag: String,
    kind: TextKind,
    align: Alignment,
}

#[derive(Debug, Default)]
struct TableBuilder {
    table: Table,
    row: Option<Vec<Cell>>,
    cell: Option<Cell>,
}

impl TableBuilder {
    fn finish_cell(&mut self) {
        if let Some(cell) = self.cell.take() {
            self.row.get_or_insert_with(Vec::new).push(cell);
        }
    }

    fn finish_row(&mut self) {
        self.finish_cell();
        if let Some(row) = self.row.take() {
            if !row.is_empty() {
                self.table.rows.push(row);
            }
        }
    }

    fn cell_mut(&mut self) -> &mut Cell {
        self.cell.get_or_insert_with(Cell::default)
    }
}

#[derive(Debug, Default)]
struct Builder {
    blocks: Vec<Block>,
    current: Option<OpenBlock>,
    contexts: Vec<BlockContext>,
    lists: Vec<bool>,
    styles: Vec<(String, TextStyle)>,
    link: Option<(String, Vec<TextRun>)>,
    table: Option<TableBuilder>,
    video: Option<Option<String>>,
    preformatted: usize,
    saw_block: bool,
}

fn alignment_of(attributes: &[(String, String)]) -> Option<Alignment> {
    if let Some(style) = Token::attr(attributes, "style") {
        let found = parse_declarations(style)
            .into_iter()
            .find(|(name, _)| name == "text-align")
            .and_then(|(_, value)| Alignment::from_css(&value));
        if found.is_some() {
            return found;
        }
    }
    Token::attr(attributes, "align").and_then(Alignment::from_css)
}

fn has_border(attributes: &[(String, String)]) -> bool {
    let styled = Token::attr(attributes, "style")
        .map(|s| {
            parse_declarations(s).iter().any(|(name, value)| {
                name.starts_with("border")
                    && name != "border-collapse"
                    && value != "none"
                    && value != "0"
            })
        })
        .unwrap_or(false);
    let attr = Token::attr(attributes, "border")
        .map(|b| b.trim() != "0")
        .unwrap_or(false);
    styled || attr
}

fn parse_dimension(value: Option<&str>, default: u32) -> u32 {
    value
        .map(|v| v.trim().trim_end_matches("px"))
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for ch in text.chars() {
        if ch.is_ascii_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(ch);
            in_space = false;
        }
    }
    out
}

fn ends_with_space(inlines: &[Inline]) -> bool {
    match inlines.last() {
        None | Some(Inline::LineBreak) => true,
        Some(Inline::Text(run)) => run.text.ends_with(' '),
        Some(Inline::Link { runs, .. }) => runs.last().map(|r| r.text.ends_with(' ')).unwrap_or(false),
        Some(Inline::Image { .. }) => false,
    }
}

impl Builder {
    fn current_style(&self) -> TextStyle {
        self.styles
            .last()
            .map(|(_, style)| style.clone())
            .unwrap_or_default()
    }

    fn feed(&mut self, token: Token) {
        match token {
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => self.start_tag(&name, &attributes, self_closing),
            Token::EndTag(name) => self.end_tag(&name),
            Token::Text(text) => self.text(&text),
        }
    }

    fn start_tag(&mut self, name: &str, attributes: &[(String, String)], self_closing: bool) {
        match name {
            "br" => self.push_inline(Inline::LineBreak),
            "img" => {
                if let Some(src) = Token::attr(attributes, "src").filter(|s| !s.is_empty()) {
                    let alt = Token::attr(attributes, "alt")
                        .filter(|a| !a.is_empty())
                        .map(str::to_string);
                    self.push_inline(Inline::Image {
                        src: src.to_string(),
                        alt,
                    });
                }
            }
            "a" => {
                self.close_link();
                if let Some(href) = Token::attr(attributes, "href") {
                    self.link = Some((href.to_string(), Vec::new()));
                }
            }
            "ul" | "ol" => {
                self.saw_block = true;
                if self.table.is_none() {
                    self.close_current();
                    self.lists.push(name == "ol");
                }
            }
            "table" => {
                self.saw_block = true;
                self.close_current();
                self.finish_table();
                self.table = Some(TableBuilder {
                    table: Table {
                        rows: Vec::new(),
                        bordered: has_border(attributes),
                    },
                    ..TableBuilder::default()
                });
            }
            "tr" => {
                if let Some(table) = self.table.as_mut() {
                    table.finish_row();
                    table.row = Some(Vec::new());
                }
            }
            "td" | "th" => {
                if let Some(table) = self.table.as_mut() {
                    table.finish_cell();
                    table.cell = Some(Cell {
                        header: name == "th",
                        inlines: Vec::new(),
                    });
                    if has_border(attributes) {
                        table.table.bordered = true;
                    }
                }
            }
            "iframe" => {
                self.saw_block = true;
                if self.table.is_some() {
                    return;
                }
                self.close_current();
                if let Some(src) = Token::attr(attributes, "src").filter(|s| !s.is_empty()) {
                    self.blocks.push(Block::Embed(Embed::Frame {
                        src: src.to_string(),
                        width: parse_dimension(Token::attr(attributes, "width"), Embed::DEFAULT_WIDTH),
                        height: parse_dimension(
                            Token::attr(attributes, "height"),
                            Embed::DEFAULT_HEIGHT,
                        ),
                    }));
                }
            }
            "video" => {
                self.saw_block = true;
                if self.table.is_some() {
                    return;
                }
                self.close_current();
                self.video = Some(
                    Token::attr(attributes, "src")
                        .filter(|s| !s.is_empty())
                        .map(str::to_string),
                );
            }
            "source" => {
                if let Some(slot) = self.video.as_mut() {
                    if slot.is_none() {
                        *slot = Token::attr(attributes, "src")
                            .filter(|s| !s.is_empty())
                            .map(str::to_string);
                    }
                }
            }
            _ if BLOCK_ELEMENTS.contains(&name) => {
                self.saw_block = true;
                if self.table.is_some() || self_closing {
                    return;
                }
                self.open_block(name, attributes);
            }
            _ if VOID_ELEMENTS.contains(&name) || IGNORED_ELEMENTS.contains(&name) => {}
            _ => {
                if self_closing {
                    return;
                }
                let mut style = self.current_style();
                match name {
                    "b" | "strong" => style.bold = true,
                    "i" | "em" => style.italic = true,
                    "u" | "ins" => style.underline = true,
                    "s" | "strike" | "del" => style.strikethrough = true,
                    "font" => {
                        if let Some(face) = Token::attr(attributes, "face") {
                            style.apply_declaration("font-family", face);
                        }
                        if let Some(color) = Token::attr(attributes, "color") {
                            style.apply_declaration("color", color);
                        }
                    }
                    _ => {}
                }
                if let Some(css) = Token::attr(attributes, "style") {
                    for (prop, value) in parse_declarations(css) {
                        style.apply_declaration(&prop, &value);
                    }
                }
                self.styles.push((name.to_string(), style));
            }
        }
    }

    fn end_tag(&mut self, name: &str) {
        match name {
            "a" => self.close_link(),
            "ul" | "ol" => {
                if self.table.is_none() {
                    self.close_current();
                    self.lists.pop();
                }
            }
            "table" => self.finish_table(),
            "tr" => {
                if let Some(table) = self.table.as_mut() {
                    table.finish_row();
                }
            }
            "td" | "th" => {
                if let Some(table) = self.table.as_mut() {
                    table.finish_cell();
                }
            }
            "video" => {
                if let Some(Some(src)) = self.video.take() {
                    self.blocks.push(Block::Embed(Embed::Video { src }));
                }
            }
            _ if BLOCK_ELEMENTS.contains(&name) => {
                if self.table.is_some() {
                    return;
                }
                if let Some(idx) = self.contexts.iter().rposition(|ctx| ctx.tag == name) {
                    self.close_current();
                    for ctx in self.contexts.drain(idx..) {
                        if ctx.tag == "pre" {
                            self.preformatted = self.preformatted.saturating_sub(1);
                        }
                    }
                }
            }
            _ => {
                if let Some(idx) = self.styles.iter().rposition(|(tag, _)| tag == name) {
                    self.styles.truncate(idx);
                }
            }
        }
    }

    fn open_block(&mut self, name: &str, attributes: &[(String, String)]) {
        let parent = self.contexts.last();
        let inherited_kind = parent.map(|ctx| ctx.kind).unwrap_or_default();
        let inherited_align = parent.map(|ctx| ctx.align).unwrap_or_default();

        let kind = match name {
            "li" => TextKind::ListItem {
                ordered: self.lists.last().copied().unwrap_or(false),
            },
            "blockquote" => TextKind::Quote,
            "pre" => TextKind::Code,
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                TextKind::Heading(name[1..].parse().unwrap_or(1))
            }
            _ => inherited_kind,
        };
        let align = alignment_of(attributes).unwrap_or(inherited_align);
        if name == "pre" {
            self.preformatted += 1;
        }

        // An element nested in an empty wrapper replaces it
        match self.current.as_ref() {
            Some(open) if open.block.is_empty() => self.current = None,
            Some(_) => self.close_current(),
            None => {}
        }

        self.contexts.push(BlockContext {
            tag: name.to_string(),
            kind,
            align,
        });
        let mut block = TextBlock::new(kind);
        block.align = align;
        self.current = Some(OpenBlock {
            block,
            explicit: true,
        });
    }

    fn text(&mut self, raw: &str) {
        if self.video.is_some() {
            return;
        }
        let in_cell = self.table.as_ref().map(|t| t.cell.is_some());
        if in_cell == Some(false) {
            // Text between rows or cells
            return;
        }

        let mut text = if self.preformatted > 0 {
            raw.to_string()
        } else {
            collapse_whitespace(raw)
        };

        if self.preformatted == 0 && text.starts_with(' ') {
            let at_line_start = match self.link.as_ref() {
                Some((_, runs)) if !runs.is_empty() => {
                    runs.last().map(|r| r.text.ends_with(' ')).unwrap_or(false)
                }
                _ => self.target_inlines().map(ends_with_space).unwrap_or(true),
            };
            if at_line_start {
                text.remove(0);
            }
        }
        if text.is_empty() {
            return;
        }

        let run = TextRun::new(text, self.current_style());
        self.push_inline(Inline::Text(run));
    }

    /// Inline sequence currently receiving content, if one is open
    fn target_inlines(&self) -> Option<&[Inline]> {
        if let Some(table) = self.table.as_ref() {
            return table.cell.as_ref().map(|c| c.inlines.as_slice());
        }
        self.current.as_ref().map(|open| open.block.inlines.as_slice())
    }

    fn target_mut(&mut self) -> &mut Vec<Inline> {
        if let Some(table) = self.table.as_mut() {
            return &mut table.cell_mut().inlines;
        }
        let contexts = &self.contexts;
        let open = self.current.get_or_insert_with(|| {
            let (kind, align) = contexts
                .last()
                .map(|ctx| (ctx.kind, ctx.align))
                .unwrap_or_default();
            let mut block = TextBlock::new(kind);
            block.align = align;
            OpenBlock {
                block,
                explicit: false,
            }
        });
        &mut open.block.inlines
    }

    fn push_inline(&mut self, inline: Inline) {
        match inline {
            Inline::Text(run) if self.link.is_some() => {
                if let Some((_, runs)) = self.link.as_mut() {
                    runs.push(run);
                }
            }
            other => {
                // Links hold text only; other content splits the link
                let reopen = self.flush_link();
                self.target_mut().push(other);
                if let Some(href) = reopen {
                    self.link = Some((href, Vec::new()));
                }
            }
        }
    }

    /// Emit the open link's runs, returning its href so it can continue
    fn flush_link(&mut self) -> Option<String> {
        let (href, runs) = self.link.take()?;
        if !runs.is_empty() {
            let link = Inline::Link {
                href: href.clone(),
                runs,
            };
            self.target_mut().push(link);
        }
        Some(href)
    }

    fn close_link(&mut self) {
        self.flush_link();
    }

    fn close_current(&mut self) {
        if let Some(href) = self.flush_link() {
            self.link = Some((href, Vec::new()));
        }
        let Some(mut open) = self.current.take() else {
            return;
        };
        if self.preformatted == 0 {
            if let Some(Inline::Text(run)) = open.block.inlines.last_mut() {
                let trimmed = run.text.trim_end_matches(' ').len();
                run.text.truncate(trimmed);
            }
        }
        if open.explicit || open.block.inlines.iter().any(|i| !i.is_empty()) {
            self.blocks.push(Block::Text(open.block));
        }
    }

    fn finish_table(&mut self) {
        if let Some(mut builder) = self.table.take() {
            self.flush_link_into_cell(&mut builder);
            builder.finish_row();
            if !builder.table.rows.is_empty() {
                self.blocks.push(Block::Table(builder.table));
            }
        }
    }

    fn flush_link_into_cell(&mut self, builder: &mut TableBuilder) {
        if let Some((href, runs)) = self.link.take() {
            if !runs.is_empty() {
                builder.cell_mut().inlines.push(Inline::Link { href, runs });
            }
        }
    }

    fn finish(mut self) -> (Document, bool) {
        self.close_link();
        self.finish_table();
        self.close_current();
        if let Some(Some(src)) = self.video.take() {
            self.blocks.push(Block::Embed(Embed::Video { src }));
        }
        (Document::from_blocks(self.blocks), self.saw_block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_block(doc: &Document, idx: usize) -> &TextBlock {
        doc.blocks[idx].as_text().expect("text block")
    }

    #[test]
    fn test_bare_text_gets_implicit_paragraph() {
        let doc = parse("hello");
        assert_eq!(doc.blocks.len(), 1);
        assert_eq!(text_block(&doc, 0).kind, TextKind::Paragraph);
        assert_eq!(doc.plain_text(), "hello");
    }

    #[test]
    fn test_nested_inline_styles() {
        let doc = parse("<p>a<b>b<i>c</i></b>d</p>");
        let inlines = &text_block(&doc, 0).inlines;
        assert_eq!(inlines.len(), 4);
        match &inlines[2] {
            Inline::Text(run) => {
                assert!(run.style.bold && run.style.italic);
                assert_eq!(run.text, "c");
            }
            other => panic!("unexpected inline {:?}", other),
        }
    }

    #[test]
    fn test_lists_and_quotes() {
        let doc = parse("<ul><li>one</li><li>two</li></ul><blockquote><p>q</p></blockquote>");
        assert_eq!(doc.blocks.len(), 3);
        assert_eq!(
            text_block(&doc, 0).kind,
            TextKind::ListItem { ordered: false }
        );
        assert_eq!(text_block(&doc, 2).kind, TextKind::Quote);
    }

    #[test]
    fn test_alignment_is_inherited_from_wrapper() {
        let doc = parse(r#"<div style="text-align: center"><p>x</p></div>"#);
        assert_eq!(doc.blocks.len(), 1);
        assert_eq!(text_block(&doc, 0).align, Alignment::Center);
    }

    #[test]
    fn test_empty_paragraph_with_placeholder_break() {
        let doc = parse("<p><br></p>");
        assert_eq!(doc.blocks.len(), 1);
        assert!(text_block(&doc, 0).is_empty());
    }

    #[test]
    fn test_whitespace_between_blocks_is_ignored() {
        let doc = parse("<p>a</p>\n  <p>  b  c </p>\n");
        assert_eq!(doc.blocks.len(), 2);
        assert_eq!(doc.plain_text(), "a\nb c");
    }

    #[test]
    fn test_pre_keeps_whitespace() {
        let doc = parse("<pre>fn main() {\n    x\n}</pre>");
        assert_eq!(text_block(&doc, 0).kind, TextKind::Code);
        assert_eq!(doc.plain_text(), "fn main() {\n    x\n}");
    }

    #[test]
    fn test_table_cells() {
        let doc = parse(
            r#"<table border="1"><tbody><tr><td>a</td><td></td></tr><tr><th>b</th><td><br></td></tr></tbody></table>"#,
        );
        match &doc.blocks[0] {
            Block::Table(table) => {
                assert!(table.bordered);
                assert_eq!(table.cell_count(), 4);
                assert!(table.rows[1][0].header);
                assert!(table.rows[1][1].is_empty());
            }
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_iframe_and_video_blocks() {
        let doc = parse(
            r#"<iframe src="https://www.youtube.com/embed/x" width="640" height="360"></iframe><video controls><source src="clip.mp4"></video>"#,
        );
        assert_eq!(
            doc.blocks,
            vec![
                Block::Embed(Embed::Frame {
                    src: "https://www.youtube.com/embed/x".to_string(),
                    width: 640,
                    height: 360,
                }),
                Block::Embed(Embed::Video {
                    src: "clip.mp4".to_string()
                }),
            ]
        );
    }

    #[test]
    fn test_image_inside_link_splits_link() {
        let doc = parse(r#"<p><a href="/x">go <img src="i.png"> there</a></p>"#);
        let inlines = &text_block(&doc, 0).inlines;
        assert_eq!(inlines.len(), 3);
        assert!(matches!(inlines[1], Inline::Image { .. }));
    }

    #[test]
    fn test_fragment_inline_vs_blocks() {
        assert!(matches!(
            parse_fragment("<b>x</b> y"),
            Fragment::Inline(ref inlines) if inlines.len() == 2
        ));
        assert!(matches!(
            parse_fragment("<p>x</p><p>y</p>"),
            Fragment::Blocks(ref blocks) if blocks.len() == 2
        ));
    }
}
