//! Canonical markup output for a [`Document`].

use super::entities::{escape_attr, escape_text};
use crate::model::{Block, Document, Embed, Inline, Table, TextBlock, TextKind, TextRun, TextStyle};

const TABLE_STYLE: &str = "border-collapse: collapse; width: 100%;";
const CELL_STYLE: &str = "border: 1px solid #ccc; padding: 8px;";

/// Serialize a document. An empty document serializes to the empty string.
pub fn serialize(doc: &Document) -> String {
    if doc.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    let mut open_list: Option<bool> = None;
    for block in &doc.blocks {
        let list = match block {
            Block::Text(TextBlock {
                kind: TextKind::ListItem { ordered },
                ..
            }) => Some(*ordered),
            _ => None,
        };
        if open_list != list {
            if let Some(ordered) = open_list {
                out.push_str(if ordered { "</ol>" } else { "</ul>" });
            }
            if let Some(ordered) = list {
                out.push_str(if ordered { "<ol>" } else { "<ul>" });
            }
            open_list = list;
        }

        match block {
            Block::Text(text) => write_text_block(&mut out, text),
            Block::Table(table) => write_table(&mut out, table),
            Block::Embed(embed) => write_embed(&mut out, embed),
        }
    }
    if let Some(ordered) = open_list {
        out.push_str(if ordered { "</ol>" } else { "</ul>" });
    }
    out
}

fn block_tag(kind: TextKind) -> String {
    match kind {
        TextKind::Paragraph => "p".to_string(),
        TextKind::Heading(level) => format!("h{}", level.clamp(1, 6)),
        TextKind::Quote => "blockquote".to_string(),
        TextKind::Code => "pre".to_string(),
        TextKind::ListItem { .. } => "li".to_string(),
    }
}

fn write_text_block(out: &mut String, block: &TextBlock) {
    let tag = block_tag(block.kind);
    out.push('<');
    out.push_str(&tag);
    if block.align != Default::default() {
        out.push_str(&format!(
            " style=\"text-align: {};\"",
            block.align.css_value()
        ));
    }
    out.push('>');
    if block.is_empty() {
        out.push_str("<br>");
    } else {
        write_inlines(out, &block.inlines);
    }
    out.push_str("</");
    out.push_str(&tag);
    out.push('>');
}

/// Write inline content
pub fn write_inlines(out: &mut String, inlines: &[Inline]) {
    for item in inlines {
        match item {
            Inline::Text(run) => write_run(out, run),
            Inline::Link { href, runs } => {
                out.push_str(&format!("<a href=\"{}\">", escape_attr(href)));
                for run in runs {
                    write_run(out, run);
                }
                out.push_str("</a>");
            }
            Inline::Image { src, alt } => {
                out.push_str(&format!("<img src=\"{}\"", escape_attr(src)));
                if let Some(alt) = alt {
                    out.push_str(&format!(" alt=\"{}\"", escape_attr(alt)));
                }
                out.push('>');
            }
            Inline::LineBreak => out.push_str("<br>"),
        }
    }
}

fn span_declarations(style: &TextStyle) -> String {
    let mut decls = Vec::new();
    if let Some(family) = &style.font_family {
        decls.push(format!("font-family: {};", family));
    }
    if let Some(size) = &style.font_size {
        decls.push(format!("font-size: {};", size));
    }
    if let Some(color) = &style.color {
        decls.push(format!("color: {};", color));
    }
    if let Some(background) = &style.background {
        decls.push(format!("background-color: {};", background));
    }
    decls.join(" ")
}

fn write_run(out: &mut String, run: &TextRun) {
    let style = &run.style;
    let mut closers: Vec<&str> = Vec::new();
    if style.has_declarations() {
        out.push_str(&format!(
            "<span style=\"{}\">",
            escape_attr(&span_declarations(style))
        ));
        closers.push("</span>");
    }
    for (on, open, close) in [
        (style.bold, "<b>", "</b>"),
        (style.italic, "<i>", "</i>"),
        (style.underline, "<u>", "</u>"),
        (style.strikethrough, "<s>", "</s>"),
    ] {
        if on {
            out.push_str(open);
            closers.push(close);
        }
    }
    out.push_str(&escape_text(&run.text));
    for close in closers.iter().rev() {
        out.push_str(close);
    }
}

fn write_table(out: &mut String, table: &Table) {
    if table.bordered {
        out.push_str(&format!("<table style=\"{}\">", TABLE_STYLE));
    } else {
        out.push_str("<table>");
    }
    out.push_str("<tbody>");
    for row in &table.rows {
        out.push_str("<tr>");
        for cell in row {
            let tag = if cell.header { "th" } else { "td" };
            if table.bordered {
                out.push_str(&format!("<{} style=\"{}\">", tag, CELL_STYLE));
            } else {
                out.push_str(&format!("<{}>", tag));
            }
            write_inlines(out, &cell.inlines);
            out.push_str(&format!("</{}>", tag));
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
}

fn write_embed(out: &mut String, embed: &Embed) {
    match embed {
        Embed::Frame { src, width, height } => out.push_str(&format!(
            "<iframe src=\"{}\" width=\"{}\" height=\"{}\" frameborder=\"0\" allowfullscreen></iframe>",
            escape_attr(src),
            width,
            height
        )),
        Embed::Video { src } => out.push_str(&format!(
            "<video src=\"{}\" controls></video>",
            escape_attr(src)
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::parse;
    use crate::model::Alignment;

    #[test]
    fn test_empty_document_is_empty_string() {
        assert_eq!(serialize(&Document::new()), "");
        assert_eq!(serialize(&parse("<p><br></p>")), "");
    }

    #[test]
    fn test_list_items_are_grouped() {
        let doc = parse("<ol><li>a</li><li>b</li></ol><ul><li>c</li></ul><p>d</p>");
        assert_eq!(
            serialize(&doc),
            "<ol><li>a</li><li>b</li></ol><ul><li>c</li></ul><p>d</p>"
        );
    }

    #[test]
    fn test_run_wrapping_order() {
        let doc = parse(r#"<p><span style="color: red"><i><b>x</b></i></span></p>"#);
        assert_eq!(
            serialize(&doc),
            r#"<p><span style="color: red;"><b><i>x</i></b></span></p>"#
        );
    }

    #[test]
    fn test_alignment_and_escaping() {
        let mut block = TextBlock::with_inlines(
            TextKind::Heading(2),
            vec![Inline::Text(TextRun::plain("a < b & c"))],
        );
        block.align = Alignment::Right;
        let doc = Document::from_blocks(vec![Block::Text(block)]);
        assert_eq!(
            serialize(&doc),
            r#"<h2 style="text-align: right;">a &lt; b &amp; c</h2>"#
        );
    }

    #[test]
    fn test_table_and_embeds() {
        let doc = Document::from_blocks(vec![
            Block::Table(Table::grid(1, 2)),
            Block::Embed(Embed::Video {
                src: "a.mp4".to_string(),
            }),
        ]);
        let out = serialize(&doc);
        assert!(out.starts_with(r#"<table style="border-collapse: collapse; width: 100%;"><tbody><tr><td style="#));
        assert_eq!(out.matches("<td").count(), 2);
        assert!(out.ends_with(r#"<video src="a.mp4" controls></video>"#));
    }

    #[test]
    fn test_serialized_output_reparses_to_same_tree() {
        let source = r#"<h1>T</h1><p>one <a href="/x"><b>two</b></a><br>three</p><blockquote>q</blockquote><pre>a
  b</pre>"#;
        let doc = parse(source);
        assert_eq!(parse(&serialize(&doc)), doc);
    }
}
