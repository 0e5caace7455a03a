//! Operations on inline sequences: splitting at character offsets, styling
//! sub-ranges and normalization.

use super::document::{Inline, TextRun};
use super::style::TextStyle;

/// Byte index of the `chars`-th character (or the string length)
pub fn byte_index(s: &str, chars: usize) -> usize {
    s.char_indices().nth(chars).map(|(i, _)| i).unwrap_or(s.len())
}

pub fn inlines_len(inlines: &[Inline]) -> usize {
    inlines.iter().map(Inline::len).sum()
}

fn split_run(run: TextRun, at: usize) -> (TextRun, TextRun) {
    let idx = byte_index(&run.text, at);
    let right = TextRun::new(&run.text[idx..], run.style.clone());
    let mut left = run;
    left.text.truncate(idx);
    (left, right)
}

fn split_runs(runs: Vec<TextRun>, at: usize) -> (Vec<TextRun>, Vec<TextRun>) {
    let mut left = Vec::new();
    let mut right = Vec::new();
    let mut pos = 0;
    for run in runs {
        let len = run.len();
        if pos + len <= at {
            left.push(run);
        } else if pos >= at {
            right.push(run);
        } else {
            let (l, r) = split_run(run, at - pos);
            left.push(l);
            right.push(r);
        }
        pos += len;
    }
    (left, right)
}

/// Split an inline sequence at a character offset
pub fn split_at(inlines: Vec<Inline>, at: usize) -> (Vec<Inline>, Vec<Inline>) {
    let mut left = Vec::new();
    let mut right = Vec::new();
    let mut pos = 0;
    for item in inlines {
        let len = item.len();
        if pos + len <= at {
            left.push(item);
        } else if pos >= at {
            right.push(item);
        } else {
            // Only multi-position items can straddle the offset
            match item {
                Inline::Text(run) => {
                    let (l, r) = split_run(run, at - pos);
                    left.push(Inline::Text(l));
                    right.push(Inline::Text(r));
                }
                Inline::Link { href, runs } => {
                    let (l, r) = split_runs(runs, at - pos);
                    left.push(Inline::Link {
                        href: href.clone(),
                        runs: l,
                    });
                    right.push(Inline::Link { href, runs: r });
                }
                other => right.push(other),
            }
        }
        pos += len;
    }
    (left, right)
}

/// Split into the parts before, inside and after `start..end`
pub fn split_range(
    inlines: Vec<Inline>,
    start: usize,
    end: usize,
) -> (Vec<Inline>, Vec<Inline>, Vec<Inline>) {
    let (head, after) = split_at(inlines, end);
    let (before, middle) = split_at(head, start);
    (before, middle, after)
}

/// Visit every text run, including runs nested in links
pub fn for_each_run_mut(inlines: &mut [Inline], mut f: impl FnMut(&mut TextRun)) {
    for item in inlines {
        match item {
            Inline::Text(run) => f(run),
            Inline::Link { runs, .. } => runs.iter_mut().for_each(&mut f),
            Inline::Image { .. } | Inline::LineBreak => {}
        }
    }
}

/// Collect references to every text run
pub fn runs_of(inlines: &[Inline]) -> Vec<&TextRun> {
    let mut out = Vec::new();
    for item in inlines {
        match item {
            Inline::Text(run) => out.push(run),
            Inline::Link { runs, .. } => out.extend(runs.iter()),
            Inline::Image { .. } | Inline::LineBreak => {}
        }
    }
    out
}

/// Style of the text at `offset`: the character before it, or the first
/// character when the offset is at the start.
pub fn style_at(inlines: &[Inline], offset: usize) -> TextStyle {
    let mut pos = 0;
    let mut first = None;
    for item in inlines {
        let len = item.len();
        let runs: Vec<&TextRun> = match item {
            Inline::Text(run) => vec![run],
            Inline::Link { runs, .. } => runs.iter().collect(),
            _ => Vec::new(),
        };
        let mut run_pos = pos;
        for run in runs {
            let run_len = run.len();
            if first.is_none() && run_len > 0 {
                first = Some(&run.style);
            }
            if offset > run_pos && offset <= run_pos + run_len {
                return run.style.clone();
            }
            run_pos += run_len;
        }
        pos += len;
    }
    first.cloned().unwrap_or_default()
}

/// Replace links with their bare runs
pub fn unwrap_links(inlines: Vec<Inline>) -> Vec<Inline> {
    let mut out = Vec::with_capacity(inlines.len());
    for item in inlines {
        match item {
            Inline::Link { runs, .. } => out.extend(runs.into_iter().map(Inline::Text)),
            other => out.push(other),
        }
    }
    out
}

/// Wrap every text run in a link to `href`; nested links are replaced
pub fn wrap_in_link(inlines: Vec<Inline>, href: &str) -> Vec<Inline> {
    let mut out = Vec::new();
    let mut pending: Vec<TextRun> = Vec::new();
    for item in unwrap_links(inlines) {
        match item {
            Inline::Text(run) => pending.push(run),
            other => {
                if !pending.is_empty() {
                    out.push(Inline::Link {
                        href: href.to_string(),
                        runs: std::mem::take(&mut pending),
                    });
                }
                out.push(other);
            }
        }
    }
    if !pending.is_empty() {
        out.push(Inline::Link {
            href: href.to_string(),
            runs: pending,
        });
    }
    out
}

fn normalize_runs(runs: Vec<TextRun>) -> Vec<TextRun> {
    let mut out: Vec<TextRun> = Vec::with_capacity(runs.len());
    for run in runs {
        if run.is_empty() {
            continue;
        }
        if let Some(prev) = out.last_mut() {
            if prev.style == run.style {
                prev.text.push_str(&run.text);
                continue;
            }
        }
        out.push(run);
    }
    out
}

/// Merge `item` into `prev` when they are compatible; hands it back otherwise
fn merge_into(prev: &mut Inline, item: Inline) -> Option<Inline> {
    match (prev, item) {
        (Inline::Text(prev), Inline::Text(run)) if prev.style == run.style => {
            prev.text.push_str(&run.text);
            None
        }
        (
            Inline::Link {
                href: prev_href,
                runs: prev_runs,
            },
            Inline::Link { href, runs },
        ) if *prev_href == href => {
            prev_runs.extend(runs);
            *prev_runs = normalize_runs(std::mem::take(prev_runs));
            None
        }
        (_, item) => Some(item),
    }
}

/// Drop empty runs and links and merge equal neighbours
pub fn merge_inlines(inlines: Vec<Inline>) -> Vec<Inline> {
    let mut out: Vec<Inline> = Vec::with_capacity(inlines.len());
    for item in inlines {
        let item = match item {
            Inline::Text(run) if run.is_empty() => continue,
            Inline::Link { href, runs } => {
                let runs = normalize_runs(runs);
                if runs.is_empty() {
                    continue;
                }
                Inline::Link { href, runs }
            }
            other => other,
        };
        let rest = match out.last_mut() {
            Some(prev) => merge_into(prev, item),
            None => Some(item),
        };
        if let Some(item) = rest {
            out.push(item);
        }
    }
    out
}

/// Canonical form of parsed content: [`merge_inlines`], and a lone line
/// break (the placeholder an empty block carries) removed.
pub fn normalize_inlines(inlines: Vec<Inline>) -> Vec<Inline> {
    let mut out = merge_inlines(inlines);
    if matches!(out.as_slice(), [Inline::LineBreak]) {
        out.clear();
    }
    out
}

/// One char per caret position: line breaks are `'\n'`, images U+FFFC
pub fn position_chars(inlines: &[Inline]) -> Vec<char> {
    let mut out = Vec::new();
    for item in inlines {
        match item {
            Inline::Text(run) => out.extend(run.text.chars()),
            Inline::Link { runs, .. } => runs.iter().for_each(|r| out.extend(r.text.chars())),
            Inline::LineBreak => out.push('\n'),
            Inline::Image { .. } => out.push(crate::util::OBJECT_REPLACEMENT),
        }
    }
    out
}

/// Insert `item` at a character offset. Text typed strictly inside a link
/// becomes part of that link.
pub fn insert_at(inlines: Vec<Inline>, at: usize, item: Inline) -> Vec<Inline> {
    let (mut left, right) = split_at(inlines, at);
    let joins_link = matches!(
        (left.last(), right.first(), &item),
        (Some(Inline::Link { href: a, .. }), Some(Inline::Link { href: b, .. }), Inline::Text(_))
            if a == b
    );
    match item {
        Inline::Text(run) if joins_link => {
            if let Some(Inline::Link { runs, .. }) = left.last_mut() {
                runs.push(run);
            }
        }
        item => left.push(item),
    }
    left.extend(right);
    merge_inlines(left)
}

/// Text content; line breaks become newlines, images contribute nothing
pub fn plain_text_of(inlines: &[Inline]) -> String {
    let mut out = String::new();
    for item in inlines {
        match item {
            Inline::Text(run) => out.push_str(&run.text),
            Inline::Link { runs, .. } => runs.iter().for_each(|r| out.push_str(&r.text)),
            Inline::LineBreak => out.push('\n'),
            Inline::Image { .. } => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Inline {
        Inline::Text(TextRun::plain(s))
    }

    fn bold(s: &str) -> Inline {
        let mut style = TextStyle::plain();
        style.bold = true;
        Inline::Text(TextRun::new(s, style))
    }

    #[test]
    fn test_split_at_inside_run() {
        let (l, r) = split_at(vec![text("hello")], 2);
        assert_eq!(l, vec![text("he")]);
        assert_eq!(r, vec![text("llo")]);
    }

    #[test]
    fn test_split_at_multibyte() {
        let (l, r) = split_at(vec![text("añb")], 2);
        assert_eq!(l, vec![text("añ")]);
        assert_eq!(r, vec![text("b")]);
    }

    #[test]
    fn test_split_link_keeps_href_on_both_sides() {
        let link = Inline::Link {
            href: "https://x.test".to_string(),
            runs: vec![TextRun::plain("abcd")],
        };
        let (l, r) = split_at(vec![link], 1);
        assert_eq!(l.len(), 1);
        assert_eq!(r.len(), 1);
        assert!(matches!(&r[0], Inline::Link { href, .. } if href == "https://x.test"));
    }

    #[test]
    fn test_split_range_three_parts() {
        let (a, b, c) = split_range(vec![text("hello world")], 2, 7);
        assert_eq!(plain_text_of(&a), "he");
        assert_eq!(plain_text_of(&b), "llo w");
        assert_eq!(plain_text_of(&c), "orld");
    }

    #[test]
    fn test_normalize_merges_equal_runs() {
        let merged = normalize_inlines(vec![text("ab"), text(""), text("cd"), bold("e")]);
        assert_eq!(merged, vec![text("abcd"), bold("e")]);
    }

    #[test]
    fn test_normalize_drops_lone_line_break() {
        assert!(normalize_inlines(vec![Inline::LineBreak]).is_empty());
        assert_eq!(
            normalize_inlines(vec![text("a"), Inline::LineBreak]).len(),
            2
        );
    }

    #[test]
    fn test_insert_inside_link_extends_link() {
        let link = Inline::Link {
            href: "/x".to_string(),
            runs: vec![TextRun::plain("abcd")],
        };
        let out = insert_at(vec![link], 2, text("Z"));
        assert_eq!(
            out,
            vec![Inline::Link {
                href: "/x".to_string(),
                runs: vec![TextRun::plain("abZcd")],
            }]
        );
    }

    #[test]
    fn test_insert_at_link_edge_stays_outside() {
        let link = Inline::Link {
            href: "/x".to_string(),
            runs: vec![TextRun::plain("ab")],
        };
        let out = insert_at(vec![link], 2, text("c"));
        assert_eq!(out.len(), 2);
        assert_eq!(out[1], text("c"));
    }

    #[test]
    fn test_position_chars_counts_atoms() {
        let inlines = vec![
            text("a"),
            Inline::LineBreak,
            Inline::Image {
                src: "i.png".to_string(),
                alt: None,
            },
        ];
        assert_eq!(position_chars(&inlines).len(), inlines_len(&inlines));
    }

    #[test]
    fn test_style_at_uses_preceding_char() {
        let inlines = vec![text("ab"), bold("cd")];
        assert!(!style_at(&inlines, 2).bold);
        assert!(style_at(&inlines, 3).bold);
        assert!(!style_at(&inlines, 0).bold);
    }

    #[test]
    fn test_wrap_in_link_replaces_nested_links() {
        let inlines = vec![
            text("a"),
            Inline::Link {
                href: "old".to_string(),
                runs: vec![TextRun::plain("b")],
            },
        ];
        let wrapped = normalize_inlines(wrap_in_link(inlines, "new"));
        assert_eq!(
            wrapped,
            vec![Inline::Link {
                href: "new".to_string(),
                runs: vec![TextRun::plain("ab")],
            }]
        );
    }
}
