//! Markup tokenizer for editor content.
//!
//! Tag and attribute names are ASCII `[A-Za-z0-9:_-]` and lowercased.
//! Comments and doctypes are skipped; `script`/`style` bodies are dropped.
//! A `<` that does not start a well-formed tag is treated as text.

use super::entities::decode_entities;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    StartTag {
        name: String,
        attributes: Vec<(String, String)>,
        self_closing: bool,
    },
    EndTag(String),
    Text(String),
}

impl Token {
    /// Value of an attribute on a start tag
    pub fn attr<'a>(attributes: &'a [(String, String)], name: &str) -> Option<&'a str> {
        attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b':' | b'_' | b'-')
}

const RAWTEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Tokenize a markup string
pub fn tokenize(input: &str) -> Vec<Token> {
    let bytes = input.as_bytes();
    let mut out = Vec::new();
    let mut text_start = 0;
    let mut i = 0;

    // Slice endpoints are always at ASCII bytes, so they are char boundaries.
    while i < bytes.len() {
        if bytes[i] != b'<' {
            i += 1;
            continue;
        }

        let parsed = if input[i..].starts_with("<!--") {
            let end = input[i + 4..]
                .find("-->")
                .map(|e| i + 4 + e + 3)
                .unwrap_or(bytes.len());
            Some((None, end))
        } else if input[i..].starts_with("<!") || input[i..].starts_with("<?") {
            let end = input[i..].find('>').map(|e| i + e + 1).unwrap_or(bytes.len());
            Some((None, end))
        } else {
            parse_tag(input, i).map(|(tok, end)| (Some(tok), end))
        };

        let Some((token, end)) = parsed else {
            i += 1;
            continue;
        };

        flush_text(input, text_start, i, &mut out);
        i = end;
        text_start = end;

        if let Some(token) = token {
            let rawtext = match &token {
                Token::StartTag {
                    name, self_closing, ..
                } if !self_closing && RAWTEXT_ELEMENTS.contains(&name.as_str()) => {
                    Some(format!("</{}", name))
                }
                _ => None,
            };
            match rawtext {
                Some(close) => {
                    // Drop the element entirely, body included
                    let lower = input[i..].to_ascii_lowercase();
                    let body_end = lower.find(&close).map(|e| i + e).unwrap_or(bytes.len());
                    let close_end = input[body_end..]
                        .find('>')
                        .map(|e| body_end + e + 1)
                        .unwrap_or(bytes.len());
                    i = close_end;
                    text_start = close_end;
                }
                None => out.push(token),
            }
        }
    }
    flush_text(input, text_start, bytes.len(), &mut out);
    out
}

fn flush_text(input: &str, start: usize, end: usize, out: &mut Vec<Token>) {
    if start < end {
        let decoded = decode_entities(&input[start..end]);
        if !decoded.is_empty() {
            out.push(Token::Text(decoded));
        }
    }
}

/// Parse a start or end tag beginning at `start` (which holds `<`).
/// Returns the token and the index just past `>`.
fn parse_tag(input: &str, start: usize) -> Option<(Token, usize)> {
    let bytes = input.as_bytes();
    let mut i = start + 1;
    let closing = bytes.get(i) == Some(&b'/');
    if closing {
        i += 1;
    }

    let name_start = i;
    while i < bytes.len() && is_name_byte(bytes[i]) {
        i += 1;
    }
    if i == name_start || !bytes[name_start].is_ascii_alphabetic() {
        return None;
    }
    let name = input[name_start..i].to_ascii_lowercase();

    if closing {
        let end = input[i..].find('>')? + i + 1;
        return Some((Token::EndTag(name), end));
    }

    let mut attributes = Vec::new();
    let mut self_closing = false;
    loop {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        match *bytes.get(i)? {
            b'>' => {
                i += 1;
                break;
            }
            b'/' => {
                self_closing = true;
                i += 1;
                continue;
            }
            _ => {}
        }

        let attr_start = i;
        while i < bytes.len() && is_name_byte(bytes[i]) {
            i += 1;
        }
        if i == attr_start {
            // Unexpected byte inside a tag: skip it
            i += 1;
            continue;
        }
        self_closing = false;
        let attr_name = input[attr_start..i].to_ascii_lowercase();

        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        let mut value = String::new();
        if bytes.get(i) == Some(&b'=') {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            match *bytes.get(i)? {
                quote @ (b'"' | b'\'') => {
                    let close = input[i + 1..].find(quote as char)? + i + 1;
                    value = decode_entities(&input[i + 1..close]);
                    i = close + 1;
                }
                _ => {
                    let value_start = i;
                    while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>'
                    {
                        i += 1;
                    }
                    value = decode_entities(&input[value_start..i]);
                }
            }
        }
        if !attributes.iter().any(|(n, _): &(String, String)| *n == attr_name) {
            attributes.push((attr_name, value));
        }
    }

    Some((
        Token::StartTag {
            name,
            attributes,
            self_closing,
        },
        i,
    ))
}
