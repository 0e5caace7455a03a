//! Character references: decoding on read, escaping on write.

/// Decode the small set of character references content-editable markup uses.
///
/// Named: `&amp;`, `&lt;`, `&gt;`, `&quot;`, `&apos;`, `&nbsp;`. Numeric
/// references decode when semicolon-terminated and a valid scalar value.
/// Anything else passes through unchanged.
pub fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }

    const NAMED: &[(&str, char)] = &[
        ("amp;", '&'),
        ("lt;", '<'),
        ("gt;", '>'),
        ("quot;", '"'),
        ("apos;", '\''),
        ("nbsp;", '\u{a0}'),
    ];
    // 0x10FFFF has 7 decimal digits
    const MAX_DIGITS: usize = 7;

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];

        if let Some((name, ch)) = NAMED.iter().find(|(name, _)| after.starts_with(name)) {
            out.push(*ch);
            rest = &after[name.len()..];
            continue;
        }

        if let Some(numeric) = after.strip_prefix('#') {
            let (digits, radix) = match numeric.strip_prefix(|c: char| c == 'x' || c == 'X') {
                Some(hex) => (hex, 16),
                None => (numeric, 10),
            };
            if let Some(end) = digits.find(';') {
                let body = &digits[..end];
                let valid = !body.is_empty()
                    && body.len() <= MAX_DIGITS
                    && body.chars().all(|c| c.is_digit(radix));
                if let Some(ch) = valid
                    .then(|| u32::from_str_radix(body, radix).ok())
                    .flatten()
                    .and_then(char::from_u32)
                {
                    out.push(ch);
                    let consumed = after.len() - digits.len() + end + 1;
                    rest = &after[consumed..];
                    continue;
                }
            }
        }

        out.push('&');
        rest = after;
    }
    out.push_str(rest);
    out
}

/// Escape text content
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            other => out.push(other),
        }
    }
    out
}

/// Escape a double-quoted attribute value
pub fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    out
}
