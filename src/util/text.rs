//! Character classes for word-wise caret movement in prose

/// Stands in for an inline object (image) in a block's character sequence
pub const OBJECT_REPLACEMENT: char = '\u{fffc}';

/// Character class for word navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharType {
    Whitespace,
    /// Letters, digits, underscores and in-word apostrophes
    WordChar,
    Punctuation,
    /// An embedded object such as an image
    Object,
}

/// Classify a character for word navigation
pub fn char_type(ch: char) -> CharType {
    if ch == OBJECT_REPLACEMENT {
        CharType::Object
    } else if ch.is_whitespace() {
        CharType::Whitespace
    } else if ch.is_alphanumeric() || matches!(ch, '_' | '\'' | '\u{2019}') {
        CharType::WordChar
    } else {
        CharType::Punctuation
    }
}
