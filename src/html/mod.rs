//! Markup codec for editor content
//!
//! [`parse`] reads the markup a host application stores into a [`Document`]
//! and [`serialize`] writes the canonical form back out.

mod entities;
mod reader;
mod tokenizer;
mod writer;

pub use entities::{decode_entities, escape_attr, escape_text};
pub use reader::{parse, parse_fragment, Fragment};
pub use tokenizer::{tokenize, Token};
pub use writer::{serialize, write_inlines};
