//! Declarative host markup: tokenizer and parser.

pub mod parser;
pub mod tokenizer;

pub use parser::{
    parse_fragment, parse_into, MarkupError, FRAGMENT_TAG, ITEM_MARKER_ATTR, ITEM_PROPERTY,
    TEXT_TAG,
};
