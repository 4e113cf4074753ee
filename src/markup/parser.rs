//! Markup parser: builds DOM nodes from an HTML-like fragment.
//!
//! The supported subset is what a host page needs to declare a table and its
//! column templates: elements, text, quoted/unquoted/boolean attributes,
//! comments, self-closing and void elements, and the five basic entities.
//!
//! Two attribute forms are special:
//! - `nega-item` (or the `.negaItem` property) marks the element as accepting
//!   the whole row item.
//! - `.name="value"` sets a string property instead of an attribute.

use logos::{Lexer, Logos};
use serde_json::Value;

use super::tokenizer::{Content, Tag};
use crate::dom::node::{NodeData, NodeId};
use crate::dom::tree::Dom;

/// Tag name given to the root node of [`parse_fragment`] results.
pub const FRAGMENT_TAG: &str = "#fragment";

/// Tag name of text nodes that follow element children.
pub const TEXT_TAG: &str = "#text";

/// Attribute that marks an element as accepting the whole row item.
pub const ITEM_MARKER_ATTR: &str = "nega-item";

/// Property form of [`ITEM_MARKER_ATTR`]: `.negaItem=...`.
pub const ITEM_PROPERTY: &str = "negaItem";

const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

/// Errors from markup parsing.
#[derive(Debug, thiserror::Error)]
pub enum MarkupError {
    #[error("unexpected token at byte {position}: {message}")]
    UnexpectedToken { position: usize, message: String },
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),
    #[error("mismatched closing tag: expected </{expected}>, found </{found}>")]
    MismatchedClose { expected: String, found: String },
}

/// Parse a fragment into a fresh DOM rooted at a [`FRAGMENT_TAG`] node.
pub fn parse_fragment(input: &str) -> Result<Dom, MarkupError> {
    let mut dom = Dom::new();
    let root = dom.insert(NodeData::new(FRAGMENT_TAG));
    parse_into(&mut dom, root, input)?;
    Ok(dom)
}

/// Parse a fragment and append its top-level nodes as children of `parent`.
///
/// Returns the ids of the appended top-level nodes. On error, nodes parsed so
/// far stay in the DOM.
pub fn parse_into(dom: &mut Dom, parent: NodeId, input: &str) -> Result<Vec<NodeId>, MarkupError> {
    let mut parser = Parser {
        dom,
        root: parent,
        open: Vec::new(),
        top_level: Vec::new(),
    };
    parser.run(input)?;
    Ok(parser.top_level)
}

/// Open-element stack plus the output DOM.
struct Parser<'d> {
    dom: &'d mut Dom,
    root: NodeId,
    open: Vec<(NodeId, String)>,
    top_level: Vec<NodeId>,
}

impl Parser<'_> {
    fn run(&mut self, input: &str) -> Result<(), MarkupError> {
        let mut lex = Content::lexer(input);

        while let Some(result) = lex.next() {
            let position = lex.span().start;
            match result {
                Ok(Content::Text) => self.push_text(lex.slice()),
                Ok(Content::CommentStart) => match lex.remainder().find("-->") {
                    Some(end) => lex.bump(end + 3),
                    None => {
                        return Err(MarkupError::UnexpectedEof(
                            "unterminated comment".to_owned(),
                        ))
                    }
                },
                Ok(Content::CloseTag) => {
                    let name = close_tag_name(lex.slice());
                    self.close(&name, position)?;
                }
                Ok(Content::OpenTagStart) => {
                    let tag = lex.slice()[1..].to_ascii_lowercase();
                    let mut tag_lex: Lexer<'_, Tag> = lex.morph();
                    let (data, self_closing) = read_tag(&mut tag_lex, tag.clone())?;
                    lex = tag_lex.morph();

                    let id = self.append(data);
                    if !self_closing && !VOID_ELEMENTS.contains(&tag.as_str()) {
                        self.open.push((id, tag));
                    }
                }
                Err(()) => {
                    return Err(MarkupError::UnexpectedToken {
                        position,
                        message: format!("unexpected '{}'", lex.slice()),
                    })
                }
            }
        }

        match self.open.last() {
            Some((_, tag)) => Err(MarkupError::UnexpectedEof(format!("unclosed <{tag}>"))),
            None => Ok(()),
        }
    }

    fn current(&self) -> NodeId {
        self.open.last().map(|(id, _)| *id).unwrap_or(self.root)
    }

    fn append(&mut self, data: NodeData) -> NodeId {
        let parent = self.current();
        let id = self.dom.insert_child(parent, data);
        if self.open.is_empty() {
            self.top_level.push(id);
        }
        id
    }

    /// Text before any element child becomes the element's text; text after
    /// an element child becomes a `#text` node so order is kept.
    /// Runs made only of whitespace are dropped; other runs are kept as written.
    fn push_text(&mut self, raw: &str) {
        if raw.trim().is_empty() {
            return;
        }
        let text = decode_entities(raw);
        let parent = self.current();
        let has_children = !self.dom.children(parent).is_empty();
        if !has_children && !self.open.is_empty() {
            if let Some(data) = self.dom.get_mut(parent) {
                match &mut data.text {
                    Some(existing) => existing.push_str(&text),
                    None => data.text = Some(text),
                }
                return;
            }
        }
        self.append(NodeData::new(TEXT_TAG).with_text(text));
    }

    fn close(&mut self, name: &str, position: usize) -> Result<(), MarkupError> {
        // Void elements never open, so their end tags have nothing to close.
        if VOID_ELEMENTS.contains(&name) {
            return Ok(());
        }
        match self.open.last() {
            Some((_, tag)) if tag == name => {
                self.open.pop();
                Ok(())
            }
            Some((_, tag)) => Err(MarkupError::MismatchedClose {
                expected: tag.clone(),
                found: name.to_owned(),
            }),
            None => Err(MarkupError::UnexpectedToken {
                position,
                message: format!("stray </{name}>"),
            }),
        }
    }
}

/// Read attributes up to `>` or `/>`. Returns the node and whether it self-closed.
fn read_tag(lex: &mut Lexer<'_, Tag>, tag: String) -> Result<(NodeData, bool), MarkupError> {
    let mut data = NodeData::new(tag);

    loop {
        let token = lex.next();
        let position = lex.span().start;
        match token {
            None => {
                return Err(MarkupError::UnexpectedEof(format!(
                    "unterminated <{}> tag",
                    data.tag
                )))
            }
            Some(Ok(Tag::End)) => return Ok((data, false)),
            Some(Ok(Tag::SelfClose)) => return Ok((data, true)),
            Some(Ok(Tag::Name)) => {
                let name = lex.slice().to_owned();
                let value = read_value(lex)?;
                apply_attribute(&mut data, name, value);
            }
            Some(Ok(other)) => {
                return Err(MarkupError::UnexpectedToken {
                    position,
                    message: format!("expected attribute name, got {:?} '{}'", other, lex.slice()),
                })
            }
            Some(Err(())) => {
                return Err(MarkupError::UnexpectedToken {
                    position,
                    message: format!("unexpected '{}' in <{}> tag", lex.slice(), data.tag),
                })
            }
        }
    }
}

/// Read an optional `= value` after an attribute name. Boolean attributes yield "".
fn read_value(lex: &mut Lexer<'_, Tag>) -> Result<String, MarkupError> {
    let mut lookahead = lex.clone();
    if lookahead.next() != Some(Ok(Tag::Equals)) {
        return Ok(String::new());
    }
    *lex = lookahead;

    let rest = lex.remainder();
    let value = rest.trim_start();
    if value.starts_with(['"', '\'']) {
        let token = lex.next();
        let position = lex.span().start;
        return match token {
            Some(Ok(Tag::Quoted | Tag::QuotedSingle)) => {
                let slice = lex.slice();
                Ok(decode_entities(&slice[1..slice.len() - 1]))
            }
            _ => Err(MarkupError::UnexpectedEof(format!(
                "unterminated attribute value at byte {position}"
            ))),
        };
    }

    let skipped = rest.len() - value.len();
    let len = unquoted_len(value);
    if len == 0 {
        let position = lex.span().end + skipped;
        return match value.chars().next() {
            Some(c) => Err(MarkupError::UnexpectedToken {
                position,
                message: format!("expected attribute value, got '{c}'"),
            }),
            None => Err(MarkupError::UnexpectedEof(
                "expected attribute value".to_owned(),
            )),
        };
    }
    let text = decode_entities(&value[..len]);
    lex.bump(skipped + len);
    Ok(text)
}

/// Byte length of an unquoted value: up to whitespace, `>`, or a closing `/>`.
fn unquoted_len(value: &str) -> usize {
    let bytes = value.as_bytes();
    let mut end = 0;
    while end < bytes.len() {
        match bytes[end] {
            b' ' | b'\t' | b'\r' | b'\n' | b'\x0c' => break,
            b'>' | b'<' | b'"' | b'\'' | b'=' | b'`' => break,
            b'/' if bytes.get(end + 1) == Some(&b'>') => break,
            _ => end += 1,
        }
    }
    end
}

fn apply_attribute(data: &mut NodeData, name: String, value: String) {
    if let Some(prop) = name.strip_prefix('.') {
        if prop == ITEM_PROPERTY {
            data.accepts_item = true;
        } else {
            data.properties.insert(prop.to_owned(), Value::String(value));
        }
        return;
    }
    let name = name.to_ascii_lowercase();
    match name.as_str() {
        "id" => data.id = Some(value),
        "part" => {
            for part in value.split_whitespace() {
                data.parts.insert(part);
            }
        }
        ITEM_MARKER_ATTR => data.accepts_item = true,
        _ => data.set_attr(name, value),
    }
}

fn close_tag_name(slice: &str) -> String {
    slice
        .trim_start_matches("</")
        .trim_end_matches('>')
        .trim_end()
        .to_ascii_lowercase()
}

fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_owned();
    }
    raw.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
