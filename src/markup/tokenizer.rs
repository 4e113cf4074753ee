//! logos-based markup tokenizer.
//!
//! Markup is lexed in two modes. [`Content`] covers everything between tags
//! (text, comments, tag openers and closers); once an opener is seen the lexer
//! is morphed into [`Tag`] mode to read attributes up to `>` or `/>`, then
//! morphed back.

use logos::Logos;

/// Token produced between tags.
#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Content {
    /// `<!--`; the parser skips ahead to the matching `-->`.
    #[token("<!--")]
    CommentStart,

    /// A closing tag including its `>`: `</span>`, `</nega-datatable >`.
    #[regex(r"</[a-zA-Z][a-zA-Z0-9:_.-]*[ \t\r\n\f]*>")]
    CloseTag,

    /// Start of an opening tag: `<span`, `<nega-datatable`.
    #[regex(r"<[a-zA-Z][a-zA-Z0-9:_.-]*")]
    OpenTagStart,

    /// A run of text up to the next `<`.
    #[regex(r"[^<]+")]
    Text,
}

/// Token produced inside an opening tag.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Tag {
    /// `/>`
    #[token("/>")]
    SelfClose,

    /// `>`
    #[token(">")]
    End,

    /// `=`
    #[token("=")]
    Equals,

    /// Double-quoted attribute value.
    #[regex(r#""[^"]*""#)]
    Quoted,

    /// Single-quoted attribute value.
    #[regex(r"'[^']*'")]
    QuotedSingle,

    /// Attribute name. Unquoted values are scanned by the parser, since they
    /// may contain `/`.
    #[regex(r#"[^ \t\r\n\f"'<>=/`]+"#)]
    Name,
}
