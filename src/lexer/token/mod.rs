mod span;

use compact_str::CompactString;
pub use span::{SpanIndex, SpanLength};
use std::collections::HashMap;
use std::fmt::Display;
use std::ops::Range;
use std::sync::LazyLock;

/// Text carried by the end of file sentinel.
pub const EOF_TEXT: &str = "EndOfFile";

/// The hashmap for keywords
pub static KEYWORD_HASHMAP: LazyLock<HashMap<&'static str, TokenKind>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    map.insert("let", TokenKind::Let);
    map.insert("const", TokenKind::Const);
    map
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// The byte position of the start of the token.
    pub start: SpanIndex,
    /// The length of the token in bytes.
    pub length: SpanLength,
}

impl Span {
    pub fn new(start: usize, length: usize) -> Self {
        Self {
            start: start.into(),
            length: length.into(),
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.start.into()..(self.start + self.length).into()
    }

    pub fn end(&self) -> SpanIndex {
        self.start + self.length
    }

    pub fn merge(&self, other: &Span) -> Span {
        let start = self.start.min(other.start);
        let end = self.end().max(other.end());
        let length = end - start;
        Span { start, length }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    Number,
    Identifier,
    String,

    // Keywords
    Let,
    Const,

    // Grouping
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    OpenBrace,
    CloseBrace,

    // Miscellaneous
    Equals,
    Semicolon,
    Comma,
    Colon,
    Dot,
    BinaryOperator,

    // End of file.
    Eof,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Number => write!(f, "NUMBER"),
            TokenKind::Identifier => write!(f, "IDENTIFIER"),
            TokenKind::String => write!(f, "STRING"),
            TokenKind::Let => write!(f, "LET"),
            TokenKind::Const => write!(f, "CONST"),
            TokenKind::OpenParen => write!(f, "OPEN_PAREN"),
            TokenKind::CloseParen => write!(f, "CLOSE_PAREN"),
            TokenKind::OpenBracket => write!(f, "OPEN_BRACKET"),
            TokenKind::CloseBracket => write!(f, "CLOSE_BRACKET"),
            TokenKind::OpenBrace => write!(f, "OPEN_BRACE"),
            TokenKind::CloseBrace => write!(f, "CLOSE_BRACE"),
            TokenKind::Equals => write!(f, "EQUALS"),
            TokenKind::Semicolon => write!(f, "SEMICOLON"),
            TokenKind::Comma => write!(f, "COMMA"),
            TokenKind::Colon => write!(f, "COLON"),
            TokenKind::Dot => write!(f, "DOT"),
            TokenKind::BinaryOperator => write!(f, "BINARY_OPERATOR"),
            TokenKind::Eof => write!(f, "EOF"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// The exact source text the token was lexed from.
    pub text: CompactString,
    pub span: Span,
}

impl Token {
    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}
