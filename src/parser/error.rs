use crate::lexer::{LexicalError, Span, Token, TokenKind};
use crate::string::IdentName;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParserErrorKind {
    #[error("Expected {expected} but got {} {:?}.", .actual.kind, .actual.text)]
    UnexpectedToken { actual: Token, expected: TokenKind },
    #[error("Expected an expression but got {} {:?}.", .0.kind, .0.text)]
    NonExpression(Token),
    #[error("Expected an identifier after `.` but got {} {:?}.", .0.kind, .0.text)]
    NonIdentifierProperty(Token),
    #[error("Expected a non-EOF token.")]
    UnexpectedEof,
    #[error("Constant `{0}` must be initialized.")]
    UninitializedConstant(IdentName),
    #[error("Invalid numeric literal {0:?}.")]
    InvalidNumericLiteral(Token),
    #[error("Expressions nest deeper than {0} levels.")]
    NestingTooDeep(usize),
    #[error("Encountered a lexer error {0}.")]
    LexicalError(#[from] LexicalError),
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{kind}")]
pub struct ParserError {
    #[source]
    pub kind: ParserErrorKind,
    pub span: Span,
}

impl ParserError {
    pub fn code(&self) -> &'static str {
        match self.kind {
            ParserErrorKind::UnexpectedToken { .. } => "PA001",
            ParserErrorKind::NonExpression(_) => "PA002",
            ParserErrorKind::NonIdentifierProperty(_) => "PA003",
            ParserErrorKind::UnexpectedEof => "PA004",
            ParserErrorKind::UninitializedConstant(_) => "PA005",
            ParserErrorKind::InvalidNumericLiteral(_) => "PA006",
            ParserErrorKind::NestingTooDeep(_) => "PA007",
            ParserErrorKind::LexicalError(ref e) => e.code(),
        }
    }
}

impl From<LexicalError> for ParserError {
    fn from(value: LexicalError) -> Self {
        Self {
            span: value.span,
            kind: value.into(),
        }
    }
}
