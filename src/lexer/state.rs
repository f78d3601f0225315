use super::cursor::SourceChar;
use super::token::{Span, SpanIndex, Token, TokenKind, EOF_TEXT, KEYWORD_HASHMAP};
use super::{LexicalError, LexicalErrorKind};

pub enum LexerStateTransition {
    Stay,
    ChangeState(LexerState),
    ChangeStateAndEmit {
        new_state: LexerState,
        token_or_error: Result<Token, LexicalError>,
    },
    ChangeStateAndEmitAndPutBack {
        new_state: LexerState,
        token_or_error: Result<Token, LexicalError>,
        put_back: SourceChar,
    },
}

trait LexerStateExecutor {
    fn execute(&self, source: &str, next_char: &Option<SourceChar>) -> LexerStateTransition;
}

#[derive(Debug, Default)]
pub enum LexerState {
    #[default]
    Normal,
    Number(NumberState),
    Ident(IdentState),
}

impl LexerState {
    pub fn execute(&self, source: &str, next_char: &Option<SourceChar>) -> LexerStateTransition {
        match self {
            LexerState::Normal => NormalState.execute(source, next_char),
            LexerState::Number(s) => s.execute(source, next_char),
            LexerState::Ident(s) => s.execute(source, next_char),
        }
    }
}

fn emit(kind: TokenKind, source: &str, start: SpanIndex, end: SpanIndex) -> Token {
    let span = Span {
        start,
        length: end - start,
    };
    Token {
        kind,
        text: source[span.range()].into(),
        span,
    }
}

struct NormalState;

impl LexerStateExecutor for NormalState {
    fn execute(&self, source: &str, next_char: &Option<SourceChar>) -> LexerStateTransition {
        let Some(c) = next_char else {
            return LexerStateTransition::ChangeStateAndEmit {
                new_state: LexerState::Normal,
                token_or_error: Ok(Token {
                    kind: TokenKind::Eof,
                    text: EOF_TEXT.into(),
                    span: Span::new(source.len(), 0),
                }),
            };
        };

        let just = |kind: TokenKind| LexerStateTransition::ChangeStateAndEmit {
            new_state: LexerState::Normal,
            token_or_error: Ok(emit(kind, source, c.offset, c.next_offset())),
        };

        match c.value {
            // Single character tokens
            '(' => just(TokenKind::OpenParen),
            ')' => just(TokenKind::CloseParen),
            '[' => just(TokenKind::OpenBracket),
            ']' => just(TokenKind::CloseBracket),
            '{' => just(TokenKind::OpenBrace),
            '}' => just(TokenKind::CloseBrace),
            ';' => just(TokenKind::Semicolon),
            ',' => just(TokenKind::Comma),
            '.' => just(TokenKind::Dot),
            ':' => just(TokenKind::Colon),
            '=' => just(TokenKind::Equals),
            '+' | '-' | '*' | '/' | '%' => just(TokenKind::BinaryOperator),
            ' ' | '\t' | '\r' | '\n' => LexerStateTransition::Stay,
            v if v.is_ascii_digit() => {
                LexerStateTransition::ChangeState(LexerState::Number(NumberState {
                    start: c.offset,
                }))
            }
            v if v.is_alphabetic() => {
                LexerStateTransition::ChangeState(LexerState::Ident(IdentState { start: c.offset }))
            }
            v => LexerStateTransition::ChangeStateAndEmit {
                new_state: LexerState::Normal,
                token_or_error: Err(LexicalError {
                    kind: LexicalErrorKind::Unrecognized(v),
                    span: Span {
                        start: c.offset,
                        length: v.len_utf8().into(),
                    },
                }),
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct NumberState {
    start: SpanIndex,
}

impl LexerStateExecutor for NumberState {
    fn execute(&self, source: &str, next_char: &Option<SourceChar>) -> LexerStateTransition {
        match next_char {
            Some(c) if c.value.is_ascii_digit() => LexerStateTransition::Stay,
            Some(c) => LexerStateTransition::ChangeStateAndEmitAndPutBack {
                new_state: LexerState::Normal,
                token_or_error: Ok(emit(TokenKind::Number, source, self.start, c.offset)),
                put_back: *c,
            },
            None => LexerStateTransition::ChangeStateAndEmit {
                new_state: LexerState::Normal,
                token_or_error: Ok(emit(
                    TokenKind::Number,
                    source,
                    self.start,
                    source.len().into(),
                )),
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct IdentState {
    start: SpanIndex,
}

impl IdentState {
    fn lex_ident_or_keyword(&self, source: &str, end: SpanIndex) -> Token {
        let token = emit(TokenKind::Identifier, source, self.start, end);
        Token {
            kind: KEYWORD_HASHMAP
                .get(token.text.as_str())
                .copied()
                .unwrap_or(TokenKind::Identifier),
            ..token
        }
    }
}

impl LexerStateExecutor for IdentState {
    fn execute(&self, source: &str, next_char: &Option<SourceChar>) -> LexerStateTransition {
        match next_char {
            Some(c) if c.value.is_alphabetic() => LexerStateTransition::Stay,
            Some(c) => LexerStateTransition::ChangeStateAndEmitAndPutBack {
                new_state: LexerState::Normal,
                token_or_error: Ok(self.lex_ident_or_keyword(source, c.offset)),
                put_back: *c,
            },
            None => LexerStateTransition::ChangeStateAndEmit {
                new_state: LexerState::Normal,
                token_or_error: Ok(self.lex_ident_or_keyword(source, source.len().into())),
            },
        }
    }
}
