mod error;
pub mod formatter;

use crate::{
    ast::{
        BinaryOperator, Expression, ExpressionKind, Program, Property, Statement, VariableDecl,
    },
    lexer::{tokenize, Span, Token, TokenKind, EOF_TEXT},
    string::Ident,
};
pub use error::{ParserError, ParserErrorKind};

/// Lexes and parses `source` into a program. The first error aborts the parse.
pub fn parse(source: &str) -> Result<Program, ParserError> {
    Parser::new(source)?.parse()
}

/// Deepest expression nesting accepted before parsing gives up.
pub const MAX_NESTING_DEPTH: usize = 128;

pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    depth: usize,
}

impl Parser {
    pub fn new(source: &str) -> Result<Self, ParserError> {
        Ok(Self::from_tokens(tokenize(source)?))
    }

    /// An `Eof` token is appended when `tokens` does not already end with one.
    pub fn from_tokens(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            let end = tokens.last().map_or(0, |t| t.span.end().to_usize());
            tokens.push(Token {
                kind: TokenKind::Eof,
                text: EOF_TEXT.into(),
                span: Span::new(end, 0),
            });
        }
        Self {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> &Token {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[self.position.min(last)]
    }

    fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    fn next_token(&mut self) -> Token {
        let token = self.peek().clone();
        if !token.is_eof() {
            self.position += 1;
        }
        token
    }

    fn expect(&mut self, expected: TokenKind) -> Result<Token, ParserError> {
        let next_token = self.next_token();
        if next_token.kind != expected {
            Err(ParserError {
                span: next_token.span,
                kind: ParserErrorKind::UnexpectedToken {
                    actual: next_token,
                    expected,
                },
            })
        } else {
            Ok(next_token)
        }
    }

    fn eat_if(&mut self, next: TokenKind) -> Option<Token> {
        if self.peek_kind() != next {
            None
        } else {
            Some(self.next_token())
        }
    }

    fn peek_binary_operator(&self) -> Option<BinaryOperator> {
        let token = self.peek();
        match token.kind {
            TokenKind::BinaryOperator => BinaryOperator::from_symbol(&token.text),
            _ => None,
        }
    }
}

// Statements
impl Parser {
    pub fn parse(&mut self) -> Result<Program, ParserError> {
        let mut body = Vec::new();
        while !self.peek().is_eof() {
            body.push(self.parse_statement()?);
        }
        Ok(Program::new(body))
    }

    fn parse_statement(&mut self) -> Result<Statement, ParserError> {
        match self.peek_kind() {
            TokenKind::Let | TokenKind::Const => self.parse_variable_declaration(),
            _ => {
                let expr = self.parse_expression()?;
                let _ = self.eat_if(TokenKind::Semicolon);
                Ok(Statement::Expression(expr))
            }
        }
    }

    fn parse_variable_declaration(&mut self) -> Result<Statement, ParserError> {
        let keyword = self.next_token();
        let constant = matches!(keyword.kind, TokenKind::Const);
        let name = self.expect(TokenKind::Identifier)?;
        let name = Ident::new(&name.text, name.span);

        if let Some(terminator) = self.eat_if(TokenKind::Semicolon) {
            if constant {
                return Err(ParserError {
                    kind: ParserErrorKind::UninitializedConstant(name.name),
                    span: keyword.span.merge(&terminator.span),
                });
            }
            return Ok(Statement::VariableDecl(VariableDecl {
                name,
                constant,
                initial: None,
                span: keyword.span.merge(&terminator.span),
            }));
        }

        self.expect(TokenKind::Equals)?;
        let initial = self.parse_expression()?;
        let terminator = self.expect(TokenKind::Semicolon)?;

        Ok(Statement::VariableDecl(VariableDecl {
            name,
            constant,
            initial: Some(initial),
            span: keyword.span.merge(&terminator.span),
        }))
    }
}

// Expressions, loosest binding first
impl Parser {
    pub fn parse_expression(&mut self) -> Result<Expression, ParserError> {
        self.parse_assignment()
    }

    fn parse_assignment(&mut self) -> Result<Expression, ParserError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParserError {
                span: self.peek().span,
                kind: ParserErrorKind::NestingTooDeep(MAX_NESTING_DEPTH),
            });
        }
        self.depth += 1;
        let result = self.parse_assignment_inner();
        self.depth -= 1;
        result
    }

    fn parse_assignment_inner(&mut self) -> Result<Expression, ParserError> {
        let target = self.parse_object()?;

        if self.eat_if(TokenKind::Equals).is_none() {
            return Ok(target);
        }
        let value = self.parse_assignment()?;
        let span = target.span.merge(&value.span);
        Ok(Expression::new(
            ExpressionKind::Assignment {
                target: Box::new(target),
                value: Box::new(value),
            },
            span,
        ))
    }

    fn parse_object(&mut self) -> Result<Expression, ParserError> {
        let Some(open) = self.eat_if(TokenKind::OpenBrace) else {
            return self.parse_additive();
        };

        let mut properties = Vec::new();
        while !self.peek().is_eof() && self.peek_kind() != TokenKind::CloseBrace {
            let key = self.expect(TokenKind::Identifier)?;
            let key = Ident::new(&key.text, key.span);

            // Shorthand `{ key, ... }` or `{ ..., key }`
            if self.eat_if(TokenKind::Comma).is_some() {
                properties.push(Property { key, value: None });
                continue;
            } else if self.peek_kind() == TokenKind::CloseBrace {
                properties.push(Property { key, value: None });
                continue;
            }

            self.expect(TokenKind::Colon)?;
            let value = self.parse_expression()?;
            properties.push(Property {
                key,
                value: Some(value),
            });

            if self.peek_kind() != TokenKind::CloseBrace {
                self.expect(TokenKind::Comma)?;
            }
        }

        let close = self.expect(TokenKind::CloseBrace)?;
        Ok(Expression::new(
            ExpressionKind::Object(properties),
            open.span.merge(&close.span),
        ))
    }

    fn parse_additive(&mut self) -> Result<Expression, ParserError> {
        let mut lhs = self.parse_multiplicative()?;

        while let Some(operator) = self.peek_binary_operator().filter(|op| op.is_additive()) {
            let _ = self.next_token();
            let rhs = self.parse_multiplicative()?;
            lhs = Self::binary(operator, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_multiplicative(&mut self) -> Result<Expression, ParserError> {
        let mut lhs = self.parse_call_member()?;

        while let Some(operator) = self
            .peek_binary_operator()
            .filter(|op| op.is_multiplicative())
        {
            let _ = self.next_token();
            let rhs = self.parse_call_member()?;
            lhs = Self::binary(operator, lhs, rhs);
        }
        Ok(lhs)
    }

    fn binary(operator: BinaryOperator, lhs: Expression, rhs: Expression) -> Expression {
        let span = lhs.span.merge(&rhs.span);
        Expression::new(
            ExpressionKind::Binary {
                operator,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
            span,
        )
    }

    fn parse_call_member(&mut self) -> Result<Expression, ParserError> {
        let mut expr = self.parse_member()?;
        while self.peek_kind() == TokenKind::OpenParen {
            expr = self.parse_call(expr)?;
        }
        Ok(expr)
    }

    fn parse_call(&mut self, callee: Expression) -> Result<Expression, ParserError> {
        self.expect(TokenKind::OpenParen)?;
        let mut arguments = Vec::new();
        if self.peek_kind() != TokenKind::CloseParen {
            arguments.push(self.parse_assignment()?);
            while self.eat_if(TokenKind::Comma).is_some() {
                arguments.push(self.parse_assignment()?);
            }
        }
        let close = self.expect(TokenKind::CloseParen)?;

        let span = callee.span.merge(&close.span);
        Ok(Expression::new(
            ExpressionKind::Call {
                callee: Box::new(callee),
                arguments,
            },
            span,
        ))
    }

    fn parse_member(&mut self) -> Result<Expression, ParserError> {
        let mut object = self.parse_primary()?;

        loop {
            let (property, computed, end) = match self.peek_kind() {
                TokenKind::Dot => {
                    let _ = self.next_token();
                    let token = self.next_token();
                    if token.kind != TokenKind::Identifier {
                        return Err(ParserError {
                            span: token.span,
                            kind: ParserErrorKind::NonIdentifierProperty(token),
                        });
                    }
                    let property = Expression::new(
                        ExpressionKind::Identifier(token.text.as_str().into()),
                        token.span,
                    );
                    (property, false, token.span)
                }
                TokenKind::OpenBracket => {
                    let _ = self.next_token();
                    let property = self.parse_expression()?;
                    let close = self.expect(TokenKind::CloseBracket)?;
                    (property, true, close.span)
                }
                _ => break,
            };

            let span = object.span.merge(&end);
            object = Expression::new(
                ExpressionKind::Member {
                    object: Box::new(object),
                    property: Box::new(property),
                    computed,
                },
                span,
            );
        }
        Ok(object)
    }

    fn parse_primary(&mut self) -> Result<Expression, ParserError> {
        let token = self.next_token();

        match token.kind {
            TokenKind::Identifier => Ok(Expression::new(
                ExpressionKind::Identifier(token.text.as_str().into()),
                token.span,
            )),
            TokenKind::Number => {
                let value = token
                    .text
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| ParserError {
                        span: token.span,
                        kind: ParserErrorKind::InvalidNumericLiteral(token.clone()),
                    })?;
                Ok(Expression::new(
                    ExpressionKind::NumericLiteral(value),
                    token.span,
                ))
            }
            TokenKind::OpenParen => {
                let inner = self.parse_expression()?;
                self.expect(TokenKind::CloseParen)?;
                Ok(inner)
            }
            TokenKind::Eof => Err(ParserError {
                span: token.span,
                kind: ParserErrorKind::UnexpectedEof,
            }),
            _ => Err(ParserError {
                span: token.span,
                kind: ParserErrorKind::NonExpression(token),
            }),
        }
    }
}
