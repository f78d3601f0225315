use super::{ParserError, ParserErrorKind};
use crate::lexer::{
    formatter::{
        BasicFormatter as BasicTokenFormatter, PrettyFormatter as PrettyTokenFormatter,
        TokenFormatter, ARIADNE_MSG, ARIADNE_WRITE_MSG,
    },
    Token,
};
use ariadne::{Color, Label, Report, ReportKind, Source};

pub trait ParserFormatter {
    fn format_error(&self, error: &ParserError) -> String;
}

pub struct DebugFormatter;

impl ParserFormatter for DebugFormatter {
    fn format_error(&self, error: &ParserError) -> String {
        format!("{error:?}")
    }
}

pub struct BasicFormatter {
    token_formatter: BasicTokenFormatter,
}

impl BasicFormatter {
    pub fn new(text: &str) -> Self {
        Self {
            token_formatter: BasicTokenFormatter::new(text),
        }
    }
}

impl ParserFormatter for BasicFormatter {
    fn format_error(&self, error: &ParserError) -> String {
        let line = self
            .token_formatter
            .get_line_breaks()
            .get_line_from_span(error.span);
        match &error.kind {
            ParserErrorKind::UnexpectedToken {
                actual: Token { kind, text, .. },
                expected,
            } => format!("({line}) Unexpected: A = {kind} {text} E = {expected}"),
            ParserErrorKind::NonExpression(Token { kind, text, .. }) => {
                format!("({line}) Non-Expression: {kind} {text}")
            }
            ParserErrorKind::NonIdentifierProperty(Token { kind, text, .. }) => {
                format!("({line}) Non-Identifier Property: {kind} {text}")
            }
            ParserErrorKind::UnexpectedEof => format!("({line}) Unexpected EOF"),
            ParserErrorKind::UninitializedConstant(name) => {
                format!("({line}) Uninitialized Constant: {name}")
            }
            ParserErrorKind::InvalidNumericLiteral(Token { text, .. }) => {
                format!("({line}) Invalid Number: {text}")
            }
            ParserErrorKind::NestingTooDeep(limit) => {
                format!("({line}) Nesting Too Deep: {limit}")
            }
            ParserErrorKind::LexicalError(e) => self.token_formatter.format_error(e),
        }
    }
}

pub struct PrettyFormatter<'src> {
    token_formatter: PrettyTokenFormatter<'src>,
}

impl<'src> PrettyFormatter<'src> {
    pub fn new(text: &'src str, path: &'src str) -> Self {
        Self {
            token_formatter: PrettyTokenFormatter::new(text, path),
        }
    }
}

impl<'src> ParserFormatter for PrettyFormatter<'src> {
    fn format_error(&self, error: &ParserError) -> String {
        let (message, label) = match &error.kind {
            ParserErrorKind::LexicalError(e) => return self.token_formatter.format_error(e),
            ParserErrorKind::UnexpectedToken { actual, expected } => (
                "Expected a different token",
                format!("Expected {expected} but got {}", actual.kind),
            ),
            ParserErrorKind::NonExpression(actual) => (
                "Expected a valid expression",
                format!("Not an expression token {}", actual.kind),
            ),
            ParserErrorKind::NonIdentifierProperty(actual) => (
                "Expected a property name after `.`",
                format!("Not an identifier {}", actual.kind),
            ),
            ParserErrorKind::UnexpectedEof => ("Unexpected EOF", "Source ends here...".into()),
            ParserErrorKind::UninitializedConstant(name) => (
                "Constants must be initialized",
                format!("`{name}` is declared without a value"),
            ),
            ParserErrorKind::InvalidNumericLiteral(actual) => (
                "Invalid numeric literal",
                format!("`{}` is not a number", actual.text),
            ),
            ParserErrorKind::NestingTooDeep(limit) => (
                "Expression nests too deeply",
                format!("Nesting exceeds {limit} levels here"),
            ),
        };

        let text = self.token_formatter.get_text();
        let path = self.token_formatter.get_path();
        let span = error.span;
        let mut output = std::io::Cursor::new(Vec::new());
        Report::build(ReportKind::Error, (path, span.range()))
            .with_code(error.code())
            .with_message(message)
            .with_label(
                Label::new((path, span.range()))
                    .with_message(label)
                    .with_color(Color::BrightRed),
            )
            .finish()
            .write((path, Source::from(text)), &mut output)
            .expect(ARIADNE_WRITE_MSG);
        String::from_utf8(output.into_inner()).expect(ARIADNE_MSG)
    }
}
