use super::{token::Token, LineBreaks};
use crate::lexer::{Lexer, LexicalError, LexicalErrorKind};
use ariadne::{Color, Label, Report, ReportKind, Source};

pub(crate) const ARIADNE_MSG: &str = "Ariadne produces valid utf-8 strings";
pub(crate) const ARIADNE_WRITE_MSG: &str = "Write into buffer should not fail.";

/// Interface for creating new token formatters.
pub trait TokenFormatter {
    /// Formats a token into a string.
    fn format(&self, token: &Token) -> String;
    /// Formats a lexer error into a string.
    fn format_error(&self, error: &LexicalError) -> String;
}

pub trait ToFormatter<F>
where
    F: TokenFormatter,
{
    fn create_formatter(&self) -> F;
}

pub struct DebugFormatter;

impl<'src> ToFormatter<DebugFormatter> for Lexer<'src> {
    fn create_formatter(&self) -> DebugFormatter {
        DebugFormatter
    }
}

impl TokenFormatter for DebugFormatter {
    fn format(&self, token: &Token) -> String {
        format!("{token:?}")
    }

    fn format_error(&self, error: &LexicalError) -> String {
        format!("{error:?}")
    }
}

pub struct BasicFormatter {
    line_breaks: LineBreaks,
}

impl BasicFormatter {
    pub fn new(text: &str) -> Self {
        Self {
            line_breaks: LineBreaks::new(text),
        }
    }

    pub fn get_line_breaks(&self) -> &LineBreaks {
        &self.line_breaks
    }
}

impl<'src> ToFormatter<BasicFormatter> for Lexer<'src> {
    fn create_formatter(&self) -> BasicFormatter {
        BasicFormatter {
            line_breaks: self.get_line_breaks(),
        }
    }
}

impl TokenFormatter for BasicFormatter {
    fn format(&self, token: &Token) -> String {
        format!("{} {}", token.kind, token.text)
    }

    fn format_error(&self, error: &LexicalError) -> String {
        let line = self.line_breaks.get_line_from_span(error.span);
        match error.kind {
            LexicalErrorKind::Unrecognized(c) => {
                format!("({line}) Unrecognized character: {c:?}")
            }
        }
    }
}

pub struct PrettyFormatter<'src> {
    text: &'src str,
    path: &'src str,
}

impl<'src> PrettyFormatter<'src> {
    pub fn new(text: &'src str, path: &'src str) -> Self {
        Self { text, path }
    }

    pub fn get_text(&self) -> &'src str {
        self.text
    }

    pub fn get_path(&self) -> &'src str {
        self.path
    }
}

impl<'src> TokenFormatter for PrettyFormatter<'src> {
    fn format(&self, token: &Token) -> String {
        format!("{} {} @ {:?}", token.kind, token.text, token.span.range())
    }

    fn format_error(&self, error: &LexicalError) -> String {
        let path = self.path;
        let span = error.span;
        let mut output = std::io::Cursor::new(Vec::new());
        match error.kind {
            LexicalErrorKind::Unrecognized(c) => {
                Report::build(ReportKind::Error, (path, span.range()))
                    .with_code(error.code())
                    .with_message("Encountered an unrecognized character")
                    .with_label(
                        Label::new((path, span.range()))
                            .with_message(format!("The character {c:?} is not part of the language"))
                            .with_color(Color::BrightRed),
                    )
                    .finish()
                    .write((path, Source::from(self.text)), &mut output)
                    .expect(ARIADNE_WRITE_MSG);
            }
        }
        String::from_utf8(output.into_inner()).expect(ARIADNE_MSG)
    }
}
