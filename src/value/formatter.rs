use super::error::{RuntimeError, RuntimeErrorKind};
use super::Value;
use crate::lexer::formatter::{ARIADNE_MSG, ARIADNE_WRITE_MSG};
use crate::lexer::LineBreaks;
use ariadne::{Color, Label, Report, ReportKind, Source};

pub trait ValueFormatter {
    fn format(&self, value: &Value) -> String;
    fn format_error(&self, error: &RuntimeError) -> String;
}

pub struct DebugFormatter;

impl ValueFormatter for DebugFormatter {
    fn format(&self, value: &Value) -> String {
        format!("{value:?}")
    }

    fn format_error(&self, error: &RuntimeError) -> String {
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

    pub fn format_verbose(value: &Value) -> String {
        match value {
            Value::Null => "Null".into(),
            Value::Boolean(v) => format!("Boolean({v})"),
            Value::Number(v) => format!("Number({v})"),
            Value::Object(object) => {
                let properties = object
                    .iter()
                    .map(|(k, v)| format!("{k}: {}", Self::format_verbose(v)))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("Object({properties})")
            }
            Value::NativeFunction(fun) => format!("NativeFunction({})", fun.get_name()),
        }
    }
}

impl ValueFormatter for BasicFormatter {
    fn format(&self, value: &Value) -> String {
        format!("{value}")
    }

    fn format_error(&self, error: &RuntimeError) -> String {
        let line = self.line_breaks.get_line_from_span(error.span);
        match error.kind {
            RuntimeErrorKind::NotCallable(ref callee) => {
                format!("({line}) Not Callable: {}", Self::format_verbose(callee))
            }
            ref kind => format!("({line}) {kind}"),
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
}

impl<'src> ValueFormatter for PrettyFormatter<'src> {
    fn format(&self, value: &Value) -> String {
        format!("{value}")
    }

    fn format_error(&self, error: &RuntimeError) -> String {
        let (message, label) = match &error.kind {
            RuntimeErrorKind::DuplicateBinding(name) => (
                "Name is already declared in this scope",
                format!("`{name}` is declared again here"),
            ),
            RuntimeErrorKind::UnboundName(name) => (
                "Unbound name",
                format!("`{name}` is not declared in any enclosing scope"),
            ),
            RuntimeErrorKind::ConstantViolation(name) => (
                "Cannot reassign a constant",
                format!("`{name}` was declared with `const`"),
            ),
            RuntimeErrorKind::InvalidAssignmentTarget(kind) => (
                "Invalid assignment target",
                format!("Only identifiers can be assigned to, found {kind}"),
            ),
            RuntimeErrorKind::NotCallable(callee) => (
                "Value is not callable",
                format!("This evaluates to a {}", callee.get_type_name()),
            ),
            RuntimeErrorKind::UnsupportedNode(kind) => (
                "Unsupported node",
                format!("{kind} cannot be evaluated"),
            ),
        };

        let path = self.path;
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
            .write((path, Source::from(self.text)), &mut output)
            .expect(ARIADNE_WRITE_MSG);
        String::from_utf8(output.into_inner()).expect(ARIADNE_MSG)
    }
}
