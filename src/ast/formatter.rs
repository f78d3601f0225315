use super::{Expression, ExpressionKind, Program, Property, Statement};
use std::fmt::Write;

const WRITE_FMT_MSG: &str = "Encountered an error while attempting to write format string to buffer.";

pub trait ProgramFormatter {
    fn format(&self, program: &Program) -> String {
        program
            .iter()
            .map(|stmt| self.format_statement(stmt))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_statement(&self, statement: &Statement) -> String;
}

pub struct DebugFormatter;

impl ProgramFormatter for DebugFormatter {
    fn format(&self, program: &Program) -> String {
        format!("{program:#?}")
    }

    fn format_statement(&self, statement: &Statement) -> String {
        format!("{statement:#?}")
    }
}

pub struct SExpressionFormatter;

impl SExpressionFormatter {
    pub fn format_expression(expr: &Expression) -> String {
        match &expr.kind {
            ExpressionKind::NumericLiteral(v) => format!("{v:?}"),
            ExpressionKind::Identifier(name) => format!("{name}"),
            ExpressionKind::Assignment { target, value } => format!(
                "(= {} {})",
                Self::format_expression(target),
                Self::format_expression(value)
            ),
            ExpressionKind::Binary { operator, lhs, rhs } => format!(
                "({operator} {} {})",
                Self::format_expression(lhs),
                Self::format_expression(rhs)
            ),
            ExpressionKind::Unary { operator, rhs } => {
                format!("({} {})", operator.symbol(), Self::format_expression(rhs))
            }
            ExpressionKind::Object(properties) => {
                let mut buffer = String::from("(object");
                for Property { key, value } in properties.iter() {
                    match value {
                        Some(value) => buffer
                            .write_fmt(format_args!(
                                " ({key} {})",
                                Self::format_expression(value)
                            ))
                            .expect(WRITE_FMT_MSG),
                        None => buffer
                            .write_fmt(format_args!(" {key}"))
                            .expect(WRITE_FMT_MSG),
                    }
                }
                buffer.push(')');
                buffer
            }
            ExpressionKind::Call { callee, arguments } => {
                let mut buffer = format!("(call {}", Self::format_expression(callee));
                for argument in arguments.iter() {
                    buffer.push(' ');
                    buffer.push_str(&Self::format_expression(argument));
                }
                buffer.push(')');
                buffer
            }
            ExpressionKind::Member {
                object,
                property,
                computed,
            } => format!(
                "({} {} {})",
                if *computed { "[]" } else { "." },
                Self::format_expression(object),
                Self::format_expression(property)
            ),
        }
    }
}

impl ProgramFormatter for SExpressionFormatter {
    fn format_statement(&self, statement: &Statement) -> String {
        match statement {
            Statement::VariableDecl(decl) => {
                let keyword = if decl.constant { "const" } else { "let" };
                match decl.initial {
                    Some(ref initial) => format!(
                        "({keyword} {} {})",
                        decl.name,
                        Self::format_expression(initial)
                    ),
                    None => format!("({keyword} {})", decl.name),
                }
            }
            Statement::FunctionDecl(decl) => {
                let parameters = decl
                    .parameters
                    .iter()
                    .map(|p| p.name.to_string())
                    .collect::<Vec<_>>()
                    .join(" ");
                let mut buffer = format!("(fn {} ({parameters})", decl.name);
                for stmt in decl.body.iter() {
                    buffer.push(' ');
                    buffer.push_str(&self.format_statement(stmt));
                }
                buffer.push(')');
                buffer
            }
            Statement::Expression(expr) => Self::format_expression(expr),
        }
    }
}

/// Prints the AST back into source text that parses to the same tree.
pub struct SourceFormatter;

// Parsing tiers from loosest to tightest. A child printed below the tier its
// position requires is wrapped in parentheses.
const ASSIGNMENT: u8 = 0;
const OBJECT: u8 = 1;
const ADDITIVE: u8 = 2;
const MULTIPLICATIVE: u8 = 3;
const CALL: u8 = 4;
const MEMBER: u8 = 5;
const PRIMARY: u8 = 6;

impl SourceFormatter {
    fn get_tier(expr: &Expression) -> u8 {
        match &expr.kind {
            ExpressionKind::Assignment { .. } => ASSIGNMENT,
            ExpressionKind::Object(_) => OBJECT,
            ExpressionKind::Binary { operator, .. } if operator.is_additive() => ADDITIVE,
            ExpressionKind::Binary { .. } => MULTIPLICATIVE,
            ExpressionKind::Call { .. } => CALL,
            ExpressionKind::Member { .. } => MEMBER,
            ExpressionKind::NumericLiteral(_)
            | ExpressionKind::Identifier(_)
            | ExpressionKind::Unary { .. } => PRIMARY,
        }
    }

    fn format_at(expr: &Expression, tier: u8) -> String {
        let text = Self::format_expression(expr);
        if Self::get_tier(expr) < tier {
            format!("({text})")
        } else {
            text
        }
    }

    pub fn format_expression(expr: &Expression) -> String {
        match &expr.kind {
            ExpressionKind::NumericLiteral(v) => format!("{v}"),
            ExpressionKind::Identifier(name) => format!("{name}"),
            ExpressionKind::Assignment { target, value } => format!(
                "{} = {}",
                Self::format_at(target, OBJECT),
                Self::format_at(value, ASSIGNMENT)
            ),
            ExpressionKind::Binary { operator, lhs, rhs } => {
                let tier = if operator.is_additive() {
                    ADDITIVE
                } else {
                    MULTIPLICATIVE
                };
                format!(
                    "{} {operator} {}",
                    Self::format_at(lhs, tier),
                    Self::format_at(rhs, tier + 1)
                )
            }
            ExpressionKind::Unary { operator, rhs } => {
                format!("({}{})", operator.symbol(), Self::format_at(rhs, PRIMARY))
            }
            ExpressionKind::Object(properties) => {
                if properties.is_empty() {
                    return "{}".into();
                }
                let properties = properties
                    .iter()
                    .map(|Property { key, value }| match value {
                        Some(value) => format!("{key}: {}", Self::format_at(value, ASSIGNMENT)),
                        None => format!("{key}"),
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{{ {properties} }}")
            }
            ExpressionKind::Call { callee, arguments } => {
                let arguments = arguments
                    .iter()
                    .map(|arg| Self::format_at(arg, ASSIGNMENT))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}({arguments})", Self::format_at(callee, CALL))
            }
            ExpressionKind::Member {
                object,
                property,
                computed,
            } => {
                let object = Self::format_at(object, MEMBER);
                if *computed {
                    format!("{object}[{}]", Self::format_at(property, ASSIGNMENT))
                } else {
                    format!("{object}.{}", Self::format_at(property, PRIMARY))
                }
            }
        }
    }
}

impl ProgramFormatter for SourceFormatter {
    fn format_statement(&self, statement: &Statement) -> String {
        match statement {
            Statement::VariableDecl(decl) => {
                let keyword = if decl.constant { "const" } else { "let" };
                match decl.initial {
                    Some(ref initial) => format!(
                        "{keyword} {} = {};",
                        decl.name,
                        Self::format_at(initial, ASSIGNMENT)
                    ),
                    None => format!("{keyword} {};", decl.name),
                }
            }
            Statement::FunctionDecl(decl) => {
                let parameters = decl
                    .parameters
                    .iter()
                    .map(|p| p.name.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                let body = decl
                    .body
                    .iter()
                    .map(|stmt| self.format_statement(stmt))
                    .collect::<Vec<_>>()
                    .join(" ");
                format!("fn {}({parameters}) {{ {body} }}", decl.name)
            }
            Statement::Expression(expr) => format!("{};", Self::format_at(expr, ASSIGNMENT)),
        }
    }
}
