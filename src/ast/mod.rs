pub mod formatter;
mod operator;

use crate::lexer::Span;
use crate::string::{Ident, IdentName};
pub use operator::{BinaryOperator, UnaryOperator};

/// Root of a parsed source text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub body: Vec<Statement>,
}

impl Program {
    pub fn new(body: Vec<Statement>) -> Self {
        Self { body }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Statement> {
        self.body.iter()
    }

    pub fn get_statement(&self, index: usize) -> Option<&Statement> {
        self.body.get(index)
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    VariableDecl(VariableDecl),
    FunctionDecl(FunctionDecl),
    Expression(Expression),
}

impl Statement {
    pub fn get_span(&self) -> Span {
        match self {
            Statement::VariableDecl(decl) => decl.span,
            Statement::FunctionDecl(decl) => decl.span,
            Statement::Expression(expr) => expr.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDecl {
    pub name: Ident,
    pub constant: bool,
    pub initial: Option<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: Ident,
    pub parameters: Vec<Ident>,
    pub body: Vec<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub key: Ident,
    /// `None` for shorthand properties, which are resolved by looking up `key`.
    pub value: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionKind {
    NumericLiteral(f64),
    Identifier(IdentName),
    Assignment {
        target: Box<Expression>,
        value: Box<Expression>,
    },
    Binary {
        operator: BinaryOperator,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },
    Unary {
        operator: UnaryOperator,
        rhs: Box<Expression>,
    },
    Object(Vec<Property>),
    Call {
        callee: Box<Expression>,
        arguments: Vec<Expression>,
    },
    Member {
        object: Box<Expression>,
        property: Box<Expression>,
        computed: bool,
    },
}

impl Expression {
    pub fn new(kind: ExpressionKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn get_l_value(&self) -> Option<Ident> {
        match self.kind {
            ExpressionKind::Identifier(ref name) => Some(Ident {
                name: name.clone(),
                span: self.span,
            }),
            _ => None,
        }
    }

    pub fn get_kind_name(&self) -> &'static str {
        match self.kind {
            ExpressionKind::NumericLiteral(_) => "NumericLiteral",
            ExpressionKind::Identifier(_) => "Identifier",
            ExpressionKind::Assignment { .. } => "AssignmentExpr",
            ExpressionKind::Binary { .. } => "BinaryExpr",
            ExpressionKind::Unary { .. } => "UnaryExpr",
            ExpressionKind::Object(_) => "ObjectLiteral",
            ExpressionKind::Call { .. } => "CallExpr",
            ExpressionKind::Member { .. } => "MemberExpr",
        }
    }
}
