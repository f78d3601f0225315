use super::Value;
use crate::lexer::Span;
use crate::string::IdentName;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeErrorKind {
    #[error("Duplicate Binding: {0}")]
    DuplicateBinding(IdentName),
    #[error("Unbound Name: {0}")]
    UnboundName(IdentName),
    #[error("Constant Violation: {0}")]
    ConstantViolation(IdentName),
    #[error("Invalid Assignment Target: {0}")]
    InvalidAssignmentTarget(&'static str),
    #[error("Not Callable: {0}")]
    NotCallable(Value),
    #[error("Unsupported Node: {0}")]
    UnsupportedNode(&'static str),
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{kind}")]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    pub span: Span,
}

impl RuntimeError {
    pub fn code(&self) -> &'static str {
        match self.kind {
            RuntimeErrorKind::DuplicateBinding(_) => "RT001",
            RuntimeErrorKind::UnboundName(_) => "RT002",
            RuntimeErrorKind::ConstantViolation(_) => "RT003",
            RuntimeErrorKind::InvalidAssignmentTarget(_) => "RT004",
            RuntimeErrorKind::NotCallable(_) => "RT005",
            RuntimeErrorKind::UnsupportedNode(_) => "RT006",
        }
    }
}
