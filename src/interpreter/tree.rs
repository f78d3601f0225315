use super::SystemContext;
use crate::ast::{Expression, ExpressionKind, Program, Property, Statement, VariableDecl};
use crate::environment::Environment;
use crate::value::error::{RuntimeError, RuntimeErrorKind};
use crate::value::{Object, Value};
use std::rc::Rc;

/// A node the tree-walking evaluator can reduce to a value.
pub trait Evaluate {
    fn evaluate(
        &self,
        environment: &mut Environment,
        context: &mut dyn SystemContext,
    ) -> Result<Value, RuntimeError>;
}

impl Evaluate for Program {
    fn evaluate(
        &self,
        environment: &mut Environment,
        context: &mut dyn SystemContext,
    ) -> Result<Value, RuntimeError> {
        TreeWalkEvaluator.evaluate_program(environment, context, self)
    }
}

impl Evaluate for Statement {
    fn evaluate(
        &self,
        environment: &mut Environment,
        context: &mut dyn SystemContext,
    ) -> Result<Value, RuntimeError> {
        TreeWalkEvaluator.evaluate_statement(environment, context, self)
    }
}

impl Evaluate for Expression {
    fn evaluate(
        &self,
        environment: &mut Environment,
        context: &mut dyn SystemContext,
    ) -> Result<Value, RuntimeError> {
        TreeWalkEvaluator.evaluate_expression(environment, context, self)
    }
}

pub struct TreeWalkEvaluator;

// Statements
impl TreeWalkEvaluator {
    /// Evaluates every statement in the same scope. The program's value is the
    /// value of its last statement, or `Null` when it is empty.
    pub fn evaluate_program(
        &self,
        environment: &mut Environment,
        context: &mut dyn SystemContext,
        program: &Program,
    ) -> Result<Value, RuntimeError> {
        let mut last = Value::Null;
        for stmt in program.iter() {
            last = self.evaluate_statement(environment, context, stmt)?;
        }
        Ok(last)
    }

    pub fn evaluate_statement(
        &self,
        environment: &mut Environment,
        context: &mut dyn SystemContext,
        statement: &Statement,
    ) -> Result<Value, RuntimeError> {
        match statement {
            Statement::VariableDecl(decl) => {
                self.evaluate_variable_declaration(environment, context, decl)
            }
            Statement::FunctionDecl(decl) => Err(RuntimeError {
                kind: RuntimeErrorKind::UnsupportedNode("FunctionDeclaration"),
                span: decl.span,
            }),
            Statement::Expression(expr) => self.evaluate_expression(environment, context, expr),
        }
    }

    fn evaluate_variable_declaration(
        &self,
        environment: &mut Environment,
        context: &mut dyn SystemContext,
        decl: &VariableDecl,
    ) -> Result<Value, RuntimeError> {
        let initial = match decl.initial {
            Some(ref expr) => self.evaluate_expression(environment, context, expr)?,
            None => Value::Null,
        };
        environment
            .declare(&decl.name.name, initial, decl.constant)
            .map_err(|kind| RuntimeError {
                kind,
                span: decl.name.span,
            })
    }
}

// Expressions
impl TreeWalkEvaluator {
    pub fn evaluate_expression(
        &self,
        environment: &mut Environment,
        context: &mut dyn SystemContext,
        expr: &Expression,
    ) -> Result<Value, RuntimeError> {
        let span = expr.span;
        match &expr.kind {
            ExpressionKind::NumericLiteral(v) => Ok(Value::Number(*v)),
            ExpressionKind::Identifier(name) => environment
                .lookup(name)
                .map_err(|kind| RuntimeError { kind, span }),
            ExpressionKind::Assignment { target, value } => {
                let value = self.evaluate_expression(environment, context, value)?;
                let Some(name) = target.get_l_value() else {
                    return Err(RuntimeError {
                        kind: RuntimeErrorKind::InvalidAssignmentTarget(target.get_kind_name()),
                        span: target.span,
                    });
                };
                environment
                    .assign(&name.name, value)
                    .map_err(|kind| RuntimeError {
                        kind,
                        span: name.span,
                    })
            }
            ExpressionKind::Binary { operator, lhs, rhs } => {
                let lhs = self.evaluate_expression(environment, context, lhs)?;
                let rhs = self.evaluate_expression(environment, context, rhs)?;
                Ok(lhs.apply_binary(*operator, &rhs))
            }
            ExpressionKind::Object(properties) => {
                self.evaluate_object(environment, context, properties)
            }
            ExpressionKind::Call { callee, arguments } => {
                let fun = match self.evaluate_expression(environment, context, callee)? {
                    Value::NativeFunction(fun) => fun,
                    v => {
                        return Err(RuntimeError {
                            kind: RuntimeErrorKind::NotCallable(v),
                            span: callee.span,
                        })
                    }
                };

                let mut values = Vec::with_capacity(arguments.len());
                for argument in arguments.iter() {
                    values.push(self.evaluate_expression(environment, context, argument)?);
                }

                fun.call(&values, environment, context)
                    .map_err(|kind| RuntimeError { kind, span })
            }
            ExpressionKind::Unary { .. } | ExpressionKind::Member { .. } => Err(RuntimeError {
                kind: RuntimeErrorKind::UnsupportedNode(expr.get_kind_name()),
                span,
            }),
        }
    }

    fn evaluate_object(
        &self,
        environment: &mut Environment,
        context: &mut dyn SystemContext,
        properties: &[Property],
    ) -> Result<Value, RuntimeError> {
        let mut object = Object::new();
        for Property { key, value } in properties.iter() {
            let value = match value {
                Some(expr) => self.evaluate_expression(environment, context, expr)?,
                None => environment.lookup(&key.name).map_err(|kind| RuntimeError {
                    kind,
                    span: key.span,
                })?,
            };
            object.insert(key.name.clone(), value);
        }
        Ok(Value::Object(Rc::new(object)))
    }
}
