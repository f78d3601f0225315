pub mod error;
pub mod formatter;

use crate::ast::BinaryOperator;
use crate::environment::Environment;
use crate::interpreter::SystemContext;
use crate::string::IdentName;
use error::RuntimeErrorKind;
use std::rc::Rc;

/// A host callback exposed to programs as a callable value.
pub trait NativeFunction: std::fmt::Debug {
    fn get_name(&self) -> &'static str;
    fn call(
        &self,
        arguments: &[Value],
        environment: &mut Environment,
        context: &mut dyn SystemContext,
    ) -> Result<Value, RuntimeErrorKind>;
}

/// Property mapping of an object value. Iterates in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Object {
    properties: Vec<(IdentName, Value)>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces `key`, keeping the position of the first insertion.
    pub fn insert(&mut self, key: IdentName, value: Value) {
        match self.properties.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.properties.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties
            .iter()
            .find(|(k, _)| &**k == key)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&IdentName, &Value)> {
        self.properties.iter().map(|(k, v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_some_and(|v| v == value))
    }
}

#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Boolean(bool),
    Number(f64),
    Object(Rc<Object>),
    NativeFunction(Rc<dyn NativeFunction>),
}

impl Value {
    pub fn native(function: impl NativeFunction + 'static) -> Self {
        Self::NativeFunction(Rc::new(function))
    }

    pub fn get_type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::Object(_) => "object",
            Value::NativeFunction(_) => "native-fn",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(lhs), Value::Boolean(rhs)) => lhs == rhs,
            (Value::Number(lhs), Value::Number(rhs)) => lhs == rhs,
            (Value::Object(lhs), Value::Object(rhs)) => lhs == rhs,
            (Value::NativeFunction(lhs), Value::NativeFunction(rhs)) => {
                std::ptr::addr_eq(Rc::as_ptr(lhs), Rc::as_ptr(rhs))
            }
            _ => false,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::Number(v) => write!(f, "{v}"),
            Self::Object(object) => {
                if object.is_empty() {
                    return write!(f, "{{}}");
                }
                write!(f, "{{ ")?;
                for (index, (key, value)) in object.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, " }}")
            }
            Self::NativeFunction(fun) => write!(f, "<native fn {}>", fun.get_name()),
        }
    }
}

// Arithmetic
impl Value {
    /// Applies `operator` when both sides are numbers. Every other pairing is `Null`.
    pub fn apply_binary(&self, operator: BinaryOperator, other: &Value) -> Value {
        match (self, other) {
            (Value::Number(lhs), Value::Number(rhs)) => Value::Number(operator.apply(*lhs, *rhs)),
            _ => Value::Null,
        }
    }
}
