use crate::environment::Environment;
use crate::interpreter::SystemContext;
use crate::value::{error::RuntimeErrorKind, NativeFunction, Value};
use std::time::{SystemTime, UNIX_EPOCH};

/// Writes its arguments separated by spaces, then a newline.
#[derive(Debug)]
pub struct NativePrint;

impl NativeFunction for NativePrint {
    fn get_name(&self) -> &'static str {
        "print"
    }

    fn call(
        &self,
        arguments: &[Value],
        environment: &mut Environment,
        context: &mut dyn SystemContext,
    ) -> Result<Value, RuntimeErrorKind> {
        let _ = environment;
        let line = arguments
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        context.writeln(&line);
        Ok(Value::Null)
    }
}

/// Milliseconds since the Unix epoch.
#[derive(Debug)]
pub struct NativeTime;

impl NativeFunction for NativeTime {
    fn get_name(&self) -> &'static str {
        "time"
    }

    fn call(
        &self,
        arguments: &[Value],
        environment: &mut Environment,
        context: &mut dyn SystemContext,
    ) -> Result<Value, RuntimeErrorKind> {
        let _ = (arguments, environment, context);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as f64)
            .unwrap_or_default();
        Ok(Value::Number(millis))
    }
}

/// Builds the global scope every session starts from.
pub fn create_global_environment() -> Environment {
    const MSG: &str = "A fresh global scope has no bindings to collide with.";
    let mut environment = Environment::new();
    let builtins = [
        ("true", Value::Boolean(true)),
        ("false", Value::Boolean(false)),
        ("null", Value::Null),
        ("print", Value::native(NativePrint)),
        ("time", Value::native(NativeTime)),
    ];
    for (name, value) in builtins {
        environment.declare(name, value, true).expect(MSG);
    }
    environment
}
